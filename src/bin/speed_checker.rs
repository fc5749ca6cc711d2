use std::time::Duration;

use clap::Parser;
use speed_checker::checker::SpeedChecker;
use speed_checker::config::{DownloadConfig, UploadConfig};
use speed_checker::emitter::{Emitter, HumanReadableEmitter, JsonEmitter};
use speed_checker::params;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, clap::ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Parser, Debug)]
#[command(version, about = "Measure HTTP download and upload speed")]
struct Cli {
    /// URL fetched by the download test
    #[arg(long, default_value = params::DOWNLOAD_URL)]
    download_url: String,
    /// URL the upload payload is POSTed to
    #[arg(long, default_value = params::UPLOAD_URL)]
    upload_url: String,
    /// Seconds after which the download stops reading [default: 10]
    #[arg(long, value_parser = secs)]
    max_duration: Option<Duration>,
    /// Size of the upload payload in bytes
    #[arg(long, default_value_t = params::UPLOAD_PAYLOAD_SIZE)]
    payload_size: usize,
    /// Connect timeout in seconds [default: 10]
    #[arg(long, value_parser = secs)]
    connect_timeout: Option<Duration>,
    /// Read timeout in seconds [default: 10]
    #[arg(long, value_parser = secs)]
    read_timeout: Option<Duration>,
    /// Hard limit in seconds for each test, including connection setup
    #[arg(long, value_parser = secs)]
    deadline: Option<Duration>,
    /// Output format to use: 'human' or 'json' for batch processing
    #[arg(long, default_value = "human")]
    format: Format,
}

fn secs(raw: &str) -> Result<Duration, String> {
    let value: f64 = raw.parse().map_err(|e| format!("invalid number {raw}: {e}"))?;
    Duration::try_from_secs_f64(value).map_err(|e| format!("invalid duration {value}: {e}"))
}

impl Cli {
    fn download_config(&self) -> DownloadConfig {
        let defaults = DownloadConfig::default();
        defaults
            .clone()
            .with_url(&self.download_url)
            .with_max_duration(self.max_duration.unwrap_or(defaults.max_duration))
            .with_connect_timeout(self.connect_timeout.unwrap_or(defaults.connect_timeout))
            .with_read_timeout(self.read_timeout.unwrap_or(defaults.read_timeout))
            .with_deadline(self.deadline)
    }

    fn upload_config(&self) -> UploadConfig {
        let defaults = UploadConfig::default();
        defaults
            .clone()
            .with_url(&self.upload_url)
            .with_payload_size(self.payload_size)
            .with_connect_timeout(self.connect_timeout.unwrap_or(defaults.connect_timeout))
            .with_read_timeout(self.read_timeout.unwrap_or(defaults.read_timeout))
            .with_deadline(self.deadline)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let download = cli.download_config();
    let upload = cli.upload_config();

    let mut emitter: Box<dyn Emitter> = match cli.format {
        Format::Human => Box::new(HumanReadableEmitter::new(std::io::stdout())),
        Format::Json => Box::new(JsonEmitter::new(std::io::stdout())),
    };

    let checker = SpeedChecker::with_configs(download, upload);
    checker.run(emitter.as_mut()).await?;

    Ok(())
}
