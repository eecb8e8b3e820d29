use clap::Parser;
use insight_balances::config::{
    DEFAULT_API_URL, DEFAULT_CONFIG_PATH, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS,
};
use insight_balances::utils::logging::{self, LogLevel};
use insight_balances::{scan, Settings};
use std::path::PathBuf;
use std::time::Duration;

/// Report the balances of the addresses listed in a YAML file, plus their total
#[derive(Debug, Parser)]
#[command(name = "insight-balances", version, about)]
struct Cli {
    /// Address file: a YAML list of `{label, addr}` entries
    #[arg(short = 'f', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Maximum number of lookups in flight
    #[arg(short = 'c', long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    concurrency: usize,

    /// Insight API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            config_path: self.config,
            max_concurrency: self.concurrency,
            api_url: self.api_url,
            request_timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::set_level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn });

    let settings = cli.into_settings();

    scan(&settings, std::io::stdout()).await?;
    Ok(())
}
