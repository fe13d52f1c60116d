//! CLI argument parsing for resqui.

use camino::Utf8PathBuf;
use clap::Parser;
use resqui_api::ClientConfig;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "resqui")]
#[command(about = "Terminal dashboard for Resque queues, failed jobs and workers")]
#[command(version)]
pub struct Args {
    /// Base URL of the dashboard backend; `/api/...` is resolved under it
    #[arg(long, env = "RESQUI_BASE_URL", default_value = "http://127.0.0.1:8080")]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "15")]
    pub timeout: u64,

    /// Re-fetch the visible listing every N seconds (0 disables)
    #[arg(long, default_value = "0")]
    pub refresh_interval: u64,

    /// Color theme (dark or light)
    #[arg(long, default_value = "dark", value_parser = ["dark", "light"])]
    pub theme: String,

    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long)]
    pub log_file: Option<Utf8PathBuf>,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(Duration::from_secs(self.timeout))
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval > 0).then(|| Duration::from_secs(self.refresh_interval))
    }
}
