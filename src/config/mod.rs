pub mod toml_config;

pub use toml_config::{HeuristicsConfig, HttpConfig, ScraperConfig, SourceSettings};

#[cfg(feature = "cli")]
use crate::adapters::output::OutputFormat;
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lunch-scraper")]
#[command(about = "Scrapes today's lunch menus from Gothenburg restaurant websites")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only scrape these sources (repeatable)
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// List registered sources and exit
    #[arg(long)]
    pub list: bool,

    /// Output format: text, json or csv
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Pick the weekday from this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Route requests through this URL prefix
    #[arg(long, conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Ignore any proxy set in the configuration file
    #[arg(long)]
    pub no_proxy: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of sources fetched at the same time
    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用命令列覆蓋設定
    pub fn apply_to(&self, config: &mut ScraperConfig) {
        if let Some(date) = self.date {
            config.target_date = Some(date);
        }
        if self.no_proxy {
            config.http.proxy = None;
        } else if let Some(proxy) = &self.proxy {
            config.http.proxy = Some(proxy.clone());
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = timeout;
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.http.concurrent_requests = concurrent;
        }
    }
}
