pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod sources;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpFetcher;
pub use config::ScraperConfig;
pub use core::registry::{Coordinator, ScrapeResults, ScraperRegistry};
pub use domain::model::{MenuItem, ScrapedMenu, ScraperResult, SourceInfo};
pub use domain::ports::{PageFetcher, ScrapeContext, SourceAdapter};
pub use utils::error::{Result, ScrapeError};
