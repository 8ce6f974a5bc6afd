pub mod category;
pub mod lines;
pub mod registry;
pub mod weekday;

pub use crate::domain::model::{MenuItem, ScrapedMenu, ScraperResult, SourceInfo};
pub use crate::domain::ports::{PageFetcher, ScrapeContext, SourceAdapter};
pub use crate::utils::error::Result;
