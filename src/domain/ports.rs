use crate::core::weekday::{filter_for_day, MenuDay};
use crate::domain::model::{MenuItem, ScrapedMenu, ScraperResult, SourceInfo};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Retrieves the raw HTML of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Everything an adapter needs for one scrape call.
#[derive(Clone)]
pub struct ScrapeContext {
    pub fetcher: Arc<dyn PageFetcher>,
    pub day: MenuDay,
}

impl ScrapeContext {
    pub fn new(fetcher: Arc<dyn PageFetcher>, day: MenuDay) -> Self {
        Self { fetcher, day }
    }
}

/// One restaurant website: where its menu lives and how to read it.
///
/// Implementors provide `info` and `extract_week`; the provided `scrape`
/// turns any fetch or parse error into a failed [`ScraperResult`], so
/// nothing raised by an adapter reaches the coordinator.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn info(&self) -> &SourceInfo;

    /// Parses every menu item found on the page, for the whole week, each
    /// paired with the day it is served.
    fn extract_week(&self, html: &str) -> Result<Vec<(MenuDay, MenuItem)>>;

    async fn menu_for_day(&self, ctx: &ScrapeContext) -> Result<Vec<MenuItem>> {
        let html = ctx.fetcher.fetch(&self.info().source_url).await?;
        let week = self.extract_week(&html)?;
        let total = week.len();
        let today = filter_for_day(week, ctx.day);

        tracing::debug!(
            source = %self.info().id,
            day = ctx.day.label(),
            total,
            kept = today.len(),
            "Filtered weekly menu"
        );
        Ok(today)
    }

    async fn scrape(&self, ctx: &ScrapeContext) -> ScraperResult {
        let info = self.info();
        tracing::info!("🍽️  Scraping menu from {} at {}", info.display_name, info.source_url);

        match self.menu_for_day(ctx).await {
            Ok(items) => ScraperResult::Success(ScrapedMenu {
                source_id: info.id.clone(),
                items,
                retrieved_at: Utc::now(),
                source_url: info.source_url.clone(),
            }),
            Err(e) => {
                tracing::warn!(source = %info.id, kind = ?e.kind(), "❌ Scrape failed: {}", e);
                ScraperResult::failure(e.to_string())
            }
        }
    }
}
