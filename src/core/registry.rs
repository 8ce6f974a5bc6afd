use crate::core::weekday::{resolve, DayResolution, MenuDay};
use crate::domain::model::{ScraperResult, SourceInfo};
use crate::domain::ports::{PageFetcher, ScrapeContext, SourceAdapter};
use crate::utils::error::{Result, ScrapeError};
use chrono::{Local, NaiveDate};
use serde::ser::{Serialize, Serializer};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Source adapters in registration order. Built once, then only read.
#[derive(Default)]
pub struct ScraperRegistry {
    adapters: Vec<Arc<dyn SourceAdapter>>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<A: SourceAdapter + 'static>(&mut self, adapter: A) -> Result<()> {
        self.register_arc(Arc::new(adapter))
    }

    pub fn register_arc(&mut self, adapter: Arc<dyn SourceAdapter>) -> Result<()> {
        let id = &adapter.info().id;
        if self.get(id).is_some() {
            return Err(ScrapeError::config(format!(
                "source '{}' is already registered",
                id
            )));
        }

        tracing::debug!(source = %id, "Registered source adapter");
        self.adapters.push(adapter);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn SourceAdapter>> {
        self.adapters.iter().find(|a| a.info().id == id)
    }

    pub fn sources(&self) -> Vec<SourceInfo> {
        self.adapters.iter().map(|a| a.info().clone()).collect()
    }

    pub fn adapters(&self) -> &[Arc<dyn SourceAdapter>] {
        &self.adapters
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// Results of `scrape_all`, keyed by source id in registration order.
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default)]
pub struct ScrapeResults(Vec<(String, ScraperResult)>);

impl ScrapeResults {
    pub fn get(&self, id: &str) -> Option<&ScraperResult> {
        self.0
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScraperResult)> {
        self.0.iter().map(|(id, result)| (id.as_str(), result))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.0.iter().filter(|(_, r)| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    fn push(&mut self, id: String, result: ScraperResult) {
        self.0.push((id, result));
    }
}

impl FromIterator<(String, ScraperResult)> for ScrapeResults {
    fn from_iter<I: IntoIterator<Item = (String, ScraperResult)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ScrapeResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, result)| (id, result)))
    }
}

/// Runs registered adapters and isolates their failures from each other.
pub struct Coordinator {
    registry: Arc<ScraperRegistry>,
    fetcher: Arc<dyn PageFetcher>,
    target_date: Option<NaiveDate>,
    concurrent_requests: usize,
}

impl Coordinator {
    pub fn new(registry: Arc<ScraperRegistry>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            registry,
            fetcher,
            target_date: None,
            concurrent_requests: 1,
        }
    }

    /// Pins the date used to pick the weekday instead of the local date.
    pub fn with_target_date(mut self, date: Option<NaiveDate>) -> Self {
        self.target_date = date;
        self
    }

    /// More than one runs the adapters on separate tasks.
    pub fn with_concurrent_requests(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    pub fn registry(&self) -> &ScraperRegistry {
        &self.registry
    }

    pub fn list_sources(&self) -> Vec<SourceInfo> {
        self.registry.sources()
    }

    pub fn target_day(&self) -> MenuDay {
        let date = self
            .target_date
            .unwrap_or_else(|| Local::now().date_naive());

        match resolve(date) {
            DayResolution::Open(day) => day,
            DayResolution::Closed => {
                tracing::info!("📅 {} is a weekend, showing Monday's menu as fallback", date);
                DayResolution::Closed.effective_day()
            }
        }
    }

    fn context(&self) -> ScrapeContext {
        ScrapeContext::new(Arc::clone(&self.fetcher), self.target_day())
    }

    #[tracing::instrument(skip(self))]
    pub async fn scrape_one(&self, id: &str) -> ScraperResult {
        match self.registry.get(id) {
            Some(adapter) => join_scrape(id, spawn_scrape(adapter, self.context(), None)).await,
            None => {
                let err = ScrapeError::NotFound { id: id.to_string() };
                tracing::warn!("❓ {}", err);
                ScraperResult::failure(err.to_string())
            }
        }
    }

    pub async fn scrape_all(&self) -> ScrapeResults {
        let ctx = self.context();
        tracing::info!(
            "🚀 Scraping {} sources for {}",
            self.registry.len(),
            ctx.day.label()
        );

        let results = if self.concurrent_requests > 1 {
            self.scrape_all_concurrent(ctx).await
        } else {
            let mut results = ScrapeResults::default();
            for adapter in self.registry.adapters() {
                let id = adapter.info().id.clone();
                let result = join_scrape(&id, spawn_scrape(adapter, ctx.clone(), None)).await;
                results.push(id, result);
            }
            results
        };

        tracing::info!(
            "✅ Scrape finished: {} succeeded, {} failed",
            results.success_count(),
            results.failure_count()
        );
        results
    }

    async fn scrape_all_concurrent(&self, ctx: ScrapeContext) -> ScrapeResults {
        let permits = Arc::new(Semaphore::new(self.concurrent_requests));

        let handles: Vec<_> = self
            .registry
            .adapters()
            .iter()
            .map(|adapter| {
                let handle = spawn_scrape(adapter, ctx.clone(), Some(Arc::clone(&permits)));
                (adapter.info().id.clone(), handle)
            })
            .collect();

        let mut results = ScrapeResults::default();
        for (id, handle) in handles {
            let result = join_scrape(&id, handle).await;
            results.push(id, result);
        }
        results
    }
}

/// Runs one adapter on its own task so that a panic inside it stays there.
fn spawn_scrape(
    adapter: &Arc<dyn SourceAdapter>,
    ctx: ScrapeContext,
    permits: Option<Arc<Semaphore>>,
) -> JoinHandle<ScraperResult> {
    let adapter = Arc::clone(adapter);
    tokio::spawn(async move {
        let _permit = match permits {
            Some(permits) => permits.acquire_owned().await.ok(),
            None => None,
        };
        adapter.scrape(&ctx).await
    })
}

async fn join_scrape(id: &str, handle: JoinHandle<ScraperResult>) -> ScraperResult {
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(source = %id, "❌ Scrape task aborted: {}", e);
            ScraperResult::failure(format!("scrape task for '{}' aborted: {}", id, e))
        }
    }
}
