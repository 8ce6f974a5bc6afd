//! The restaurants this crate knows how to read.

pub mod bistrot;
pub mod district_one;
pub mod kooperativet;

pub use bistrot::BistrotSource;
pub use district_one::DistrictOneSource;
pub use kooperativet::KooperativetSource;

use crate::config::ScraperConfig;
use crate::core::registry::ScraperRegistry;
use crate::utils::error::{Result, ScrapeError};

pub const KNOWN_IDS: [&str; 3] = [district_one::ID, kooperativet::ID, bistrot::ID];

/// Builds the registry of every enabled source, in a fixed order, with
/// the URL and threshold overrides from `config` applied.
pub fn default_registry(config: &ScraperConfig) -> Result<ScraperRegistry> {
    if let Some(unknown) = config
        .sources
        .keys()
        .find(|id| !KNOWN_IDS.contains(&id.as_str()))
    {
        return Err(ScrapeError::config(format!(
            "unknown source '{}' in [sources]; known sources: {}",
            unknown,
            KNOWN_IDS.join(", ")
        )));
    }

    // only bistrot reads headers with the heuristic rule
    for id in [district_one::ID, kooperativet::ID] {
        if let Some(settings) = config.source_settings(id) {
            if settings.max_header_len.is_some() || settings.max_header_words.is_some() {
                return Err(ScrapeError::config(format!(
                    "[sources.{}] does not support max_header_len or max_header_words; \
                     only min_description_len applies to this source",
                    id
                )));
            }
        }
    }

    let url_for = |id: &str, default: &str| {
        config
            .source_settings(id)
            .and_then(|s| s.url.clone())
            .unwrap_or_else(|| default.to_string())
    };
    let min_len_for = |id: &str| config.source_settings(id).and_then(|s| s.min_description_len);

    let mut registry = ScraperRegistry::new();

    if config.source_enabled(district_one::ID) {
        let mut source = DistrictOneSource::new(url_for(district_one::ID, district_one::URL));
        if let Some(len) = min_len_for(district_one::ID) {
            source = source.with_min_dish_len(len);
        }
        registry.register(source)?;
    }

    if config.source_enabled(kooperativet::ID) {
        let mut source = KooperativetSource::new(url_for(kooperativet::ID, kooperativet::URL));
        if let Some(len) = min_len_for(kooperativet::ID) {
            source = source.with_min_dish_len(len);
        }
        registry.register(source)?;
    }

    if config.source_enabled(bistrot::ID) {
        let source = BistrotSource::new(url_for(bistrot::ID, bistrot::URL))
            .with_heuristics(&config.heuristics_for(bistrot::ID));
        registry.register(source)?;
    }

    tracing::debug!(sources = registry.len(), "Source registry ready");
    Ok(registry)
}
