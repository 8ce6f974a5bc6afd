use anyhow::Result;
use httpmock::prelude::*;
use lunch_scraper::sources::default_registry;
use lunch_scraper::utils::validation::Validate;
use lunch_scraper::{Coordinator, HttpFetcher, ScraperConfig};
use std::sync::Arc;
use tempfile::TempDir;

const DISTRICT_ONE: &str = include_str!("fixtures/district_one.html");
const BISTROT: &str = include_str!("fixtures/bistrot.html");

/// 從 TOML 檔案建立完整的抓取流程
#[tokio::test]
async fn test_config_file_drives_registry_and_coordinator() -> Result<()> {
    let server = MockServer::start_async().await;
    let district = server
        .mock_async(|when, then| {
            when.method(GET).path("/lunch.html");
            then.status(200).body(DISTRICT_ONE);
        })
        .await;
    let bistrot = server
        .mock_async(|when, then| {
            when.method(GET).path("/bistrot/");
            then.status(200).body(BISTROT);
        })
        .await;

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("lunch.toml");
    let config_content = format!(
        r#"
target_date = "2025-05-16"

[http]
timeout_seconds = 5
concurrent_requests = 2

[sources.district-one]
url = "{}"

[sources.kooperativet]
enabled = false

[sources.bistrot]
url = "{}"
"#,
        server.url("/lunch.html"),
        server.url("/bistrot/")
    );
    tokio::fs::write(&config_path, config_content).await?;

    let config = ScraperConfig::from_file(&config_path)?;
    config.validate()?;

    let registry = default_registry(&config)?;
    assert_eq!(registry.len(), 2);

    let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
    let coordinator = Coordinator::new(Arc::new(registry), fetcher)
        .with_target_date(config.target_date)
        .with_concurrent_requests(config.http.concurrent_requests);

    let results = coordinator.scrape_all().await;
    district.assert_async().await;
    bistrot.assert_async().await;

    assert_eq!(results.ids().collect::<Vec<_>>(), vec!["district-one", "bistrot"]);

    let district_items = &results.get("district-one").unwrap().menu().unwrap().items;
    assert_eq!(district_items.len(), 1);
    assert_eq!(district_items[0].name, "Sallad - Fredag");
    assert_eq!(district_items[0].category.as_deref(), Some("Sallad"));

    // no Friday entry on the Bistrot page
    let bistrot_menu = results.get("bistrot").unwrap().menu().unwrap();
    assert!(bistrot_menu.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_invalid_config_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("broken.toml");
    tokio::fs::write(&config_path, "[http]\nproxy = \"not a url\"\n").await?;

    let config = ScraperConfig::from_file(&config_path)?;
    assert!(config.validate().is_err());

    let missing = ScraperConfig::from_file(temp_dir.path().join("missing.toml"));
    assert!(missing.is_err());

    Ok(())
}
