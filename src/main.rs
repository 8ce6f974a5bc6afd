use clap::Parser;
use lunch_scraper::adapters::output;
use lunch_scraper::sources::default_registry;
use lunch_scraper::utils::{logger, validation::Validate};
use lunch_scraper::{
    CliConfig, Coordinator, HttpFetcher, ScrapeError, ScrapeResults, ScraperConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lunch-scraper");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            tracing::error!("❌ lunch-scraper failed: {} (Kind: {:?})", e, e.kind());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

/// Exit code 0 when every source succeeded, 2 when at least one failed.
async fn run(cli: &CliConfig) -> Result<i32, ScrapeError> {
    // 載入配置
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            ScraperConfig::from_file(path)?
        }
        None => ScraperConfig::default(),
    };
    cli.apply_to(&mut config);

    // 驗證配置
    config.validate()?;

    let registry = Arc::new(default_registry(&config)?);

    if cli.list {
        for source in registry.sources() {
            println!(
                "{:<14} {:<14} {}",
                source.id, source.display_name, source.source_url
            );
        }
        return Ok(0);
    }

    let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
    if let Some(proxy) = &config.http.proxy {
        tracing::info!("🔀 Routing requests through {}", proxy);
    }

    let coordinator = Coordinator::new(registry, fetcher)
        .with_target_date(config.target_date)
        .with_concurrent_requests(config.http.concurrent_requests);

    let results = if cli.sources.is_empty() {
        coordinator.scrape_all().await
    } else {
        let mut collected = Vec::with_capacity(cli.sources.len());
        for id in &cli.sources {
            collected.push((id.clone(), coordinator.scrape_one(id).await));
        }
        collected.into_iter().collect::<ScrapeResults>()
    };

    let rendered = output::render(&results, &coordinator.list_sources(), cli.format)?;
    print!("{}", rendered);

    if results.failure_count() > 0 {
        tracing::warn!("⚠️  {} of {} sources failed", results.failure_count(), results.len());
        Ok(2)
    } else {
        Ok(0)
    }
}
