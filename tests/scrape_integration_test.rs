use chrono::NaiveDate;
use httpmock::prelude::*;
use httpmock::Mock;
use lunch_scraper::config::HttpConfig;
use lunch_scraper::sources::{BistrotSource, DistrictOneSource, KooperativetSource};
use lunch_scraper::{Coordinator, HttpFetcher, MenuItem, ScraperRegistry, ScraperResult};
use std::sync::Arc;

const DISTRICT_ONE: &str = include_str!("fixtures/district_one.html");
const KOOPERATIVET: &str = include_str!("fixtures/kooperativet.html");
const BISTROT: &str = include_str!("fixtures/bistrot.html");

async fn serve<'a>(server: &'a MockServer, path: &str, status: u16, body: &str) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET).path(path);
            then.status(status)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(body);
        })
        .await
}

fn registry_for(server: &MockServer) -> ScraperRegistry {
    let mut registry = ScraperRegistry::new();
    registry
        .register(DistrictOneSource::new(server.url("/lunch.html")))
        .unwrap();
    registry
        .register(KooperativetSource::new(server.url("/kooperativet/")))
        .unwrap();
    registry
        .register(BistrotSource::new(server.url("/bistrot/")))
        .unwrap();
    registry
}

fn coordinator(server: &MockServer, date: NaiveDate) -> Coordinator {
    let fetcher = Arc::new(HttpFetcher::new(&HttpConfig::default()).unwrap());
    Coordinator::new(Arc::new(registry_for(server)), fetcher).with_target_date(Some(date))
}

fn names(result: &ScraperResult) -> Vec<&str> {
    result
        .menu()
        .expect("successful scrape")
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect()
}

fn items(result: &ScraperResult) -> &[MenuItem] {
    &result.menu().expect("successful scrape").items
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 13).unwrap()
}

#[tokio::test]
async fn test_scrape_all_for_a_weekday() {
    let server = MockServer::start_async().await;
    let district = serve(&server, "/lunch.html", 200, DISTRICT_ONE).await;
    let koop = serve(&server, "/kooperativet/", 200, KOOPERATIVET).await;
    let bistrot = serve(&server, "/bistrot/", 200, BISTROT).await;

    let results = coordinator(&server, tuesday()).scrape_all().await;

    district.assert_async().await;
    koop.assert_async().await;
    bistrot.assert_async().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.success_count(), 3);
    assert_eq!(
        results.ids().collect::<Vec<_>>(),
        vec!["district-one", "kooperativet", "bistrot"]
    );

    let district = results.get("district-one").unwrap();
    assert_eq!(names(district), vec!["Fisk - Tisdag", "Poke bowl - Tisdag"]);
    assert_eq!(
        items(district)[0].description.as_deref(),
        Some("Fish and chips med remouladsås och ärtpuré")
    );

    let koop = results.get("kooperativet").unwrap();
    assert_eq!(names(koop), vec!["THAI - Tisdag", "INDISK - Tisdag"]);
    assert_eq!(items(koop)[1].category.as_deref(), Some("INDISK"));

    let bistrot = results.get("bistrot").unwrap();
    assert_eq!(
        names(bistrot),
        vec![
            "Caesarsallad - Tisdag 13/5",
            "Veckans vegetariska - Tisdag 13/5",
            "Biff Rydberg - Tisdag 13/5",
        ]
    );
    let categories: Vec<_> = items(bistrot)
        .iter()
        .map(|i| i.category.as_deref().unwrap())
        .collect();
    assert_eq!(categories, vec!["Sallad", "Vegetarisk", "Kött"]);

    let menu = bistrot.menu().unwrap();
    assert_eq!(menu.source_id, "bistrot");
    assert_eq!(menu.source_url, server.url("/bistrot/"));
}

#[tokio::test]
async fn test_no_item_leaks_into_another_day() {
    let server = MockServer::start_async().await;
    serve(&server, "/lunch.html", 200, DISTRICT_ONE).await;
    serve(&server, "/kooperativet/", 200, KOOPERATIVET).await;
    serve(&server, "/bistrot/", 200, BISTROT).await;

    let labels = ["Måndag", "Tisdag", "Onsdag", "Torsdag", "Fredag"];
    for (offset, label) in labels.iter().enumerate() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 12 + offset as u32).unwrap();
        let results = coordinator(&server, date).scrape_all().await;

        for (id, result) in results.iter() {
            for item in items(result) {
                assert!(item.name.contains(label), "{}: {} on {}", id, item.name, label);
                for other in labels.iter().filter(|l| *l != label) {
                    assert!(!item.name.contains(other), "{}: {} leaked", id, item.name);
                }
            }
        }
    }
}

#[tokio::test]
async fn test_weekend_shows_mondays_menu() {
    let server = MockServer::start_async().await;
    serve(&server, "/lunch.html", 200, DISTRICT_ONE).await;
    serve(&server, "/kooperativet/", 200, KOOPERATIVET).await;
    serve(&server, "/bistrot/", 200, BISTROT).await;

    let saturday = NaiveDate::from_ymd_opt(2025, 5, 17).unwrap();
    let first = coordinator(&server, saturday).scrape_all().await;
    let second = coordinator(&server, saturday).scrape_all().await;

    assert_eq!(
        names(first.get("district-one").unwrap()),
        vec!["Fisk - Måndag", "Kött - Måndag", "Vegetarisk - Måndag"]
    );
    assert_eq!(
        names(first.get("kooperativet").unwrap()),
        vec!["KÖTT - Måndag", "FISK - Måndag", "VEGETARISKT - Måndag"]
    );
    assert_eq!(
        names(first.get("bistrot").unwrap()),
        vec![
            "Caesarsallad - Måndag 12/5",
            "Veckans vegetariska - Måndag 12/5",
            "Dagens fångst - Måndag 12/5",
        ]
    );

    for (id, result) in first.iter() {
        assert_eq!(items(result), items(second.get(id).unwrap()));
    }
}

#[tokio::test]
async fn test_failing_source_does_not_affect_others() {
    let server = MockServer::start_async().await;
    serve(&server, "/lunch.html", 200, DISTRICT_ONE).await;
    serve(&server, "/kooperativet/", 500, "Internal Server Error").await;
    serve(&server, "/bistrot/", 200, BISTROT).await;

    let results = coordinator(&server, tuesday()).scrape_all().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results.success_count(), 2);

    let failed = results.get("kooperativet").unwrap();
    assert!(failed.menu().is_none());
    assert!(failed.error().unwrap().contains("500"));

    assert_eq!(names(results.get("district-one").unwrap()).len(), 2);
    assert_eq!(names(results.get("bistrot").unwrap()).len(), 3);
}

#[tokio::test]
async fn test_unreachable_source_is_a_failed_result() {
    let server = MockServer::start_async().await;
    serve(&server, "/bistrot/", 200, BISTROT).await;

    let mut registry = ScraperRegistry::new();
    // nothing listens on port 9 (discard)
    registry
        .register(DistrictOneSource::new("http://127.0.0.1:9/lunch.html"))
        .unwrap();
    registry
        .register(BistrotSource::new(server.url("/bistrot/")))
        .unwrap();

    let fetcher = Arc::new(HttpFetcher::new(&HttpConfig::default()).unwrap());
    let results = Coordinator::new(Arc::new(registry), fetcher)
        .with_target_date(Some(tuesday()))
        .scrape_all()
        .await;

    assert!(!results.get("district-one").unwrap().is_success());
    assert!(!results.get("district-one").unwrap().error().unwrap().is_empty());
    assert!(results.get("bistrot").unwrap().is_success());
}

#[tokio::test]
async fn test_concurrent_scrape_matches_sequential() {
    let server = MockServer::start_async().await;
    serve(&server, "/lunch.html", 200, DISTRICT_ONE).await;
    serve(&server, "/kooperativet/", 200, KOOPERATIVET).await;
    serve(&server, "/bistrot/", 200, BISTROT).await;

    let sequential = coordinator(&server, tuesday()).scrape_all().await;
    let concurrent = coordinator(&server, tuesday())
        .with_concurrent_requests(3)
        .scrape_all()
        .await;

    assert_eq!(
        sequential.ids().collect::<Vec<_>>(),
        concurrent.ids().collect::<Vec<_>>()
    );
    for (id, result) in sequential.iter() {
        assert_eq!(items(result), items(concurrent.get(id).unwrap()));
    }
}

#[tokio::test]
async fn test_scrape_one() {
    let server = MockServer::start_async().await;
    let bistrot = serve(&server, "/bistrot/", 200, BISTROT).await;
    let coordinator = coordinator(&server, tuesday());

    let result = coordinator.scrape_one("bistrot").await;
    bistrot.assert_async().await;
    assert_eq!(names(&result).len(), 3);

    let missing = coordinator.scrape_one("unknown-id").await;
    assert!(!missing.is_success());
    assert!(missing.error().unwrap().contains("unknown-id"));
}

#[tokio::test]
async fn test_result_json_round_trip() {
    let server = MockServer::start_async().await;
    serve(&server, "/bistrot/", 200, BISTROT).await;

    let result = coordinator(&server, tuesday()).scrape_one("bistrot").await;
    let json = serde_json::to_string(&result).unwrap();
    let back: ScraperResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back, result);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["menu"]["sourceId"], "bistrot");
    assert_eq!(value["menu"]["items"][0]["name"], "Caesarsallad - Tisdag 13/5");
}
