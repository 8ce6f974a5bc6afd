use crate::config::HttpConfig;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches pages over HTTP, optionally through a CORS-relaxing proxy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    proxy: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            proxy: config.proxy.clone(),
        })
    }

    /// The URL actually requested for `url`.
    pub fn request_url(&self, url: &str) -> String {
        match &self.proxy {
            Some(proxy) => proxied_url(proxy, url),
            None => url.to_string(),
        }
    }
}

/// Appends the percent-encoded target to the proxy prefix.
pub fn proxied_url(proxy: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{}{}", proxy, encoded)
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let request_url = self.request_url(url);
        tracing::debug!("Making HTTP request to: {}", request_url);

        let response = self.client.get(&request_url).send().await?;
        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);

        if !status.is_success() {
            return Err(ScrapeError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        tracing::debug!(url, bytes = html.len(), "📥 Fetched page");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_proxied_url_encodes_target() {
        assert_eq!(
            proxied_url("https://corsproxy.io/?", "https://districtone.se/lunch.html"),
            "https://corsproxy.io/?https%3A%2F%2Fdistrictone.se%2Flunch.html"
        );
    }

    #[test]
    fn test_request_url_without_proxy() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        assert_eq!(fetcher.request_url("https://bistrot.se/"), "https://bistrot.se/");
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start_async().await;
        let page = server
            .mock_async(|when, then| {
                when.method(GET).path("/lunch.html");
                then.status(200)
                    .header("Content-Type", "text/html; charset=utf-8")
                    .body("<p>Måndag</p>");
            })
            .await;

        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        let html = fetcher.fetch(&server.url("/lunch.html")).await.unwrap();

        page.assert_async().await;
        assert_eq!(html, "<p>Måndag</p>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(503);
            })
            .await;

        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        let err = fetcher.fetch(&server.url("/")).await.unwrap_err();

        match err {
            ScrapeError::FetchStatus { status, .. } => assert_eq!(status, 503),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_through_proxy_prefix() {
        let server = MockServer::start_async().await;
        let proxy = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path_contains("/raw/")
                    .path_contains("bistrot.se");
                then.status(200).body("<html>proxied</html>");
            })
            .await;

        let config = HttpConfig {
            proxy: Some(server.url("/raw/")),
            ..HttpConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let html = fetcher.fetch("https://bistrot.se/").await.unwrap();

        proxy.assert_async().await;
        assert_eq!(html, "<html>proxied</html>");
    }
}
