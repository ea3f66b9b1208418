//! The HTTP request command.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::Services;
use crate::core::config::HttpConfig;
use crate::core::errors::{HelloworldError, Result};
use crate::host::HostUi;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSummary {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpSummary {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests for the HTTP command.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url`. Non-2xx statuses are returned, not raised.
    async fn get(&self, url: &str) -> Result<HttpSummary>;
}

/// [`HttpFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpSummary> {
        let response = self.client.get(url).send().await.map_err(|e| {
            HelloworldError::Http {
                message: format!("request failed: {e}"),
                url: Some(url.to_string()),
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpSummary { status, body })
    }
}

/// First `max_chars` characters of `body`, with an ellipsis when cut.
pub fn preview(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// `helloworld.httpRequest`: GET the configured URL and report the outcome.
pub async fn http_request_command(ui: &dyn HostUi, services: &Services) -> Result<HttpSummary> {
    let config = &services.config().http;
    let summary = services.http().get(&config.url).await?;

    info!(url = %config.url, status = summary.status, bytes = summary.body.len(), "http request finished");
    ui.show_information_message(&format!(
        "HTTP {}: {}",
        summary.status,
        preview(&summary.body, config.preview_chars)
    ))
    .await;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::config::HelloworldConfig;
    use crate::host::RecordingUi;

    struct CannedFetcher(u16, &'static str);

    #[async_trait]
    impl HttpFetcher for CannedFetcher {
        async fn get(&self, _url: &str) -> Result<HttpSummary> {
            Ok(HttpSummary {
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl HttpFetcher for FailingFetcher {
        async fn get(&self, url: &str) -> Result<HttpSummary> {
            Err(HelloworldError::Http {
                message: "connection refused".into(),
                url: Some(url.to_string()),
            })
        }
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("  short  ", 10), "short");
        assert_eq!(preview("héllo wörld", 5), "héllo...");
        assert_eq!(preview("exact", 5), "exact");
    }

    #[tokio::test]
    async fn reports_status_and_preview() {
        let mut config = HelloworldConfig::default();
        config.http.preview_chars = 4;
        let services = Services::new(config)
            .unwrap()
            .with_http(Arc::new(CannedFetcher(200, "{\"id\":1}")));
        let ui = RecordingUi::new();

        let summary = http_request_command(&ui, &services).await.unwrap();
        assert!(summary.is_success());
        assert_eq!(ui.information_messages(), vec!["HTTP 200: {\"id...".to_string()]);
    }

    #[tokio::test]
    async fn non_success_status_is_not_an_error() {
        let services = Services::new(HelloworldConfig::default())
            .unwrap()
            .with_http(Arc::new(CannedFetcher(404, "not found")));
        let ui = RecordingUi::new();

        let summary = http_request_command(&ui, &services).await.unwrap();
        assert_eq!(summary.status, 404);
        assert_eq!(ui.information_messages(), vec!["HTTP 404: not found".to_string()]);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let services = Services::new(HelloworldConfig::default())
            .unwrap()
            .with_http(Arc::new(FailingFetcher));
        let ui = RecordingUi::new();

        let err = http_request_command(&ui, &services).await.unwrap_err();
        assert!(matches!(err, HelloworldError::Http { .. }));
        assert!(ui.information_messages().is_empty());
    }
}
