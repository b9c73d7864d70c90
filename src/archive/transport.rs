//! The HTTP seam between the fetch pipeline and the archive.
//!
//! The pipeline only needs "send this query with this timeout and give me
//! the status and body back". [`ArchiveTransport`] captures exactly that, so
//! the retry loop can run against [`HttpTransport`] in production and against
//! a scripted transport in tests.

use crate::archive::error::BoxError;
use crate::archive::request::ArchiveRequest;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Status and body of one archive response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReply {
    pub status: StatusCode,
    pub body: String,
}

/// A request that never produced a complete response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request exceeded its timeout")]
    Timeout,

    #[error(transparent)]
    Network(BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(Box::new(error))
        }
    }
}

#[async_trait]
pub trait ArchiveTransport: Send + Sync {
    /// Performs one GET for `request`, giving up after `timeout`.
    async fn get(
        &self,
        request: &ArchiveRequest,
        timeout: Duration,
    ) -> Result<ArchiveReply, TransportError>;
}

/// [`ArchiveTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArchiveTransport for HttpTransport {
    async fn get(
        &self,
        request: &ArchiveRequest,
        timeout: Duration,
    ) -> Result<ArchiveReply, TransportError> {
        debug!(
            "GET {} ({}, {}) with {}s timeout",
            request.endpoint(),
            request.param("latitude").unwrap_or_default(),
            request.param("longitude").unwrap_or_default(),
            timeout.as_secs()
        );
        let response = self
            .client
            .get(request.endpoint())
            .query(request.query())
            .timeout(timeout)
            .send()
            .await?;
        let status = response.status();
        // The body still counts against the per-request timeout.
        let body = response.text().await?;
        Ok(ArchiveReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::error::Classification;
    use crate::archive::fetcher::{DailyFetcher, FetchOutcome};
    use crate::archive::retry::{RetryPolicy, RetryTier};
    use crate::archive::settings::FetchSettings;
    use crate::testing::{daily_body, test_location, test_range};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::time::Instant;

    const TIER_TIMEOUT: Duration = Duration::from_millis(300);

    enum Server {
        Reply { status: &'static str, body: String },
        Hang,
    }

    /// Serves every connection on a loopback port the same way and records
    /// the request lines. Returns the archive endpoint on that port.
    async fn serve(
        server: Server,
    ) -> Result<(String, Arc<Mutex<Vec<String>>>), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}/v1/archive", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let server = Arc::new(server);

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let seen = Arc::clone(&seen);
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 4096];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&head);
                    seen.lock()
                        .unwrap()
                        .push(head.lines().next().unwrap_or_default().to_string());

                    match server.as_ref() {
                        Server::Reply { status, body } => {
                            let response = format!(
                                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                                body.len()
                            );
                            let _ = stream.write_all(response.as_bytes()).await;
                            let _ = stream.shutdown().await;
                        }
                        Server::Hang => {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                        }
                    }
                });
            }
        });

        Ok((endpoint, requests))
    }

    fn fetcher(endpoint: &str) -> Result<DailyFetcher<HttpTransport>, reqwest::Error> {
        let client = Client::builder().no_proxy().build()?;
        let settings = FetchSettings::builder()
            .endpoint(endpoint)
            .retry_policy(RetryPolicy::new(
                RetryTier::new(TIER_TIMEOUT, Duration::ZERO),
                [],
            ))
            .build();
        Ok(DailyFetcher::new(HttpTransport::with_client(client), settings))
    }

    fn failure_class(outcome: &FetchOutcome) -> Option<Classification> {
        match outcome {
            FetchOutcome::Failure(error) => Some(error.classification()),
            FetchOutcome::Success(_) => None,
        }
    }

    #[tokio::test]
    async fn test_http_success_sends_archive_query() -> Result<(), Box<dyn std::error::Error>> {
        let range = test_range();
        let (endpoint, requests) = serve(Server::Reply {
            status: "200 OK",
            body: daily_body(range.start, 3),
        })
        .await?;
        let fetcher = fetcher(&endpoint)?;
        let location = test_location("Istanbul", 41.0082, 28.9784);

        let outcome = fetcher.fetch_one(&location, &range).await;

        assert_eq!(outcome.records().map(<[_]>::len), Some(3));
        let requests = requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("GET /v1/archive?latitude=41.0082&longitude=28.9784&"));
        assert!(requests[0].contains("start_date=2023-08-28&end_date=2025-08-26"));
        Ok(())
    }

    #[tokio::test]
    async fn test_http_429_is_rate_limited() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, _) = serve(Server::Reply {
            status: "429 Too Many Requests",
            body: r#"{"error": true, "reason": "Too many concurrent requests"}"#.to_string(),
        })
        .await?;
        let fetcher = fetcher(&endpoint)?;

        let outcome = fetcher
            .fetch_one(&test_location("Ankara", 39.9334, 32.8597), &test_range())
            .await;

        assert_eq!(failure_class(&outcome), Some(Classification::RateLimited));
        Ok(())
    }

    #[tokio::test]
    async fn test_http_silent_server_times_out() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, _) = serve(Server::Hang).await?;
        let fetcher = fetcher(&endpoint)?;
        let started = Instant::now();

        let outcome = fetcher
            .fetch_one(&test_location("Izmir", 38.4237, 27.1428), &test_range())
            .await;

        assert_eq!(failure_class(&outcome), Some(Classification::Timeout));
        assert!(started.elapsed() >= TIER_TIMEOUT);
        assert!(started.elapsed() < Duration::from_secs(10));
        Ok(())
    }

    #[tokio::test]
    async fn test_http_blank_body_is_empty_response() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, _) = serve(Server::Reply {
            status: "200 OK",
            body: "  \n".to_string(),
        })
        .await?;
        let fetcher = fetcher(&endpoint)?;

        let outcome = fetcher
            .fetch_one(&test_location("Bursa", 40.1826, 29.0665), &test_range())
            .await;

        assert_eq!(failure_class(&outcome), Some(Classification::EmptyResponse));
        Ok(())
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() -> Result<(), Box<dyn std::error::Error>> {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}/v1/archive", listener.local_addr()?);
        drop(listener);
        let fetcher = fetcher(&endpoint)?;

        let outcome = fetcher
            .fetch_one(&test_location("Konya", 37.8746, 32.4932), &test_range())
            .await;

        assert_eq!(failure_class(&outcome), Some(Classification::NetworkError));
        Ok(())
    }
}
