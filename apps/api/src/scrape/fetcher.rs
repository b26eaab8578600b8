//! Page Fetcher: downloads a job posting while looking like a desktop browser.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

/// Marker that prefixes every fetch failure reported to API callers.
pub const ERROR_MARKER: &str = "Error:";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const REFERER: &str = "https://www.google.com/";
const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// Largest decoded page body accepted by default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{status} for url: {url}")]
    Status { status: StatusCode, url: String },

    #[error("blocked by anti-bot protection ({status}) for url: {url}")]
    Blocked { status: StatusCode, url: String },

    #[error("page body exceeds {limit} bytes for url: {url}")]
    TooLarge { limit: usize, url: String },
}

impl FetchError {
    /// Message in the wire format: the error marker followed by the cause.
    pub fn to_marked_message(&self) -> String {
        format!("{ERROR_MARKER} {self}")
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the raw page body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpPageFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Reads the decoded body chunk by chunk, giving up once it passes the limit.
    async fn read_body(&self, mut response: Response, url: &str) -> Result<String, FetchError> {
        let too_large = || FetchError::TooLarge {
            limit: self.max_body_bytes,
            url: url.to_string(),
        };

        // Content-Length describes the encoded body; only trust it for plain responses.
        let encoded = response.headers().contains_key(header::CONTENT_ENCODING);
        if !encoded
            && response
                .content_length()
                .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::REFERER, HeaderValue::from_static(REFERER));
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(ACCEPT_ENCODING),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Cloudflare answers challenged requests with 403/429/503 and either a
/// `cf-mitigated` header or its own `server` header.
fn is_bot_challenge(response: &Response) -> bool {
    let challenged_status = matches!(
        response.status(),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    );
    let headers = response.headers();
    let cloudflare = headers.contains_key("cf-mitigated")
        || headers
            .get(header::SERVER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|server| server.eq_ignore_ascii_case("cloudflare"));

    challenged_status && cloudflare
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching job post: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if is_bot_challenge(&response) {
            warn!("Anti-bot challenge from {}: {}", url, status);
            return Err(FetchError::Blocked {
                status,
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = self.read_body(response, url).await?;
        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
