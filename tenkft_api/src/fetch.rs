//! Request execution with bounded, fixed-backoff retry.
//!
//! One [`RequestSpec`] describes a logical call. [`Fetcher::execute`] sends it,
//! drains the response body, and re-sends the same spec while the response is
//! not a success and retry budget remains. Transport failures (no response at
//! all) are returned immediately and never retried.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::RetryPolicy;
use crate::Error;

/// Request timeout for a single attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TOO_MANY_REQUESTS: u16 = 429;

/// Everything needed to issue one logical request, possibly several times.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    /// Sent unchanged on every attempt.
    pub body: Option<String>,
    /// Overlaid on the default JSON content type; a caller value wins on collision.
    pub headers: BTreeMap<String, String>,
    /// Re-attempts allowed after the first response. 0 means a single attempt.
    pub max_retries: u32,
}

impl RequestSpec {
    /// Creates a spec with no body, no extra headers and no retries.
    pub fn new(method: Method, url: &str) -> Result<Self, Error> {
        if url.trim().is_empty() {
            return Err(Error::Config("URL cannot be empty".to_string()));
        }
        let url = Url::parse(url)
            .map_err(|e| Error::Config(format!("invalid URL {:?}: {}", url, e)))?;
        Ok(Self {
            method,
            url,
            body: None,
            headers: BTreeMap::new(),
            max_retries: 0,
        })
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn header_map(&self) -> Result<HeaderMap, Error> {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::Config(format!("invalid header name {:?}: {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Config(format!("invalid value for header {:?}: {}", key, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// A fully drained HTTP response.
#[derive(Clone, Debug)]
pub struct ResponseOutcome {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| {
            tracing::error!(
                "Failed to parse response: {} | body: {}",
                e,
                truncate_body(&self.text())
            );
            Error::Decode(e)
        })
    }
}

struct Attempt {
    outcome: ResponseOutcome,
    body_error: Option<reqwest::Error>,
}

/// Sends [`RequestSpec`]s, retrying non-success responses per a [`RetryPolicy`].
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e)
            })?;
        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executes `spec`, issuing at most `spec.max_retries + 1` requests.
    ///
    /// A 429 with budget left waits `rate_limit_backoff`; any other non-2xx
    /// with budget left waits `error_backoff`. Both draw from the same budget.
    /// Once the budget is spent, a non-2xx response becomes
    /// [`Error::HttpStatus`] carrying that last response.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseOutcome, Error> {
        let headers = spec.header_map()?;
        let mut retries_left = spec.max_retries;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            tracing::debug!("{} {} (attempt {})", spec.method, spec.url, attempt);
            let Attempt {
                outcome,
                body_error,
            } = self.send_once(spec, &headers).await?;

            if outcome.status == TOO_MANY_REQUESTS && retries_left > 0 {
                retries_left -= 1;
                self.back_off(spec, outcome.status, retries_left, self.policy.rate_limit_backoff)
                    .await;
                continue;
            }

            if !outcome.is_success() {
                if retries_left > 0 {
                    retries_left -= 1;
                    self.back_off(spec, outcome.status, retries_left, self.policy.error_backoff)
                        .await;
                    continue;
                }
                return Err(terminal_failure(spec, outcome, body_error));
            }

            if let Some(e) = body_error {
                tracing::error!("Failed to read response body: {}", e);
                return Err(Error::Transport(e));
            }
            return Ok(outcome);
        }
    }

    async fn send_once(&self, spec: &RequestSpec, headers: &HeaderMap) -> Result<Attempt, Error> {
        let mut request = self
            .client
            .request(spec.method.clone(), spec.url.clone())
            .headers(headers.clone());
        if let Some(body) = &spec.body {
            request = request.body(body.clone());
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", spec.method, spec.url, e);
            Error::Transport(e)
        })?;

        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let (body, body_error) = match resp.bytes().await {
            Ok(bytes) => (bytes.to_vec(), None),
            Err(e) => (Vec::new(), Some(e)),
        };

        Ok(Attempt {
            outcome: ResponseOutcome {
                status,
                headers,
                body,
            },
            body_error,
        })
    }

    async fn back_off(&self, spec: &RequestSpec, status: u16, retries_left: u32, delay: Duration) {
        tracing::warn!(
            "{} {} returned {}, retrying in {:.1}s ({} retries left)",
            spec.method,
            spec.url,
            status,
            delay.as_secs_f64(),
            retries_left
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn terminal_failure(
    spec: &RequestSpec,
    outcome: ResponseOutcome,
    body_error: Option<reqwest::Error>,
) -> Error {
    let body = match body_error {
        None => Some(outcome.text()),
        Some(e) => {
            tracing::error!("Failed to read error response body: {}", e);
            None
        }
    };
    tracing::error!(
        "{} {} failed with status {}: {}",
        spec.method,
        spec.url,
        outcome.status,
        body.as_deref().map(truncate_body).unwrap_or_default()
    );
    Error::HttpStatus {
        status: outcome.status,
        body,
        response: Box::new(outcome),
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
