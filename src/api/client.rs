//! HTTP Client
//!
//! Thin wrapper over `reqwest` (browser fetch on wasm32) bound to the
//! backend origin. Failures are logged and handed back untouched; callers
//! decide what the user sees.

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use log::{debug, error};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{ApiError, Result};

/// Same set `encodeURIComponent` leaves alone
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single path segment
pub fn segment(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: AppConfig,
}

impl HttpClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.config.url(path));
        let body = self.execute("GET", path, request).await?;
        decode(&body)
    }

    /// Send a JSON body and return the raw response text
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<String> {
        let bytes = serde_json::to_vec(body)?;
        self.check_size(bytes.len())?;

        let label = method.to_string();
        let request = self
            .client
            .request(method, self.config.url(path))
            .query(query)
            .header(CONTENT_TYPE, "application/json")
            .body(bytes);
        self.execute(&label, path, request).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T> {
        let text = self.send_json(Method::POST, path, query, body).await?;
        decode(&text)
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        query: &[(&str, &str)],
        payload_len: usize,
        form: reqwest::multipart::Form,
    ) -> Result<String> {
        self.check_size(payload_len)?;
        let request = self
            .client
            .post(self.config.url(path))
            .query(query)
            .multipart(form);
        self.execute("POST", path, request).await
    }

    fn check_size(&self, size: usize) -> Result<()> {
        let limit = self.config.max_body_bytes;
        if size > limit {
            return Err(ApiError::PayloadTooLarge { size, limit });
        }
        Ok(())
    }

    /// Response interceptor: log, then pass the error through unchanged
    async fn execute(&self, method: &str, path: &str, request: RequestBuilder) -> Result<String> {
        debug!("[HTTP] {method} {path}");
        let result = self.dispatch(request).await;
        if let Err(e) = &result {
            if matches!(e, ApiError::Timeout(_)) {
                error!("[HTTP] {method} {path}: request timeout");
            }
            error!("[HTTP] {method} {path} failed: {e}");
        }
        result
    }

    async fn dispatch(&self, request: RequestBuilder) -> Result<String> {
        let request = with_credentials(request);
        let limit = self.config.max_body_bytes;
        let timeout = self.config.request_timeout;

        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            if body.len() > limit {
                return Err(ApiError::PayloadTooLarge { size: body.len(), limit });
            }
            if !status.is_success() {
                return Err(ApiError::from_status(status.as_u16(), &body));
            }
            Ok(body)
        };

        with_timeout(exchange, timeout)
            .await
            .unwrap_or(Err(ApiError::Timeout(timeout.as_secs())))
    }
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        error!("Failed to deserialize response: {e}");
        ApiError::Decode(e)
    })
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}

/// `None` if the timer wins; the losing fetch is dropped, which aborts it
async fn with_timeout<F: Future>(work: F, timeout: Duration) -> Option<F::Output> {
    let timer = gloo_timers::future::sleep(timeout);
    futures::pin_mut!(work);
    futures::pin_mut!(timer);
    match future::select(work, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}
