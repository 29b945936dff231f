//! `reqwest`-backed transport.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use tracing::debug;

use super::{Reply, Transport};
use crate::config::{HttpTimeouts, normalize_base_url};
use crate::error::ClientError;

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the client fails to build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Reply, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        into_reply(response).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<Reply, ClientError> {
        let empty = Value::Object(Map::new());
        let response = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .json(body.unwrap_or(&empty))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        into_reply(response).await
    }
}

async fn into_reply(response: reqwest::Response) -> Result<Reply, ClientError> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    debug!(status, %url, bytes = body.len(), "response received");
    Ok(Reply { status, body, url })
}
