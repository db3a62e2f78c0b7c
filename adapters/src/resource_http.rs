//! HTTP implementation of the `ResourceClient` trait.
//!
//! Resolves request paths against the configured base URL, forwards the
//! request headers (including any credential the session layer attached)
//! and decodes JSON bodies. An empty body decodes as `null`.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{ApiRequest, ApiResponse, HttpConnection, API_KEY_HEADER};
use crate::ResourceClient;

pub struct HttpResourceClient {
    client: reqwest::Client,
    connection: HttpConnection,
}

impl HttpResourceClient {
    pub fn new(connection: HttpConnection) -> AdapterResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(connection.timeout)
            .build()
            .map_err(|err| AdapterError::Network(format!("Cannot build HTTP client: {err}")))?;

        Ok(Self { client, connection })
    }
}

fn decode_body(bytes: &[u8]) -> AdapterResult<Value> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|err| AdapterError::Decode(err.to_string()))
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn send(&self, request: ApiRequest) -> AdapterResult<ApiResponse> {
        let url = self.connection.url_for(&request.path);
        let mut builder = self.client.request(request.method.into(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(api_key) = &self.connection.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(
            method = ?request.method,
            path = %request.path,
            status = status.as_u16(),
            "resource response"
        );

        if status == StatusCode::NOT_FOUND {
            return Err(AdapterError::NotFound(request.path));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdapterError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(ApiResponse::new(status.as_u16(), decode_body(&bytes)?))
    }
}
