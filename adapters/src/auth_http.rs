//! HTTP implementation of the `AuthClient` trait.
//!
//! Posts the credential as JSON to `{base_url}/auth/login` and classifies the
//! answer into a [`LoginReply`]. The request timeout configured on the
//! connection bounds the whole exchange; nothing here retries.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{Credential, HttpConnection, LoginReply};
use crate::AuthClient;

const LOGIN_PATH: &str = "auth/login";

pub struct HttpAuthClient {
    client: reqwest::Client,
    login_url: String,
}

impl HttpAuthClient {
    pub fn new(connection: &HttpConnection) -> AdapterResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(connection.timeout)
            .build()
            .map_err(|err| AdapterError::Network(format!("Cannot build HTTP client: {err}")))?;

        Ok(Self {
            client,
            login_url: connection.url_for(LOGIN_PATH),
        })
    }
}

/// Statuses with which the backend refuses a credential.
fn is_rejection(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, credential: &Credential) -> AdapterResult<LoginReply> {
        debug!("sending login request");

        let response = self
            .client
            .post(&self.login_url)
            .json(credential)
            .send()
            .await?;

        let status = response.status();
        if is_rejection(status) {
            debug!(status = status.as_u16(), "login rejected");
            return Ok(LoginReply::Rejected);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "login request failed");
            return Err(AdapterError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(LoginReply::from_body(body))
    }
}
