//! Generic data models for the `adapters` crate.
//!
//! These models define the wire shapes exchanged with the auth and resource
//! backends (user profiles, login payloads, transport-neutral requests and
//! responses), so the session layer never handles untyped JSON directly.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AdapterError, AdapterResult};

/// Header carrying the bearer credential.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Header carrying the optional static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const REDACTED: &str = "<redacted>";

/// Identity information for the logged-in user, as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Username and password for a single login exchange.
///
/// Deliberately not `Clone` and never written to persisted state.
#[derive(Serialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Complete payload of a successful login.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

impl fmt::Debug for LoginSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginSuccess")
            .field("token", &REDACTED)
            .field("refresh_token", &REDACTED)
            .field("user", &self.user)
            .finish()
    }
}

/// Every shape a login exchange can come back in once the transport succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReply {
    Success(LoginSuccess),
    /// The backend refused the credential.
    Rejected,
    /// The backend answered with a success status but an incomplete payload.
    Malformed { field: &'static str },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLoginBody {
    token: Option<String>,
    refresh_token: Option<String>,
    user: Option<Value>,
}

impl LoginReply {
    /// Classifies the JSON body of a successful login response.
    ///
    /// Empty tokens count as missing; a `user` that does not parse as a
    /// [`UserProfile`] is reported as a malformed `user` field.
    pub fn from_body(body: Value) -> Self {
        let raw: RawLoginBody = match serde_json::from_value(body) {
            Ok(raw) => raw,
            Err(_) => return LoginReply::Malformed { field: "body" },
        };

        let Some(token) = raw.token.filter(|t| !t.is_empty()) else {
            return LoginReply::Malformed { field: "token" };
        };
        let Some(refresh_token) = raw.refresh_token.filter(|t| !t.is_empty()) else {
            return LoginReply::Malformed { field: "refreshToken" };
        };
        let Some(user) = raw
            .user
            .and_then(|user| serde_json::from_value::<UserProfile>(user).ok())
        else {
            return LoginReply::Malformed { field: "user" };
        };

        LoginReply::Success(LoginSuccess {
            token,
            refresh_token,
            user,
        })
    }
}

/// Where and how the HTTP adapters reach the backend.
#[derive(Debug, Clone)]
pub struct HttpConnection {
    pub base_url: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl HttpConnection {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Joins `path` onto the base URL with exactly one separating slash.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A CRUD request against the resource backend, before it hits the wire.
///
/// Header names are stored lowercased; lookups are case-insensitive.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> AdapterResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| AdapterError::InvalidRequest(err.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let shown = if name == AUTHORIZATION_HEADER || name == API_KEY_HEADER {
                    REDACTED
                } else {
                    value.as_str()
                };
                (name.as_str(), shown)
            })
            .collect();

        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &headers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// A decoded response from the resource backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(self) -> AdapterResult<T> {
        serde_json::from_value(self.body).map_err(|err| AdapterError::Decode(err.to_string()))
    }
}
