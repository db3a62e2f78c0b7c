//! Generic CRUD over any resource collection of the backend.

use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use showcase_adapters::{ApiRequest, ApiResponse, ResourceClient, AUTHORIZATION_HEADER};
use tracing::{debug, info, warn};

use super::{ServiceError, ServiceResult};
use crate::auth::SessionStore;

#[derive(Clone)]
pub struct ResourceService {
    client: Arc<dyn ResourceClient>,
    session: Arc<SessionStore>,
}

impl ResourceService {
    pub fn new(client: Arc<dyn ResourceClient>, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    async fn dispatch(&self, request: ApiRequest) -> ServiceResult<ApiResponse> {
        let request = self.session.attach_credential(request);
        debug!(
            method = ?request.method,
            path = %request.path,
            authenticated = request.header(AUTHORIZATION_HEADER).is_some(),
            "dispatching resource request"
        );
        let bearer = request
            .header(AUTHORIZATION_HEADER)
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);

        match self.client.send(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                let err = ServiceError::from(err);
                if let (ServiceError::Unauthorized(_), Some(token)) = (&err, bearer) {
                    self.drop_rejected_session(&token).await;
                }
                Err(err)
            }
        }
    }

    /// The backend refused the token we sent, so the session holding it is dead.
    async fn drop_rejected_session(&self, token: &str) {
        match self.session.invalidate(token).await {
            Ok(true) => info!("backend rejected the access token, session cleared"),
            Ok(false) => debug!("backend rejected a token that is no longer current"),
            Err(err) => warn!(error = %err, "cannot clear session after token rejection"),
        }
    }

    async fn dispatch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ServiceResult<T> {
        Ok(self.dispatch(request).await?.json()?)
    }

    fn with_body<B: Serialize>(request: ApiRequest, body: &B) -> ServiceResult<ApiRequest> {
        request
            .with_json(body)
            .map_err(|err| ServiceError::InvalidRequest(err.to_string()))
    }

    pub async fn list<T: DeserializeOwned>(&self, collection: &str) -> ServiceResult<Vec<T>> {
        self.dispatch_json(ApiRequest::get(collection)).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: impl Display,
    ) -> ServiceResult<T> {
        self.dispatch_json(ApiRequest::get(format!("{collection}/{id}")))
            .await
    }

    pub async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        body: &B,
    ) -> ServiceResult<T> {
        let request = Self::with_body(ApiRequest::post(collection), body)?;
        self.dispatch_json(request).await
    }

    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        id: impl Display,
        body: &B,
    ) -> ServiceResult<T> {
        let request = Self::with_body(ApiRequest::put(format!("{collection}/{id}")), body)?;
        self.dispatch_json(request).await
    }

    pub async fn delete(&self, collection: &str, id: impl Display) -> ServiceResult<()> {
        self.dispatch(ApiRequest::delete(format!("{collection}/{id}")))
            .await
            .map(|_| ())
    }

    /// `GET {collection}/search?q=<query>`; the query is sent as a parameter,
    /// never spliced into the path.
    pub async fn search<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &str,
    ) -> ServiceResult<Vec<T>> {
        let request = ApiRequest::get(format!("{collection}/search")).with_query("q", query);
        self.dispatch_json(request).await
    }

    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> ServiceResult<T> {
        self.dispatch_json(ApiRequest::get(endpoint)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ServiceResult<T> {
        let request = Self::with_body(ApiRequest::post(endpoint), body)?;
        self.dispatch_json(request).await
    }
}
