//! Attaches the session's bearer credential to outgoing resource requests.

use showcase_adapters::{ApiRequest, AUTHORIZATION_HEADER};

use super::models::Session;

/// Returns `request` with `Authorization: Bearer <token>` when the session
/// holds an access token, and unchanged otherwise.
pub fn attach_credential(session: &Session, request: ApiRequest) -> ApiRequest {
    match session.access_token() {
        Some(token) if !token.is_empty() => {
            request.with_header(AUTHORIZATION_HEADER, format!("Bearer {token}"))
        }
        _ => request,
    }
}
