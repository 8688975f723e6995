use crate::server::error::ApiError;
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// Rejects requests without an `Authorization` header
///
/// Any non-empty value is accepted; the header's presence is the only check.
pub async fn require_authorization(request: Request, next: Next) -> Result<Response, ApiError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|value| !value.is_empty());

    if !authorized {
        tracing::debug!("Rejecting {} without Authorization header", request.uri());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
