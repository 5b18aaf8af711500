//! Write-access middleware.
//!
//! Account-mutating routes consult the advisory write-access flag before
//! the handler runs. The read is not synchronized with the enforcement
//! recomputation; a request that slips through as the flag flips is
//! accepted behavior. License upload stays outside this gate so operators
//! can always install a fresh license.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects account-mutating requests while the system is restricted.
pub async fn write_access_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.enforcement.write_access().is_allowed() {
        return next.run(request).await;
    }

    warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "Request rejected: write access is disabled"
    );
    ApiError::Restricted.into_response()
}
