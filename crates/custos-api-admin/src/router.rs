//! Route assembly for the admin API.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{accounts, events, license};
use crate::middleware::write_access_middleware;
use crate::state::AppState;

/// Account-mutating routes, gated by the write-access flag.
fn gated_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/tenants/{tenant_id}/accounts", post(accounts::create_account))
        .route("/accounts/{account_id}/enable", put(accounts::enable_account))
        .route(
            "/accounts/{account_id}/disable",
            put(accounts::disable_account),
        )
        .route("/accounts/{account_id}", delete(accounts::delete_account))
        .route("/tenants/{tenant_id}", delete(accounts::deprovision))
        .layer(middleware::from_fn_with_state(
            state,
            write_access_middleware,
        ))
}

/// Build the admin router.
///
/// License routes stay outside the write-access gate: uploading a license
/// is how an operator gets out of restricted mode.
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .merge(gated_routes(state.clone()))
        .route("/tenants/{tenant_id}/usage", get(accounts::tenant_usage))
        .route(
            "/license",
            post(license::upload_license).get(license::license_status),
        )
        .route("/events", post(events::ingest_event))
        .with_state(state)
}
