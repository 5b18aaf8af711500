//! Inbound tenant lifecycle notifications.
//!
//! The queue transport is external; this endpoint is the delivery surface
//! it posts into. Payloads are decoded into the closed lifecycle enum and
//! applied against the identity store.

use axum::{body::Bytes, extract::State, http::StatusCode};
use custos_events::{TenantEventHandler, TenantLifecycleEvent};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /events
pub async fn ingest_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let event = TenantLifecycleEvent::decode(&body)?;

    let handler = TenantEventHandler::new(state.store.clone());
    handler.apply(event).await?;

    // Tenant lifecycle changes move the tenant count.
    if let Err(e) = state.enforcement.re_evaluate().await {
        warn!(error = %e, "License re-evaluation after lifecycle event failed");
    }
    Ok(StatusCode::NO_CONTENT)
}
