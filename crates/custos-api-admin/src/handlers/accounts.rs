//! Account-mutation handlers. Everything that changes an enabled-account
//! count goes through the quota gate; each successful mutation triggers a
//! license re-evaluation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use custos_core::{AccountId, TenantId};
use custos_directory::{deprovision_tenant, NewAccount};
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    AccountResponse, CreateAccountRequest, DeprovisionResponse, TenantUsageResponse,
};
use crate::state::AppState;

/// Re-run license enforcement after an account-count change.
///
/// Best-effort: the mutation has already been applied, so a failing
/// recomputation is logged rather than turned into a request failure.
async fn trigger_reevaluation(state: &AppState) {
    if let Err(e) = state.enforcement.re_evaluate().await {
        warn!(error = %e, "License re-evaluation after account change failed");
    }
}

/// POST /tenants/{tenant_id}/accounts
pub async fn create_account(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let tenant_id = TenantId::from_uuid(tenant_id);
    let record = state
        .gate
        .create_account(
            tenant_id,
            &NewAccount {
                username: request.username,
                display_name: request.display_name,
                enabled: request.enabled,
            },
        )
        .await?;

    trigger_reevaluation(&state).await;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// PUT /accounts/{account_id}/enable
pub async fn enable_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .gate
        .enable_account(AccountId::from_uuid(account_id))
        .await?;

    trigger_reevaluation(&state).await;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /accounts/{account_id}/disable
pub async fn disable_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .gate
        .disable_account(AccountId::from_uuid(account_id))
        .await?;

    trigger_reevaluation(&state).await;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /accounts/{account_id}
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .gate
        .delete_account(AccountId::from_uuid(account_id))
        .await?;

    trigger_reevaluation(&state).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /tenants/{tenant_id}/usage
pub async fn tenant_usage(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantUsageResponse>, ApiError> {
    let tenant_id = TenantId::from_uuid(tenant_id);
    let quota = state.store.get_tenant_quota(tenant_id).await?;
    let enabled_users = state.usage.tenant_enabled_count(tenant_id).await?;

    Ok(Json(TenantUsageResponse {
        tenant_id,
        enabled_users,
        max_enabled_users: quota.max_enabled_users,
    }))
}

/// DELETE /tenants/{tenant_id}
///
/// Removes the tenant's accounts best-effort, then the group record. A
/// partial failure is reported with 207-style detail in the body rather
/// than aborting at the first broken account.
pub async fn deprovision(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<(StatusCode, Json<DeprovisionResponse>), ApiError> {
    let tenant_id = TenantId::from_uuid(tenant_id);

    // Existence check up front so an unknown tenant is a clean 404.
    state.store.get_tenant(tenant_id).await?;

    let report = deprovision_tenant(state.store.as_ref(), tenant_id).await?;
    let status = if report.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    trigger_reevaluation(&state).await;
    Ok((
        status,
        Json(DeprovisionResponse::from_report(tenant_id, report)),
    ))
}
