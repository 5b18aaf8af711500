//! License upload and status handlers.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::error::ApiError;
use crate::models::{LicenseInfo, LicenseStatusResponse};
use crate::state::AppState;

/// POST /license
///
/// Body is the raw signed license document. Rejected with a stable message
/// when the envelope is malformed, unsigned, wrongly signed, or lapsed;
/// otherwise the blob is persisted and enforcement recomputed before the
/// response goes out.
pub async fn upload_license(
    State(state): State<AppState>,
    body: String,
) -> Result<(StatusCode, Json<LicenseInfo>), ApiError> {
    let license = state.enforcement.install(&body).await?;

    info!(customer_id = %license.customer_id, "License uploaded");
    Ok((
        StatusCode::OK,
        Json(LicenseInfo {
            customer_id: license.customer_id,
            total_clients: license.total_clients,
            total_users: license.total_users,
            total_units: license.total_units,
            valid_until: license.valid_until,
        }),
    ))
}

/// GET /license
pub async fn license_status(
    State(state): State<AppState>,
) -> Result<Json<LicenseStatusResponse>, ApiError> {
    let status = state.enforcement.status().await?;

    Ok(Json(LicenseStatusResponse {
        write_access: status.write_access,
        license: status.license.map(|license| LicenseInfo {
            customer_id: license.customer_id,
            total_clients: license.total_clients,
            total_users: license.total_users,
            total_units: license.total_units,
            valid_until: license.valid_until,
        }),
        usage: status.usage.into(),
    }))
}
