//! Admin HTTP API for custos.
//!
//! Exposes the account-mutation surface (create, enable, disable, delete,
//! tenant deprovisioning) routed through the per-tenant quota gate, plus
//! license upload/status. Account mutations additionally pass the advisory
//! write-access middleware and trigger a license re-evaluation on success.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::write_access_middleware;
pub use router::admin_router;
pub use state::AppState;
