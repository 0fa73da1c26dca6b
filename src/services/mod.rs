//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod draft;
pub mod finalize;
pub mod invitation;
pub mod status;

// Re-exports per facilitare l'import
pub use draft::{cancel_draft, create_draft, get_draft_detail, list_leader_drafts};
pub use finalize::confirm;
pub use invitation::{invite, list_invitations, respond};
pub use status::{get_finalized_group, group_status};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
