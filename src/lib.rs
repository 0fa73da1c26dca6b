//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use crate::services::root;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/groups-draft", configure_draft_routes(state.clone()))
        .nest("/api/students", configure_student_routes(state.clone()))
        .with_state(state)
}

/// Configura le routes del workflow bozza → inviti → finalizzazione.
/// Tutti gli endpoint richiedono il bearer token dello studente.
fn configure_draft_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::auth::authentication_middleware;
    use crate::services::*;

    Router::new()
        .route("/draft", post(create_draft))
        .route(
            "/draft/{draft_id}",
            get(get_draft_detail).delete(cancel_draft),
        )
        .route("/draft/leader/{enrollment}", get(list_leader_drafts))
        .route("/invite", post(invite))
        .route("/respond", post(respond))
        .route("/confirm/{draft_id}", post(confirm))
        .route("/invitations/{enrollment}", get(list_invitations))
        .route("/status/{enrollment}", get(group_status))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes di consultazione dei gruppi finalizzati
fn configure_student_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::auth::authentication_middleware;
    use crate::services::*;

    Router::new()
        .route("/pbl/gp/{enrollment}", get(get_finalized_group))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
