//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione e JWT
//! - Configurazione
//! - Gestione errori
//! - Policy di scadenza
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod deadline;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{Claims, authentication_middleware, decode_jwt, require_self};
pub use config::Config;
pub use deadline::DeadlinePolicy;
pub use error::AppError;
pub use state::AppState;
