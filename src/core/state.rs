//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, la policy di scadenza e lo stato condiviso
//! necessario per gestire l'applicazione.

use crate::core::DeadlinePolicy;
use crate::repositories::{
    DraftGroupRepository, FinalizedGroupRepository, InvitationRepository, StudentRepository,
};
use sqlx::PgPool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per l'anagrafica studenti
    pub student: StudentRepository,

    /// Repository per le bozze di gruppo
    pub draft: DraftGroupRepository,

    /// Repository per gli inviti
    pub invitation: InvitationRepository,

    /// Repository per i gruppi finalizzati e i loro membri
    pub group: FinalizedGroupRepository,

    /// Secret key per la verifica dei token JWT
    pub jwt_secret: String,

    /// Scadenza globale di formazione gruppi, condivisa da tutti gli handler
    pub deadline: DeadlinePolicy,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni Postgres condiviso
    /// * `jwt_secret` - Chiave segreta per la verifica dei token JWT
    /// * `deadline` - Policy di scadenza per la formazione dei gruppi
    pub fn new(pool: PgPool, jwt_secret: String, deadline: DeadlinePolicy) -> Self {
        Self {
            student: StudentRepository::new(pool.clone()),
            draft: DraftGroupRepository::new(pool.clone()),
            invitation: InvitationRepository::new(pool.clone()),
            group: FinalizedGroupRepository::new(pool),
            jwt_secret,
            deadline,
        }
    }
}
