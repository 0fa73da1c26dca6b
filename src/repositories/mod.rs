//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//!
//! Le query usano l'API runtime di sqlx (`query_as` + `bind`): il crate
//! compila anche senza un database raggiungibile, e i tipi enum Postgres
//! vengono mappati tramite `#[derive(sqlx::Type)]` sulle entities.

// ************************* MODULI REPOSITORY ************************* //

// Dichiarazione dei sotto-moduli
pub mod draft_group;
pub mod finalized_group;
pub mod invitation;
pub mod student;
pub mod traits;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use draft_group::DraftGroupRepository;
pub use finalized_group::{ConfirmError, FinalizedGroupRepository};
pub use invitation::InvitationRepository;
pub use student::StudentRepository;
