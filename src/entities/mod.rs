//! Entities module - Entità persistenti del dominio

pub mod draft_group;
pub mod enums;
pub mod finalized_group;
pub mod invitation;
pub mod student;

// Re-export per facilitare l'import
pub use draft_group::DraftGroup;
pub use enums::{DraftStatus, InvitationStatus};
pub use finalized_group::{FinalizedGroup, GroupMember};
pub use invitation::Invitation;
pub use student::Student;
