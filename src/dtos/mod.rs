//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod draft_group;
pub mod group;
pub mod invitation;
pub mod status;
pub mod student;

// Re-exports per facilitare l'import
pub use draft_group::{
    CreateDraftGroupDTO, CreateDraftResponseDTO, DraftGroupDTO, DraftGroupDetailDTO, NewDraftGroup,
};
pub use group::{ConfirmResponseDTO, FinalizedGroupDTO, GroupMemberDTO};
pub use invitation::{
    EnrichedInvitationDTO, InvitationWithStudentDTO, InviteItemErrorDTO, InviteOutcomeDTO,
    InviteRequestDTO, NewInvitation, RespondRequestDTO,
};
pub use status::GroupStatusDTO;
pub use student::StudentDTO;
