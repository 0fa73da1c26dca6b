//! Status DTO - Risultato discriminato della riconciliazione lato server
//!
//! Il client non deve più fondere da solo gruppo finalizzato, bozze e
//! inviti: il server risponde con un unico stato tipizzato che codifica
//! la precedenza tra le viste.

use crate::dtos::{DraftGroupDetailDTO, EnrichedInvitationDTO, FinalizedGroupDTO};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GroupStatusDTO {
    /// Lo studente appartiene a un gruppo finalizzato: stato terminale
    Finalized { group: FinalizedGroupDTO },
    /// Bozze attive in cui lo studente è leader o invitato accettato
    Draft { drafts: Vec<DraftGroupDetailDTO> },
    /// Solo inviti pending da accettare o rifiutare
    Invited { invitations: Vec<EnrichedInvitationDTO> },
    /// Nessun gruppo: `can_create` riflette la scadenza globale
    Ungrouped { can_create: bool },
}
