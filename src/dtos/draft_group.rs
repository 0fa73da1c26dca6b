//! Draft group DTOs - Data Transfer Objects per le bozze di gruppo

use crate::dtos::invitation::{InviteItemErrorDTO, InvitationWithStudentDTO};
use crate::entities::{DraftGroup, DraftStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body per POST /api/groups-draft/draft.
/// La lista inviti opzionale viene creata nella stessa transazione della
/// bozza: se tutti gli inviti falliscono la validazione, la creazione
/// viene annullata per intero.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateDraftGroupDTO {
    #[validate(length(min = 1, message = "team_name must not be empty"))]
    pub team_name: String,
    pub previous_ps_id: Option<String>,
    pub previous_problem: Option<String>,
    pub invitations: Option<Vec<String>>,
}

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DraftGroupDTO {
    pub draft_id: i32,
    pub leader_enrollment: String,
    pub team_name: String,
    pub status: DraftStatus,
    pub previous_ps_id: Option<String>,
    pub previous_problem: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DraftGroup> for DraftGroupDTO {
    fn from(value: DraftGroup) -> Self {
        Self {
            draft_id: value.draft_id,
            leader_enrollment: value.leader_enrollment,
            team_name: value.team_name,
            status: value.status,
            previous_ps_id: value.previous_ps_id,
            previous_problem: value.previous_problem,
            created_at: value.created_at,
        }
    }
}

/// Dettaglio bozza: la bozza con i suoi inviti (e i nomi degli invitati)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DraftGroupDetailDTO {
    #[serde(flatten)]
    pub draft: DraftGroupDTO,
    pub invitations: Vec<InvitationWithStudentDTO>,
}

/// Risposta di create_draft: l'id della bozza più l'esito per-invito
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateDraftResponseDTO {
    pub group_id: i32,
    pub invited: Vec<String>,
    pub errors: Vec<InviteItemErrorDTO>,
}

/// Dati repo-facing per l'inserimento di una nuova bozza
#[derive(Debug, Clone)]
pub struct NewDraftGroup {
    pub leader_enrollment: String,
    pub team_name: String,
    pub previous_ps_id: Option<String>,
    pub previous_problem: Option<String>,
}
