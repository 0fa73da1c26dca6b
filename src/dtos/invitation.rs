//! Invitation DTOs - Data Transfer Objects per gli inviti

use crate::dtos::StudentDTO;
use crate::entities::InvitationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invito arricchito con il nome dell'invitato, per il dettaglio bozza
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvitationWithStudentDTO {
    pub request_id: i32,
    pub enrollment_no: String,
    pub student_name: Option<String>,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
}

/// Invito arricchito con bozza e leader, per la lista inviti dell'invitato
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EnrichedInvitationDTO {
    pub request_id: i32,
    pub draft_id: i32,
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
    pub team_name: Option<String>,
    pub leader: Option<StudentDTO>,
}

/// Body per POST /api/groups-draft/invite
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct InviteRequestDTO {
    pub draft_id: i32,
    #[validate(length(min = 1, message = "enrollments must not be empty"))]
    pub enrollments: Vec<String>,
}

/// Errore per-invitato nella risposta di invite (successo parziale)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InviteItemErrorDTO {
    pub enrollment: String,
    pub error: String,
}

/// Risposta di invite: gli invitati inseriti e gli errori per-item
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct InviteOutcomeDTO {
    pub invited: Vec<String>,
    pub errors: Vec<InviteItemErrorDTO>,
}

/// Body per POST /api/groups-draft/respond
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RespondRequestDTO {
    pub request_id: i32,
    pub status: InvitationStatus,
}

/// Dati repo-facing per l'inserimento di un nuovo invito
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub draft_id: i32,
    pub enrollment_no: String,
}
