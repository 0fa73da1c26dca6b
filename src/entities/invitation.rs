//! Invitation entity - Invito di un leader a uno studente per una bozza

use super::enums::InvitationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Invitation {
    pub request_id: i32,
    pub draft_id: i32,     // bozza a cui si viene invitati
    pub enrollment_no: String, // studente invitato
    pub status: InvitationStatus,
    pub invited_at: DateTime<Utc>,
}
