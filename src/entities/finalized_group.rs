//! FinalizedGroup entity - Gruppo permanente prodotto dalla finalizzazione

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct FinalizedGroup {
    pub group_id: i32,
    /// Identificativo permanente visibile agli utenti, schema distinto
    /// dagli id delle bozze (es. "PBL-G-17")
    pub group_code: String,
    pub leader_enrollment: String,
    pub team_name: String,
    pub mentor_code: Option<String>, // null finché il mentor non viene assegnato
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct GroupMember {
    pub group_id: i32,
    pub enrollment_no: String,
    pub is_leader: bool,
}
