//! DraftGroup entity - Proposta di gruppo in attesa di accettazioni

use super::enums::DraftStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct DraftGroup {
    pub draft_id: i32,
    pub leader_enrollment: String,
    pub team_name: String,
    pub status: DraftStatus,
    // campi di riporto opzionali dalla precedente problem statement
    pub previous_ps_id: Option<String>,
    pub previous_problem: Option<String>,
    pub created_at: DateTime<Utc>,
}
