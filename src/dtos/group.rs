//! Finalized group DTOs - Data Transfer Objects per i gruppi permanenti

use crate::entities::{FinalizedGroup, GroupMember};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GroupMemberDTO {
    pub enrollment_no: String,
    pub is_leader: bool,
}

impl From<GroupMember> for GroupMemberDTO {
    fn from(value: GroupMember) -> Self {
        Self {
            enrollment_no: value.enrollment_no,
            is_leader: value.is_leader,
        }
    }
}

/// Struct per gestire io col client: il gruppo con la sua membership.
/// `group_id` è il codice permanente, non la chiave interna.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FinalizedGroupDTO {
    pub group_id: String,
    pub leader_enrollment: String,
    pub team_name: String,
    pub mentor_code: Option<String>,
    pub members: Vec<GroupMemberDTO>,
    pub created_at: DateTime<Utc>,
}

impl FinalizedGroupDTO {
    pub fn from_parts(group: FinalizedGroup, members: Vec<GroupMember>) -> Self {
        Self {
            group_id: group.group_code,
            leader_enrollment: group.leader_enrollment,
            team_name: group.team_name,
            mentor_code: group.mentor_code,
            members: members.into_iter().map(GroupMemberDTO::from).collect(),
            created_at: group.created_at,
        }
    }
}

/// Risposta di confirm: il nuovo identificativo permanente
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConfirmResponseDTO {
    pub group_id: String,
}
