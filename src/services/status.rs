//! Status services - Riconciliazione lato server dello stato gruppo
//!
//! La precedenza tra gruppo finalizzato, bozze e inviti era replicata in
//! più sequenze di fetch del frontend: qui è un'unica funzione pura sulle
//! tre famiglie di entità, esposta da un solo endpoint.

use crate::core::{AppError, AppState, require_self};
use crate::dtos::{
    DraftGroupDetailDTO, EnrichedInvitationDTO, FinalizedGroupDTO, GroupStatusDTO,
};
use crate::entities::Student;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::draft::draft_detail;
use super::invitation::enrich_invitations;

/// Funzione pura di riconciliazione: stessa precedenza per ogni consumer.
///
/// 1. gruppo finalizzato (terminale)
/// 2. bozze attive come leader o invitato accettato, deduplicate per
///    draft_id (le copie da leader vincono su quelle da membro)
/// 3. inviti pending
/// 4. nessun gruppo, con il flag di creazione legato alla scadenza
pub fn resolve_group_status(
    finalized: Option<FinalizedGroupDTO>,
    leader_drafts: Vec<DraftGroupDetailDTO>,
    accepted_drafts: Vec<DraftGroupDetailDTO>,
    pending: Vec<EnrichedInvitationDTO>,
    can_create: bool,
) -> GroupStatusDTO {
    if let Some(group) = finalized {
        return GroupStatusDTO::Finalized { group };
    }

    if !leader_drafts.is_empty() || !accepted_drafts.is_empty() {
        let mut drafts = leader_drafts;
        for candidate in accepted_drafts {
            if !drafts
                .iter()
                .any(|d| d.draft.draft_id == candidate.draft.draft_id)
            {
                drafts.push(candidate);
            }
        }
        return GroupStatusDTO::Draft { drafts };
    }

    if !pending.is_empty() {
        return GroupStatusDTO::Invited {
            invitations: pending,
        };
    }

    GroupStatusDTO::Ungrouped { can_create }
}

#[instrument(skip(state, current_student), fields(enrollment = %enrollment))]
pub async fn group_status(
    State(state): State<Arc<AppState>>,
    Path(enrollment): Path<String>,
    Extension(current_student): Extension<Student>,
) -> Result<Json<GroupStatusDTO>, AppError> {
    debug!("Resolving group status for student");
    // 1. Lo stato gruppo è personale: il chiamante deve coincidere col path
    // 2. Gruppo finalizzato? stato terminale, nessun'altra query serve
    // 3. Altrimenti raccogliere bozze da leader, bozze da invitato accettato
    //    e inviti pending, e risolvere con la funzione pura

    require_self(&current_student, &enrollment)?;

    if let Some(group) = state.group.find_by_member(&enrollment).await? {
        let members = state.group.members_of(&group.group_id).await?;
        info!("Student belongs to finalized group {}", group.group_code);
        return Ok(Json(resolve_group_status(
            Some(FinalizedGroupDTO::from_parts(group, members)),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            state.deadline.is_open(),
        )));
    }

    let leader_drafts = state.draft.find_active_by_leader(&enrollment).await?;
    let accepted_drafts = state
        .invitation
        .accepted_drafts_for_student(&enrollment)
        .await?;
    let pending = state.invitation.get_pending_for_student(&enrollment).await?;

    let leader_details =
        try_join_all(leader_drafts.into_iter().map(|d| draft_detail(&state, d))).await?;
    let accepted_details =
        try_join_all(accepted_drafts.into_iter().map(|d| draft_detail(&state, d))).await?;
    let pending_enriched = enrich_invitations(&state, pending).await?;

    let status = resolve_group_status(
        None,
        leader_details,
        accepted_details,
        pending_enriched,
        state.deadline.is_open(),
    );

    info!("Group status resolved");
    Ok(Json(status))
}

#[instrument(skip(state, _current_student), fields(enrollment = %enrollment))]
pub async fn get_finalized_group(
    State(state): State<Arc<AppState>>,
    Path(enrollment): Path<String>,
    Extension(_current_student): Extension<Student>,
) -> Result<Json<FinalizedGroupDTO>, AppError> {
    debug!("Fetching finalized group for student");
    // 1. Qualunque studente autenticato può consultare un gruppo finalizzato
    // 2. NOT_FOUND se lo studente non appartiene ad alcun gruppo

    let group = state
        .group
        .find_by_member(&enrollment)
        .await?
        .ok_or_else(|| {
            warn!("Student {} has no finalized group", enrollment);
            AppError::not_found("Student does not belong to a finalized group")
        })?;

    let members = state.group.members_of(&group.group_id).await?;

    info!("Finalized group {} retrieved", group.group_code);
    Ok(Json(FinalizedGroupDTO::from_parts(group, members)))
}
