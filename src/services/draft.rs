//! Draft services - Gestione delle bozze di gruppo

use crate::core::{AppError, AppState, require_self};
use crate::dtos::{
    CreateDraftGroupDTO, CreateDraftResponseDTO, DraftGroupDTO, DraftGroupDetailDTO,
    InvitationWithStudentDTO, InviteItemErrorDTO, NewDraftGroup,
};
use crate::entities::{DraftGroup, Student};
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::invitation::validate_invitee;

#[instrument(skip(state, current_student, body), fields(leader = %current_student.enrollment_no))]
pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    Extension(current_student): Extension<Student>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<CreateDraftGroupDTO>,
) -> Result<Json<CreateDraftResponseDTO>, AppError> {
    debug!("Creating new draft group");
    // 1. Verificare che la scadenza di formazione gruppi non sia passata (guardia condivisa)
    // 2. Validare il body (team_name non vuoto)
    // 3. Verificare che il leader non appartenga già a un gruppo finalizzato
    // 4. Verificare che il leader non abbia già una bozza attiva
    // 5. Se il body contiene inviti: validarli uno a uno (successo parziale);
    //    se TUTTI falliscono, non creare nulla e ritornare gli errori per-item
    // 6. Creare bozza (+ eventuali inviti validi) in un'unica transazione
    // 7. Ritornare draft_id, invitati inseriti ed errori per-item

    state.deadline.ensure_open()?;

    body.validate()?;

    if state.group.is_member(&current_student.enrollment_no).await? {
        warn!("Leader already belongs to a finalized group");
        return Err(AppError::already_in_group(
            "You already belong to a finalized group",
        ));
    }

    if state
        .draft
        .has_active_draft(&current_student.enrollment_no)
        .await?
    {
        warn!("Leader already has an active draft group");
        return Err(AppError::already_in_group(
            "You already lead an active draft group",
        ));
    }

    let new_draft = NewDraftGroup {
        leader_enrollment: current_student.enrollment_no.clone(),
        team_name: body.team_name.clone(),
        previous_ps_id: body.previous_ps_id.clone(),
        previous_problem: body.previous_problem.clone(),
    };

    let requested = body.invitations.unwrap_or_default();

    let mut valid: Vec<String> = Vec::new();
    let mut errors: Vec<InviteItemErrorDTO> = Vec::new();
    for enrollment in &requested {
        if valid.contains(enrollment) {
            errors.push(InviteItemErrorDTO {
                enrollment: enrollment.clone(),
                error: "DUPLICATE_INVITATION".to_string(),
            });
            continue;
        }
        match validate_invitee(&state, &current_student.enrollment_no, None, enrollment).await {
            Ok(()) => valid.push(enrollment.clone()),
            Err(err) => errors.push(InviteItemErrorDTO {
                enrollment: enrollment.clone(),
                error: err.code().to_string(),
            }),
        }
    }

    // Tutti gli inviti richiesti sono invalidi: niente bozza orfana,
    // la creazione non parte proprio
    if !requested.is_empty() && valid.is_empty() {
        warn!("All {} requested invitations failed validation", requested.len());
        let details = errors
            .iter()
            .map(|e| format!("{}: {}", e.enrollment, e.error))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::invalid_input("All requested invitations are invalid")
            .with_details(details));
    }

    let (draft, invitations) = if valid.is_empty() {
        (state.draft.create(&new_draft).await?, Vec::new())
    } else {
        state.draft.create_with_invitations(&new_draft, &valid).await?
    };

    info!(
        "Draft group {} created with {} invitations",
        draft.draft_id,
        invitations.len()
    );

    Ok(Json(CreateDraftResponseDTO {
        group_id: draft.draft_id,
        invited: invitations.into_iter().map(|i| i.enrollment_no).collect(),
        errors,
    }))
}

#[instrument(skip(state, current_student), fields(draft_id = %draft_id, user = %current_student.enrollment_no))]
pub async fn cancel_draft(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<i32>,
    Extension(current_student): Extension<Student>,
) -> Result<(), AppError> {
    debug!("Cancelling draft group");
    // 1. Recuperare la bozza, NOT_FOUND se assente o già cancellata
    // 2. Verificare che il chiamante sia il leader della bozza
    // 3. Verificare che la bozza sia ancora attiva (una bozza finalizzata non si cancella)
    // 4. Marcare CANCELLED ed eliminare tutti gli inviti nella stessa transazione

    let draft = read_active_draft(&state, &draft_id).await?;

    if draft.leader_enrollment != current_student.enrollment_no {
        warn!("Student is not the leader of this draft");
        return Err(AppError::forbidden(
            "Only the draft leader can cancel the draft",
        ));
    }

    if !draft.status.is_active() {
        warn!("Draft group {} is finalized, cannot cancel", draft_id);
        return Err(AppError::conflict(
            "A finalized draft group cannot be cancelled",
        ));
    }

    if !state.draft.cancel(&draft_id).await? {
        // la bozza è stata finalizzata tra la lettura e l'update condizionato
        warn!("Draft group {} was finalized concurrently", draft_id);
        return Err(AppError::conflict(
            "A finalized draft group cannot be cancelled",
        ));
    }

    info!("Draft group cancelled");
    Ok(())
}

#[instrument(skip(state, current_student), fields(enrollment = %enrollment))]
pub async fn list_leader_drafts(
    State(state): State<Arc<AppState>>,
    Path(enrollment): Path<String>,
    Extension(current_student): Extension<Student>,
) -> Result<Json<Vec<DraftGroupDetailDTO>>, AppError> {
    debug!("Listing active drafts led by student");
    // 1. Il chiamante può vedere solo le proprie bozze
    // 2. Recuperare le bozze attive del leader
    // 3. Arricchire ogni bozza con i suoi inviti (fan-out parallelo)

    require_self(&current_student, &enrollment)?;

    let drafts = state.draft.find_active_by_leader(&enrollment).await?;

    debug!("Found {} active drafts", drafts.len());

    let details = try_join_all(drafts.into_iter().map(|d| draft_detail(&state, d))).await?;

    info!("Successfully retrieved {} drafts", details.len());
    Ok(Json(details))
}

#[instrument(skip(state, current_student), fields(draft_id = %draft_id, user = %current_student.enrollment_no))]
pub async fn get_draft_detail(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<i32>,
    Extension(current_student): Extension<Student>,
) -> Result<Json<DraftGroupDetailDTO>, AppError> {
    debug!("Fetching draft group detail");
    // 1. Recuperare la bozza, NOT_FOUND se assente o cancellata
    // 2. Autorizzazione: leader oppure studente invitato alla bozza
    // 3. Arricchire con gli inviti e i nomi degli invitati

    let draft = read_active_draft(&state, &draft_id).await?;

    let is_leader = draft.leader_enrollment == current_student.enrollment_no;
    let is_invited = state
        .invitation
        .has_invitation_for_draft(&current_student.enrollment_no, &draft_id)
        .await?;

    if !is_leader && !is_invited {
        warn!("Student is neither leader nor invitee of this draft");
        return Err(AppError::forbidden(
            "You are not part of this draft group",
        ));
    }

    let detail = draft_detail(&state, draft).await?;

    info!("Draft detail retrieved");
    Ok(Json(detail))
}

/// Legge una bozza trattando le cancellate come inesistenti
async fn read_active_draft(state: &Arc<AppState>, draft_id: &i32) -> Result<DraftGroup, AppError> {
    let draft = state.draft.read(draft_id).await?.ok_or_else(|| {
        warn!("Draft group not found: {}", draft_id);
        AppError::not_found("Draft group not found")
    })?;

    if matches!(draft.status, crate::entities::DraftStatus::Cancelled) {
        warn!("Draft group {} is cancelled", draft_id);
        return Err(AppError::not_found("Draft group not found"));
    }

    Ok(draft)
}

/// Arricchisce una bozza con i suoi inviti e i nomi degli invitati
pub(crate) async fn draft_detail(
    state: &Arc<AppState>,
    draft: DraftGroup,
) -> Result<DraftGroupDetailDTO, AppError> {
    let invitations = state.invitation.find_by_draft(&draft.draft_id).await?;

    // fan-out parallelo sull'anagrafica, primary key lookup
    let students = try_join_all(
        invitations
            .iter()
            .map(|i| state.student.read(&i.enrollment_no)),
    )
    .await?;

    let invitations = invitations
        .into_iter()
        .zip(students)
        .map(|(invitation, student)| InvitationWithStudentDTO {
            request_id: invitation.request_id,
            enrollment_no: invitation.enrollment_no,
            student_name: student.map(|s| s.name),
            status: invitation.status,
            invited_at: invitation.invited_at,
        })
        .collect();

    Ok(DraftGroupDetailDTO {
        draft: DraftGroupDTO::from(draft),
        invitations,
    })
}
