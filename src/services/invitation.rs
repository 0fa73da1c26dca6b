//! Invitation services - Inviti e risposte agli inviti

use crate::core::{AppError, AppState, require_self};
use crate::dtos::{
    EnrichedInvitationDTO, InviteItemErrorDTO, InviteOutcomeDTO, InviteRequestDTO, NewInvitation,
    RespondRequestDTO, StudentDTO,
};
use crate::entities::{InvitationStatus, Student};
use crate::repositories::Read;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Validazione per-invitato, condivisa tra invite e create_draft.
///
/// Ordine dei controlli: invitato ≠ leader, studente esistente, non già in
/// un gruppo finalizzato, nessun invito pending verso qualunque bozza,
/// nessun invito precedente verso questa bozza.
pub(crate) async fn validate_invitee(
    state: &Arc<AppState>,
    leader_enrollment: &str,
    draft_id: Option<&i32>,
    enrollment: &str,
) -> Result<(), AppError> {
    if enrollment == leader_enrollment {
        return Err(AppError::already_in_group(
            "The leader is already part of the draft group",
        ));
    }

    if state.student.read(&enrollment.to_string()).await?.is_none() {
        return Err(AppError::not_found("Student not found"));
    }

    if state.group.is_member(enrollment).await? {
        return Err(AppError::already_in_group(
            "Student already belongs to a finalized group",
        ));
    }

    if state.invitation.has_pending_anywhere(enrollment).await? {
        return Err(AppError::duplicate_invitation(
            "Student already holds a pending invitation",
        ));
    }

    if let Some(draft_id) = draft_id {
        if state
            .invitation
            .has_invitation_for_draft(enrollment, draft_id)
            .await?
        {
            return Err(AppError::duplicate_invitation(
                "Student was already invited to this draft group",
            ));
        }
    }

    Ok(())
}

#[debug_handler]
#[instrument(skip(state, current_student, body), fields(draft_id = %body.draft_id, leader = %current_student.enrollment_no))]
pub async fn invite(
    State(state): State<Arc<AppState>>,
    Extension(current_student): Extension<Student>,
    Json(body): Json<InviteRequestDTO>,
) -> Result<Json<InviteOutcomeDTO>, AppError> {
    debug!("Inviting students to draft group");
    // 1. Verificare la scadenza (guardia condivisa)
    // 2. Recuperare la bozza, NOT_FOUND se assente o cancellata
    // 3. Verificare che il chiamante sia il leader
    // 4. Verificare che la bozza sia ancora aperta agli inviti
    // 5. Validare ogni invitato singolarmente: gli item validi vengono
    //    inseriti (riaprendo una bozza ALL_ACCEPTED), quelli invalidi
    //    riportati con il loro codice errore (successo parziale, la bozza
    //    NON viene mai auto-cancellata)

    state.deadline.ensure_open()?;

    body.validate()?;

    let draft = state.draft.read(&body.draft_id).await?.ok_or_else(|| {
        warn!("Draft group not found: {}", body.draft_id);
        AppError::not_found("Draft group not found")
    })?;

    if draft.leader_enrollment != current_student.enrollment_no {
        warn!("Student is not the leader of this draft");
        return Err(AppError::forbidden(
            "Only the draft leader can invite members",
        ));
    }

    if !draft.status.is_active() {
        warn!("Draft group {} is not open for invitations", draft.draft_id);
        return Err(AppError::conflict(
            "Draft group is not open for invitations",
        ));
    }

    let mut outcome = InviteOutcomeDTO::default();
    for enrollment in &body.enrollments {
        if outcome.invited.contains(enrollment) {
            outcome.errors.push(InviteItemErrorDTO {
                enrollment: enrollment.clone(),
                error: "DUPLICATE_INVITATION".to_string(),
            });
            continue;
        }

        let validation = validate_invitee(
            &state,
            &current_student.enrollment_no,
            Some(&draft.draft_id),
            enrollment,
        )
        .await;

        match validation {
            Ok(()) => {
                state
                    .invitation
                    .create_and_reopen(&NewInvitation {
                        draft_id: draft.draft_id,
                        enrollment_no: enrollment.clone(),
                    })
                    .await?;
                outcome.invited.push(enrollment.clone());
            }
            Err(err) => {
                debug!("Invitation to {} rejected: {}", enrollment, err.code());
                outcome.errors.push(InviteItemErrorDTO {
                    enrollment: enrollment.clone(),
                    error: err.code().to_string(),
                });
            }
        }
    }

    info!(
        "Invite processed: {} invited, {} errors",
        outcome.invited.len(),
        outcome.errors.len()
    );
    Ok(Json(outcome))
}

#[instrument(skip(state, current_student, body), fields(request_id = %body.request_id, user = %current_student.enrollment_no))]
pub async fn respond(
    State(state): State<Arc<AppState>>,
    Extension(current_student): Extension<Student>,
    Json(body): Json<RespondRequestDTO>,
) -> Result<(), AppError> {
    debug!("Responding to invitation");
    // 1. Verificare la scadenza (guardia condivisa)
    // 2. Validare la risposta: solo accepted o rejected
    // 3. Recuperare l'invito, NOT_FOUND se assente
    // 4. Verificare che il chiamante sia l'invitato
    // 5. Verificare che l'invito sia ancora pending (ALREADY_RESPONDED altrimenti)
    // 6. Registrare la risposta con UPDATE condizionato in transazione:
    //    una seconda risposta concorrente fallisce con ALREADY_RESPONDED

    state.deadline.ensure_open()?;

    if !InvitationStatus::Pending.can_transition_to(body.status) {
        warn!("Invalid invitation response: {:?}", body.status);
        return Err(AppError::invalid_input(
            "Response status must be 'accepted' or 'rejected'",
        ));
    }

    let invitation = state.invitation.read(&body.request_id).await?.ok_or_else(|| {
        warn!("Invitation not found: {}", body.request_id);
        AppError::not_found("Invitation not found")
    })?;

    if invitation.enrollment_no != current_student.enrollment_no {
        warn!(
            "Student {} attempted to respond to invitation of {}",
            current_student.enrollment_no, invitation.enrollment_no
        );
        return Err(AppError::forbidden(
            "You are not the recipient of this invitation",
        ));
    }

    if !invitation.status.is_pending() {
        warn!(
            "Invitation {} is already processed: {:?}",
            body.request_id, invitation.status
        );
        return Err(AppError::already_responded("Invitation is already processed")
            .with_details(format!("Invitation is already {:?}", invitation.status)));
    }

    let updated = state.invitation.respond(&body.request_id, &body.status).await?;

    if updated.is_none() {
        // qualcun altro ha risposto tra la lettura e l'update condizionato
        warn!("Invitation {} was responded concurrently", body.request_id);
        return Err(AppError::already_responded("Invitation is already processed"));
    }

    info!("Invitation response recorded: {:?}", body.status);
    Ok(())
}

#[instrument(skip(state, current_student), fields(enrollment = %enrollment))]
pub async fn list_invitations(
    State(state): State<Arc<AppState>>,
    Path(enrollment): Path<String>,
    Extension(current_student): Extension<Student>,
) -> Result<Json<Vec<EnrichedInvitationDTO>>, AppError> {
    debug!("Listing pending invitations for student");
    // 1. Il chiamante può vedere solo i propri inviti
    // 2. Recuperare gli inviti pending
    // 3. Arricchire ogni invito con il nome del team e il leader della bozza

    require_self(&current_student, &enrollment)?;

    let invitations = state.invitation.get_pending_for_student(&enrollment).await?;

    info!("Found {} pending invitations", invitations.len());

    let enriched = enrich_invitations(&state, invitations).await?;

    Ok(Json(enriched))
}

/// Arricchisce gli inviti con team e leader della bozza di destinazione
pub(crate) async fn enrich_invitations(
    state: &Arc<AppState>,
    invitations: Vec<crate::entities::Invitation>,
) -> Result<Vec<EnrichedInvitationDTO>, AppError> {
    let mut enriched = Vec::with_capacity(invitations.len());
    for invitation in invitations {
        // None solo per righe davvero assenti: gli errori di lettura risalgono
        let draft = state.draft.read(&invitation.draft_id).await?;

        let leader = match &draft {
            Some(d) => state
                .student
                .read(&d.leader_enrollment)
                .await?
                .map(StudentDTO::from),
            None => None,
        };

        enriched.push(EnrichedInvitationDTO {
            request_id: invitation.request_id,
            draft_id: invitation.draft_id,
            status: invitation.status,
            invited_at: invitation.invited_at,
            team_name: draft.map(|d| d.team_name),
            leader,
        });
    }

    Ok(enriched)
}
