//! Finalize services - Promozione di una bozza a gruppo permanente

use crate::core::{AppError, AppState};
use crate::dtos::ConfirmResponseDTO;
use crate::entities::Student;
use crate::repositories::ConfirmError;
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, current_student), fields(draft_id = %draft_id, leader = %current_student.enrollment_no))]
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(draft_id): Path<i32>,
    Extension(current_student): Extension<Student>,
) -> Result<Json<ConfirmResponseDTO>, AppError> {
    debug!("Confirming draft group");
    // 1. Verificare la scadenza (guardia condivisa)
    // 2. Delegare tutto il resto alla transazione del repository: lock della
    //    bozza, verifica leader e stato, rilettura delle accettazioni,
    //    scrittura di gruppo + membri, FINALIZED, pulizia dei pending
    // 3. Mappare gli esiti di dominio sui codici errore dell'API

    state.deadline.ensure_open()?;

    let (group, members) = state
        .group
        .confirm(&draft_id, &current_student.enrollment_no)
        .await
        .map_err(|err| match err {
            ConfirmError::NotFound => {
                warn!("Draft group not found or cancelled: {}", draft_id);
                AppError::not_found("Draft group not found")
            }
            ConfirmError::Forbidden => {
                warn!("Student is not the leader of draft {}", draft_id);
                AppError::forbidden("Only the draft leader can confirm the group")
            }
            ConfirmError::AlreadyFinalized => {
                warn!("Draft group {} is already finalized", draft_id);
                AppError::already_finalized("Draft group is already finalized")
            }
            ConfirmError::InsufficientAcceptances => {
                warn!("Draft group {} has no accepted invitations", draft_id);
                AppError::insufficient_acceptances(
                    "At least one member must accept before finalizing",
                )
            }
            ConfirmError::MemberAlreadyGrouped => {
                warn!("A member of draft {} already joined another group", draft_id);
                AppError::already_in_group(
                    "A member already belongs to another finalized group",
                )
            }
            ConfirmError::Db(db_err) => AppError::from(db_err),
        })?;

    info!(
        "Draft group {} finalized as {} with {} members",
        draft_id,
        group.group_code,
        members.len()
    );

    Ok(Json(ConfirmResponseDTO {
        group_id: group.group_code,
    }))
}
