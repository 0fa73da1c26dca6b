//! InvitationRepository - Repository per la gestione degli inviti

use super::Read;
use crate::dtos::NewInvitation;
use crate::entities::{DraftGroup, Invitation, InvitationStatus};
use sqlx::{Error, PgPool};

// INVITATION REPOSITORY
pub struct InvitationRepository {
    connection_pool: PgPool,
}

impl InvitationRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Get all pending invitations for a specific student
    pub async fn get_pending_for_student(
        &self,
        enrollment_no: &str,
    ) -> Result<Vec<Invitation>, Error> {
        let invitations = sqlx::query_as::<_, Invitation>(
            r#"
            SELECT request_id, draft_id, enrollment_no, status, invited_at
            FROM invitations
            WHERE enrollment_no = $1 AND status = 'PENDING'
            ORDER BY invited_at
            "#,
        )
        .bind(enrollment_no)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(invitations)
    }

    /// Check if a student holds a pending invitation to any draft.
    /// Invariante: al massimo un invito pending per studente in totale.
    pub async fn has_pending_anywhere(&self, enrollment_no: &str) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invitations WHERE enrollment_no = $1 AND status = 'PENDING'",
        )
        .bind(enrollment_no)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count > 0)
    }

    /// Check if a student was already invited (any status) to a draft
    pub async fn has_invitation_for_draft(
        &self,
        enrollment_no: &str,
        draft_id: &i32,
    ) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM invitations WHERE enrollment_no = $1 AND draft_id = $2",
        )
        .bind(enrollment_no)
        .bind(draft_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count > 0)
    }

    /// Get all invitations of a draft
    pub async fn find_by_draft(&self, draft_id: &i32) -> Result<Vec<Invitation>, Error> {
        let invitations = sqlx::query_as::<_, Invitation>(
            r#"
            SELECT request_id, draft_id, enrollment_no, status, invited_at
            FROM invitations
            WHERE draft_id = $1
            ORDER BY invited_at
            "#,
        )
        .bind(draft_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(invitations)
    }

    /// Bozze attive in cui lo studente risulta invitato accettato
    pub async fn accepted_drafts_for_student(
        &self,
        enrollment_no: &str,
    ) -> Result<Vec<DraftGroup>, Error> {
        let drafts = sqlx::query_as::<_, DraftGroup>(
            r#"
            SELECT d.draft_id, d.leader_enrollment, d.team_name, d.status,
                   d.previous_ps_id, d.previous_problem, d.created_at
            FROM draft_groups d
            JOIN invitations i ON i.draft_id = d.draft_id
            WHERE i.enrollment_no = $1
              AND i.status = 'ACCEPTED'
              AND d.status IN ('OPEN', 'ALL_ACCEPTED')
            ORDER BY d.created_at
            "#,
        )
        .bind(enrollment_no)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(drafts)
    }

    /// Registra la risposta a un invito in una transazione.
    ///
    /// L'UPDATE è condizionato a `status = 'PENDING'`: una seconda risposta
    /// concorrente non trova più la riga pending e ritorna `None`, quindi la
    /// prima risposta non può mai essere sovrascritta. Se un accept esaurisce
    /// i pending della bozza, la bozza viene promossa OPEN → ALL_ACCEPTED
    /// nella stessa transazione.
    ///
    /// # Returns
    /// * `Ok(Some(draft_id))` - risposta registrata
    /// * `Ok(None)` - l'invito non era più pending (o non esiste)
    pub async fn respond(
        &self,
        request_id: &i32,
        new_status: &InvitationStatus,
    ) -> Result<Option<i32>, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let draft_id: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE invitations
            SET status = $1
            WHERE request_id = $2 AND status = 'PENDING'
            RETURNING draft_id
            "#,
        )
        .bind(new_status)
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(draft_id) = draft_id else {
            tx.rollback().await?;
            return Ok(None);
        };

        if matches!(new_status, InvitationStatus::Accepted) {
            let pending_left: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM invitations WHERE draft_id = $1 AND status = 'PENDING'",
            )
            .bind(draft_id)
            .fetch_one(&mut *tx)
            .await?;

            if pending_left == 0 {
                // transizione valida solo da OPEN, il WHERE la fa rispettare
                sqlx::query(
                    "UPDATE draft_groups SET status = 'ALL_ACCEPTED' WHERE draft_id = $1 AND status = 'OPEN'",
                )
                .bind(draft_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(Some(draft_id))
    }

    /// Inserisce un invito e riapre la bozza nella stessa transazione.
    ///
    /// Un nuovo invito pending smentisce l'etichetta ALL_ACCEPTED: la
    /// demozione ALL_ACCEPTED → OPEN avviene insieme all'insert, così lo
    /// stato della bozza non mente mai sugli inviti in corso.
    pub async fn create_and_reopen(&self, data: &NewInvitation) -> Result<Invitation, Error> {
        let mut tx = self.connection_pool.begin().await?;

        // status e invited_at vengono gestiti dal database (default: PENDING e now())
        let invitation = sqlx::query_as::<_, Invitation>(
            r#"
            INSERT INTO invitations (draft_id, enrollment_no)
            VALUES ($1, $2)
            RETURNING request_id, draft_id, enrollment_no, status, invited_at
            "#,
        )
        .bind(data.draft_id)
        .bind(&data.enrollment_no)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE draft_groups SET status = 'OPEN' WHERE draft_id = $1 AND status = 'ALL_ACCEPTED'",
        )
        .bind(data.draft_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(invitation)
    }
}

impl Read<Invitation, i32> for InvitationRepository {
    async fn read(&self, request_id: &i32) -> Result<Option<Invitation>, Error> {
        let invitation = sqlx::query_as::<_, Invitation>(
            r#"
            SELECT request_id, draft_id, enrollment_no, status, invited_at
            FROM invitations
            WHERE request_id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(invitation)
    }
}
