//! DraftGroupRepository - Repository per le bozze di gruppo

use super::{Create, Read};
use crate::dtos::NewDraftGroup;
use crate::entities::{DraftGroup, Invitation};
use sqlx::{Error, PgPool};

// DRAFT GROUP REPOSITORY
pub struct DraftGroupRepository {
    connection_pool: PgPool,
}

impl DraftGroupRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Get all active drafts (OPEN or ALL_ACCEPTED) led by a student
    pub async fn find_active_by_leader(
        &self,
        leader_enrollment: &str,
    ) -> Result<Vec<DraftGroup>, Error> {
        let drafts = sqlx::query_as::<_, DraftGroup>(
            r#"
            SELECT draft_id, leader_enrollment, team_name, status,
                   previous_ps_id, previous_problem, created_at
            FROM draft_groups
            WHERE leader_enrollment = $1 AND status IN ('OPEN', 'ALL_ACCEPTED')
            ORDER BY created_at
            "#,
        )
        .bind(leader_enrollment)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(drafts)
    }

    /// Check if a student already leads an active draft
    pub async fn has_active_draft(&self, leader_enrollment: &str) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM draft_groups WHERE leader_enrollment = $1 AND status IN ('OPEN', 'ALL_ACCEPTED')",
        )
        .bind(leader_enrollment)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(count > 0)
    }

    /// Crea la bozza e i suoi inviti in un'unica transazione: o tutto o
    /// niente, nessuna compensazione best-effort a valle
    pub async fn create_with_invitations(
        &self,
        data: &NewDraftGroup,
        invitees: &[String],
    ) -> Result<(DraftGroup, Vec<Invitation>), Error> {
        let mut tx = self.connection_pool.begin().await?;

        let draft = sqlx::query_as::<_, DraftGroup>(
            r#"
            INSERT INTO draft_groups (leader_enrollment, team_name, previous_ps_id, previous_problem)
            VALUES ($1, $2, $3, $4)
            RETURNING draft_id, leader_enrollment, team_name, status,
                      previous_ps_id, previous_problem, created_at
            "#,
        )
        .bind(&data.leader_enrollment)
        .bind(&data.team_name)
        .bind(&data.previous_ps_id)
        .bind(&data.previous_problem)
        .fetch_one(&mut *tx)
        .await?;

        let mut invitations = Vec::with_capacity(invitees.len());
        for enrollment_no in invitees {
            let invitation = sqlx::query_as::<_, Invitation>(
                r#"
                INSERT INTO invitations (draft_id, enrollment_no)
                VALUES ($1, $2)
                RETURNING request_id, draft_id, enrollment_no, status, invited_at
                "#,
            )
            .bind(draft.draft_id)
            .bind(enrollment_no)
            .fetch_one(&mut *tx)
            .await?;
            invitations.push(invitation);
        }

        tx.commit().await?;

        Ok((draft, invitations))
    }

    /// Cancella una bozza: la marca CANCELLED e rimuove tutti i suoi inviti
    /// nella stessa transazione. La riga resta come traccia, ma non conta
    /// più come bozza attiva.
    ///
    /// L'UPDATE è condizionato agli stati attivi: una bozza FINALIZED non
    /// può mai diventare CANCELLED, e in quel caso gli inviti restano
    /// intatti.
    ///
    /// # Returns
    /// * `Ok(true)` - bozza cancellata
    /// * `Ok(false)` - la bozza non era più attiva
    pub async fn cancel(&self, draft_id: &i32) -> Result<bool, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE draft_groups SET status = 'CANCELLED' WHERE draft_id = $1 AND status IN ('OPEN', 'ALL_ACCEPTED')",
        )
        .bind(draft_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM invitations WHERE draft_id = $1")
            .bind(draft_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}

impl Create<DraftGroup, NewDraftGroup> for DraftGroupRepository {
    async fn create(&self, data: &NewDraftGroup) -> Result<DraftGroup, Error> {
        // status e created_at vengono gestiti dal database (default: OPEN e now())
        let draft = sqlx::query_as::<_, DraftGroup>(
            r#"
            INSERT INTO draft_groups (leader_enrollment, team_name, previous_ps_id, previous_problem)
            VALUES ($1, $2, $3, $4)
            RETURNING draft_id, leader_enrollment, team_name, status,
                      previous_ps_id, previous_problem, created_at
            "#,
        )
        .bind(&data.leader_enrollment)
        .bind(&data.team_name)
        .bind(&data.previous_ps_id)
        .bind(&data.previous_problem)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(draft)
    }
}

impl Read<DraftGroup, i32> for DraftGroupRepository {
    async fn read(&self, draft_id: &i32) -> Result<Option<DraftGroup>, Error> {
        let draft = sqlx::query_as::<_, DraftGroup>(
            r#"
            SELECT draft_id, leader_enrollment, team_name, status,
                   previous_ps_id, previous_problem, created_at
            FROM draft_groups
            WHERE draft_id = $1
            "#,
        )
        .bind(draft_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(draft)
    }
}
