//! FinalizedGroupRepository - Repository per i gruppi permanenti
//!
//! Contiene la transazione di finalizzazione: il conteggio delle
//! accettazioni e la scrittura del gruppo avvengono nella stessa
//! transazione, con lock sulla riga della bozza.

use crate::entities::{DraftGroup, DraftStatus, FinalizedGroup, GroupMember};
use sqlx::{Error, PgPool};

/// Esiti di dominio della transazione di confirm, distinti dagli errori
/// infrastrutturali di sqlx
#[derive(Debug)]
pub enum ConfirmError {
    NotFound,
    Forbidden,
    AlreadyFinalized,
    InsufficientAcceptances,
    /// Un membro accettato è entrato in un altro gruppo nel frattempo:
    /// il vincolo UNIQUE su group_members.enrollment_no ha rifiutato l'insert
    MemberAlreadyGrouped,
    Db(Error),
}

impl From<Error> for ConfirmError {
    fn from(err: Error) -> Self {
        if let Error::Database(ref db_err) = err {
            if db_err.constraint() == Some("group_members_enrollment_no_key") {
                return ConfirmError::MemberAlreadyGrouped;
            }
        }
        ConfirmError::Db(err)
    }
}

// FINALIZED GROUP REPOSITORY
pub struct FinalizedGroupRepository {
    connection_pool: PgPool,
}

impl FinalizedGroupRepository {
    pub fn new(connection_pool: PgPool) -> Self {
        Self { connection_pool }
    }

    /// Get the finalized group a student belongs to, if any
    pub async fn find_by_member(
        &self,
        enrollment_no: &str,
    ) -> Result<Option<FinalizedGroup>, Error> {
        let group = sqlx::query_as::<_, FinalizedGroup>(
            r#"
            SELECT g.group_id, g.group_code, g.leader_enrollment, g.team_name,
                   g.mentor_code, g.created_at
            FROM finalized_groups g
            JOIN group_members m ON m.group_id = g.group_id
            WHERE m.enrollment_no = $1
            "#,
        )
        .bind(enrollment_no)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(group)
    }

    /// Check if a student is member of any finalized group
    pub async fn is_member(&self, enrollment_no: &str) -> Result<bool, Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM group_members WHERE enrollment_no = $1")
                .bind(enrollment_no)
                .fetch_one(&self.connection_pool)
                .await?;

        Ok(count > 0)
    }

    /// Get the members of a finalized group, leader first
    pub async fn members_of(&self, group_id: &i32) -> Result<Vec<GroupMember>, Error> {
        let members = sqlx::query_as::<_, GroupMember>(
            r#"
            SELECT group_id, enrollment_no, is_leader
            FROM group_members
            WHERE group_id = $1
            ORDER BY is_leader DESC, enrollment_no
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(members)
    }

    /// Finalizza una bozza in un'unica transazione.
    ///
    /// 1. Lock della riga della bozza con SELECT ... FOR UPDATE
    /// 2. Verifica leader e stato (FINALIZED → AlreadyFinalized,
    ///    CANCELLED/assente → NotFound)
    /// 3. Rilettura degli inviti accettati dentro la transazione: un accept
    ///    concorrente non può più falsare il conteggio
    /// 4. Genera il codice permanente e inserisce gruppo + membri
    ///    ({leader} ∪ accettati)
    /// 5. Marca la bozza FINALIZED ed elimina i suoi inviti ancora pending
    pub async fn confirm(
        &self,
        draft_id: &i32,
        leader_enrollment: &str,
    ) -> Result<(FinalizedGroup, Vec<GroupMember>), ConfirmError> {
        let mut tx = self.connection_pool.begin().await?;

        let draft = sqlx::query_as::<_, DraftGroup>(
            r#"
            SELECT draft_id, leader_enrollment, team_name, status,
                   previous_ps_id, previous_problem, created_at
            FROM draft_groups
            WHERE draft_id = $1
            FOR UPDATE
            "#,
        )
        .bind(draft_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ConfirmError::NotFound)?;

        if draft.leader_enrollment != leader_enrollment {
            return Err(ConfirmError::Forbidden);
        }

        match draft.status {
            DraftStatus::Finalized => return Err(ConfirmError::AlreadyFinalized),
            DraftStatus::Cancelled => return Err(ConfirmError::NotFound),
            _ => {}
        }

        let accepted: Vec<String> = sqlx::query_scalar(
            "SELECT enrollment_no FROM invitations WHERE draft_id = $1 AND status = 'ACCEPTED' ORDER BY invited_at",
        )
        .bind(draft_id)
        .fetch_all(&mut *tx)
        .await?;

        // Policy: basta un membro accettato per sbloccare la finalizzazione
        if accepted.is_empty() {
            return Err(ConfirmError::InsufficientAcceptances);
        }

        // Il codice permanente deriva dalla sequence, schema distinto dagli
        // id delle bozze
        let group_id: i64 = sqlx::query_scalar(
            "SELECT nextval(pg_get_serial_sequence('finalized_groups', 'group_id'))",
        )
        .fetch_one(&mut *tx)
        .await?;
        let group_id = group_id as i32;
        let group_code = format!("PBL-G-{}", group_id);

        let group = sqlx::query_as::<_, FinalizedGroup>(
            r#"
            INSERT INTO finalized_groups (group_id, group_code, leader_enrollment, team_name)
            VALUES ($1, $2, $3, $4)
            RETURNING group_id, group_code, leader_enrollment, team_name, mentor_code, created_at
            "#,
        )
        .bind(group_id)
        .bind(&group_code)
        .bind(&draft.leader_enrollment)
        .bind(&draft.team_name)
        .fetch_one(&mut *tx)
        .await?;

        let mut members = Vec::with_capacity(accepted.len() + 1);
        let leader_member = sqlx::query_as::<_, GroupMember>(
            r#"
            INSERT INTO group_members (group_id, enrollment_no, is_leader)
            VALUES ($1, $2, TRUE)
            RETURNING group_id, enrollment_no, is_leader
            "#,
        )
        .bind(group_id)
        .bind(&draft.leader_enrollment)
        .fetch_one(&mut *tx)
        .await?;
        members.push(leader_member);

        for enrollment_no in &accepted {
            let member = sqlx::query_as::<_, GroupMember>(
                r#"
                INSERT INTO group_members (group_id, enrollment_no, is_leader)
                VALUES ($1, $2, FALSE)
                RETURNING group_id, enrollment_no, is_leader
                "#,
            )
            .bind(group_id)
            .bind(enrollment_no)
            .fetch_one(&mut *tx)
            .await?;
            members.push(member);
        }

        sqlx::query("UPDATE draft_groups SET status = 'FINALIZED' WHERE draft_id = $1")
            .bind(draft_id)
            .execute(&mut *tx)
            .await?;

        // Gli inviti ancora pending sono ormai superati: eliminarli qui
        // libera subito gli invitati per altre bozze
        sqlx::query("DELETE FROM invitations WHERE draft_id = $1 AND status = 'PENDING'")
            .bind(draft_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((group, members))
    }
}
