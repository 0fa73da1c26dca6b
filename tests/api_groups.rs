//! Integration tests per il workflow bozza → inviti → finalizzazione
//!
//! Richiedono un Postgres raggiungibile (DATABASE_URL): le migrations e i
//! fixtures vengono applicati automaticamente da #[sqlx::test]. Eseguire
//! con `cargo test -- --ignored`.

mod common;

#[cfg(test)]
mod group_workflow_tests {
    use super::common::{TEST_JWT_SECRET, create_test_jwt, create_test_server, create_test_state};
    use axum_test::TestServer;
    use axum_test::http::HeaderName;
    use serde_json::json;
    use sqlx::PgPool;

    const ALICE: &str = "0205CS221001"; // leader della bozza 1
    const BRUNO: &str = "0205CS221002"; // invito pending (request 1)
    const CHIARA: &str = "0205CS221003"; // invito accettato (request 2)
    const DEV: &str = "0205CS221004"; // leader del gruppo finalizzato
    const ELENA: &str = "0205CS221005"; // membro del gruppo finalizzato
    const FARID: &str = "0205CS221006"; // studente libero

    fn server_for(pool: PgPool) -> TestServer {
        create_test_server(create_test_state(pool))
    }

    fn bearer(enrollment: &str) -> (HeaderName, String) {
        let token = create_test_jwt(enrollment, enrollment, TEST_JWT_SECRET);
        (
            HeaderName::from_static("authorization"),
            format!("Bearer {}", token),
        )
    }

    // ============================================================
    // POST /api/groups-draft/draft - create_draft
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_create_draft_success(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(FARID);

        let response = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "Team Nuovo" }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(body["group_id"].as_i64().is_some());
        assert_eq!(body["invited"].as_array().map(|a| a.len()), Some(0));

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "groups")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_create_draft_fails_when_already_in_finalized_group(
        pool: PgPool,
    ) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(DEV);

        let response = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "Team Doppio" }))
            .await;

        response.assert_status_conflict();
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "ALREADY_IN_GROUP");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_create_draft_fails_with_existing_active_draft(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(ALICE);

        let response = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "Team Secondo" }))
            .await;

        response.assert_status_conflict();
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "ALREADY_IN_GROUP");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_create_draft_fails_with_empty_team_name(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(FARID);

        let response = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "" }))
            .await;

        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_INPUT");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts", "groups")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_create_draft_with_invitations_rolls_back_when_all_invalid(
        pool: PgPool,
    ) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(FARID);

        // Elena è già in un gruppo finalizzato, Bruno ha un invito pending
        let response = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({
                "team_name": "Team Fallito",
                "invitations": [ELENA, BRUNO]
            }))
            .await;

        response.assert_status_bad_request();

        // nessuna bozza orfana: la creazione è stata annullata per intero
        let (name, value) = bearer(FARID);
        let drafts = server
            .get(&format!("/api/groups-draft/draft/leader/{}", FARID))
            .add_header(name, value)
            .await;
        drafts.assert_status_ok();
        let drafts: Vec<serde_json::Value> = drafts.json();
        assert!(drafts.is_empty());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts", "groups")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_create_draft_with_invitations_partial_success(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(FARID);

        // Bruno ha già un invito pending alla bozza 1, Chiara è invitabile
        let response = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({
                "team_name": "Team Misto",
                "invitations": [BRUNO, CHIARA]
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["invited"], json!([CHIARA]));
        assert_eq!(body["errors"][0]["enrollment"], BRUNO);
        assert_eq!(body["errors"][0]["error"], "DUPLICATE_INVITATION");

        Ok(())
    }

    // ============================================================
    // POST /api/groups-draft/invite - invite
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts", "groups")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_invite_partial_success_reports_each_item(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(ALICE);

        // Elena è in un gruppo finalizzato, la matricola X non esiste,
        // Farid è invitabile: la bozza non viene auto-cancellata
        let response = server
            .post("/api/groups-draft/invite")
            .add_header(name, value)
            .json(&json!({
                "draft_id": 1,
                "enrollments": [ELENA, "0205CS229999", FARID]
            }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["invited"], json!([FARID]));

        let errors = body["errors"].as_array().expect("errors array");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["enrollment"], ELENA);
        assert_eq!(errors[0]["error"], "ALREADY_IN_GROUP");
        assert_eq!(errors[1]["enrollment"], "0205CS229999");
        assert_eq!(errors[1]["error"], "NOT_FOUND");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_invite_rejects_non_leader(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(BRUNO);

        let response = server
            .post("/api/groups-draft/invite")
            .add_header(name, value)
            .json(&json!({ "draft_id": 1, "enrollments": [FARID] }))
            .await;

        response.assert_status_forbidden();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_invite_duplicate_pending_leaves_original_untouched(
        pool: PgPool,
    ) -> sqlx::Result<()> {
        let server = server_for(pool);

        // Farid crea una seconda bozza e prova a invitare Bruno, che ha
        // già un invito pending alla bozza 1
        let (name, value) = bearer(FARID);
        let created = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "Team Beta" }))
            .await;
        created.assert_status_ok();
        let draft_id = created.json::<serde_json::Value>()["group_id"]
            .as_i64()
            .expect("draft id");

        let (name, value) = bearer(FARID);
        let response = server
            .post("/api/groups-draft/invite")
            .add_header(name, value)
            .json(&json!({ "draft_id": draft_id, "enrollments": [BRUNO] }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["errors"][0]["error"], "DUPLICATE_INVITATION");

        // l'invito originale di Bruno alla bozza 1 è ancora pending
        let (name, value) = bearer(BRUNO);
        let invitations = server
            .get(&format!("/api/groups-draft/invitations/{}", BRUNO))
            .add_header(name, value)
            .await;
        invitations.assert_status_ok();
        let invitations: Vec<serde_json::Value> = invitations.json();
        assert_eq!(invitations.len(), 1);
        assert_eq!(invitations[0]["draft_id"], 1);
        assert_eq!(invitations[0]["status"], "pending");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_invite_after_all_accepted_reopens_draft(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        // Bruno era l'ultimo pending: il suo accept promuove la bozza
        let (name, value) = bearer(BRUNO);
        server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "accepted" }))
            .await
            .assert_status_ok();

        // un nuovo invito pending riporta la bozza a OPEN
        let (name, value) = bearer(ALICE);
        let response = server
            .post("/api/groups-draft/invite")
            .add_header(name, value)
            .json(&json!({ "draft_id": 1, "enrollments": [FARID] }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["invited"], json!([FARID]));

        let (name, value) = bearer(ALICE);
        let detail = server
            .get("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await;
        detail.assert_status_ok();
        let detail: serde_json::Value = detail.json();
        assert_eq!(detail["status"], "open");
        let farid = detail["invitations"]
            .as_array()
            .expect("invitations")
            .iter()
            .find(|i| i["enrollment_no"] == FARID)
            .expect("farid invitation")
            .clone();
        assert_eq!(farid["status"], "pending");

        Ok(())
    }

    // ============================================================
    // POST /api/groups-draft/respond - respond
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_respond_accept_promotes_draft_when_no_pending_left(
        pool: PgPool,
    ) -> sqlx::Result<()> {
        let server = server_for(pool);

        let (name, value) = bearer(BRUNO);
        let response = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "accepted" }))
            .await;
        response.assert_status_ok();

        // Bruno era l'ultimo pending: la bozza passa a all_accepted
        let (name, value) = bearer(ALICE);
        let detail = server
            .get("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await;
        detail.assert_status_ok();
        let detail: serde_json::Value = detail.json();
        assert_eq!(detail["status"], "all_accepted");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_respond_rejects_wrong_owner(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(CHIARA);

        // la request 1 appartiene a Bruno
        let response = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "accepted" }))
            .await;

        response.assert_status_forbidden();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_respond_twice_fails_and_keeps_first_answer(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        let (name, value) = bearer(BRUNO);
        let first = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "rejected" }))
            .await;
        first.assert_status_ok();

        let (name, value) = bearer(BRUNO);
        let second = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "accepted" }))
            .await;
        second.assert_status_conflict();
        let body: serde_json::Value = second.json();
        assert_eq!(body["code"], "ALREADY_RESPONDED");

        // la prima risposta resta quella registrata
        let (name, value) = bearer(ALICE);
        let detail = server
            .get("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await;
        let detail: serde_json::Value = detail.json();
        let bruno = detail["invitations"]
            .as_array()
            .expect("invitations")
            .iter()
            .find(|i| i["enrollment_no"] == BRUNO)
            .expect("bruno invitation")
            .clone();
        assert_eq!(bruno["status"], "rejected");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_respond_rejects_pending_as_answer(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(BRUNO);

        let response = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "pending" }))
            .await;

        response.assert_status_bad_request();

        Ok(())
    }

    // ============================================================
    // POST /api/groups-draft/confirm/{draft_id} - confirm
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_confirm_builds_group_from_leader_and_accepted(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        // Scenario: Bruno rifiuta, Chiara ha già accettato, Alice finalizza
        let (name, value) = bearer(BRUNO);
        server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "rejected" }))
            .await
            .assert_status_ok();

        let (name, value) = bearer(ALICE);
        let response = server
            .post("/api/groups-draft/confirm/1")
            .add_header(name, value)
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let group_code = body["group_id"].as_str().expect("group code");
        assert!(group_code.starts_with("PBL-G-"));

        // membership: {Alice leader, Chiara}, Bruno escluso
        let (name, value) = bearer(CHIARA);
        let group = server
            .get(&format!("/api/students/pbl/gp/{}", CHIARA))
            .add_header(name, value)
            .await;
        group.assert_status_ok();
        let group: serde_json::Value = group.json();
        assert_eq!(group["group_id"], group_code);
        let members = group["members"].as_array().expect("members");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0]["enrollment_no"], ALICE);
        assert_eq!(members[0]["is_leader"], true);
        assert_eq!(members[1]["enrollment_no"], CHIARA);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_confirm_deletes_leftover_pending_invitations(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        // Chiara ha già accettato: Alice può finalizzare con Bruno ancora pending
        let (name, value) = bearer(ALICE);
        server
            .post("/api/groups-draft/confirm/1")
            .add_header(name, value)
            .await
            .assert_status_ok();

        // l'invito pending di Bruno è stato eliminato dalla transazione
        let (name, value) = bearer(BRUNO);
        let response = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "accepted" }))
            .await;
        response.assert_status_not_found();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_confirm_twice_fails_with_already_finalized(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        let (name, value) = bearer(ALICE);
        server
            .post("/api/groups-draft/confirm/1")
            .add_header(name, value)
            .await
            .assert_status_ok();

        let (name, value) = bearer(ALICE);
        let second = server
            .post("/api/groups-draft/confirm/1")
            .add_header(name, value)
            .await;
        second.assert_status_conflict();
        let body: serde_json::Value = second.json();
        assert_eq!(body["code"], "ALREADY_FINALIZED");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_confirm_without_acceptances_fails(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        let (name, value) = bearer(FARID);
        let created = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "Team Solo" }))
            .await;
        created.assert_status_ok();
        let draft_id = created.json::<serde_json::Value>()["group_id"]
            .as_i64()
            .expect("draft id");

        let (name, value) = bearer(FARID);
        let response = server
            .post(&format!("/api/groups-draft/confirm/{}", draft_id))
            .add_header(name, value)
            .await;
        response.assert_status_conflict();
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INSUFFICIENT_ACCEPTANCES");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_confirm_rejects_non_leader(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(CHIARA);

        let response = server
            .post("/api/groups-draft/confirm/1")
            .add_header(name, value)
            .await;

        response.assert_status_forbidden();

        Ok(())
    }

    // ============================================================
    // DELETE /api/groups-draft/draft/{draft_id} - cancel_draft
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_cancel_draft_invalidates_invitations(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        let (name, value) = bearer(ALICE);
        server
            .delete("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await
            .assert_status_ok();

        // rispondere a un invito della bozza cancellata è NOT_FOUND
        let (name, value) = bearer(BRUNO);
        let response = server
            .post("/api/groups-draft/respond")
            .add_header(name, value)
            .json(&json!({ "request_id": 1, "status": "accepted" }))
            .await;
        response.assert_status_not_found();

        // e il leader è di nuovo libero di creare una bozza
        let (name, value) = bearer(ALICE);
        let recreated = server
            .post("/api/groups-draft/draft")
            .add_header(name, value)
            .json(&json!({ "team_name": "Team Alpha 2" }))
            .await;
        recreated.assert_status_ok();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_cancel_finalized_draft_fails(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        // Chiara ha già accettato: Alice finalizza la bozza 1
        let (name, value) = bearer(ALICE);
        server
            .post("/api/groups-draft/confirm/1")
            .add_header(name, value)
            .await
            .assert_status_ok();

        // la cancellazione di una bozza finalizzata viene rifiutata
        let (name, value) = bearer(ALICE);
        let response = server
            .delete("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await;
        response.assert_status_conflict();

        // la bozza resta FINALIZED e la membership del gruppo è intatta
        let (name, value) = bearer(ALICE);
        let detail = server
            .get("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await;
        detail.assert_status_ok();
        assert_eq!(detail.json::<serde_json::Value>()["status"], "finalized");

        let (name, value) = bearer(CHIARA);
        let group = server
            .get(&format!("/api/students/pbl/gp/{}", CHIARA))
            .add_header(name, value)
            .await;
        group.assert_status_ok();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_cancel_draft_rejects_non_leader(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(BRUNO);

        let response = server
            .delete("/api/groups-draft/draft/1")
            .add_header(name, value)
            .await;

        response.assert_status_forbidden();

        Ok(())
    }

    // ============================================================
    // GET /api/students/pbl/gp/{enrollment} e status
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "groups")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_get_finalized_group_for_member(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(ELENA);

        let response = server
            .get(&format!("/api/students/pbl/gp/{}", ELENA))
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["group_id"], "PBL-G-1");
        assert_eq!(body["leader_enrollment"], DEV);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_get_finalized_group_not_found_for_free_student(
        pool: PgPool,
    ) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(FARID);

        let response = server
            .get(&format!("/api/students/pbl/gp/{}", FARID))
            .add_header(name, value)
            .await;

        response.assert_status_not_found();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students", "drafts", "groups")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_status_precedence_for_each_student(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);

        // Dev: gruppo finalizzato → stato terminale
        let (name, value) = bearer(DEV);
        let status = server
            .get(&format!("/api/groups-draft/status/{}", DEV))
            .add_header(name, value)
            .await;
        status.assert_status_ok();
        assert_eq!(status.json::<serde_json::Value>()["state"], "finalized");

        // Alice: leader di una bozza attiva
        let (name, value) = bearer(ALICE);
        let status = server
            .get(&format!("/api/groups-draft/status/{}", ALICE))
            .add_header(name, value)
            .await;
        let body: serde_json::Value = status.json();
        assert_eq!(body["state"], "draft");
        assert_eq!(body["drafts"][0]["draft_id"], 1);

        // Chiara: membro accettato della bozza di Alice
        let (name, value) = bearer(CHIARA);
        let status = server
            .get(&format!("/api/groups-draft/status/{}", CHIARA))
            .add_header(name, value)
            .await;
        assert_eq!(status.json::<serde_json::Value>()["state"], "draft");

        // Bruno: solo un invito pending
        let (name, value) = bearer(BRUNO);
        let status = server
            .get(&format!("/api/groups-draft/status/{}", BRUNO))
            .add_header(name, value)
            .await;
        let body: serde_json::Value = status.json();
        assert_eq!(body["state"], "invited");
        assert_eq!(body["invitations"][0]["team_name"], "Team Alpha");

        // Farid: nessun gruppo, creazione aperta
        let (name, value) = bearer(FARID);
        let status = server
            .get(&format!("/api/groups-draft/status/{}", FARID))
            .add_header(name, value)
            .await;
        let body: serde_json::Value = status.json();
        assert_eq!(body["state"], "ungrouped");
        assert_eq!(body["can_create"], true);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("students")))]
    #[ignore = "requires a running Postgres instance"]
    async fn test_status_rejects_other_students(pool: PgPool) -> sqlx::Result<()> {
        let server = server_for(pool);
        let (name, value) = bearer(FARID);

        let response = server
            .get(&format!("/api/groups-draft/status/{}", ALICE))
            .add_header(name, value)
            .await;

        response.assert_status_forbidden();

        Ok(())
    }
}
