mod common;

use common::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

use dayreport::store::Store;

fn cashier_report(date: &str, sales: f64) -> Value {
    json!({
        "kind": "cashier",
        "report_date": date,
        "total_sales": sales,
        "cash_amount": sales / 2.0,
        "non_cash_amount": sales / 2.0,
    })
}

fn accounting_report(date: &str, sales: &str, expenses: &str) -> Value {
    json!({
        "kind": "accounting",
        "report_date": date,
        "total_sales": sales,
        "cash_deposit": "0",
        "expenses": expenses,
    })
}

fn consignment_report(date: &str, sales: f64, lpk: Value) -> Value {
    json!({
        "kind": "consignment_staff",
        "report_date": date,
        "total_sales": sales,
        "items_received": 10,
        "items_returned": 1,
        "lpk_entries": lpk,
    })
}

fn manager_report(date: &str) -> Value {
    json!({
        "kind": "supervisor_manager",
        "report_date": date,
        "summary": "All branches reported",
    })
}

async fn list(server: &TestServer, token: &str, query: &str) -> Vec<Value> {
    let body = TestServer::json_ok(
        server
            .get(&format!("/api/v1/reports{query}"), token)
            .send()
            .await
            .unwrap(),
    )
    .await;
    body["data"].as_array().unwrap().clone()
}

async fn notifications(server: &TestServer, token: &str) -> Vec<Value> {
    let body = TestServer::json_ok(
        server
            .get("/api/v1/notifications", token)
            .send()
            .await
            .unwrap(),
    )
    .await;
    body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_cashier_submission_notifies_both_managers() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;
    let csup = server.create_profile("Cahya", Some("Consignment Supervisor")).await;

    let resp = server
        .submit(&cashier.token, cashier_report("2024-05-01", 1000.0))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    for manager in [&am, &sm] {
        let inbox = notifications(&server, &manager.token).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0]["kind"], "submission");
        assert_eq!(inbox[0]["sender_id"], cashier.id.as_str());
        assert_eq!(inbox[0]["is_read"], false);
    }
    assert!(notifications(&server, &csup.token).await.is_empty());
    assert!(notifications(&server, &cashier.token).await.is_empty());
}

#[tokio::test]
async fn test_senior_manager_submission_notifies_nobody() {
    let server = TestServer::start().await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;

    let resp = server.submit(&sm.token, manager_report("2024-05-01")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert!(notifications(&server, &am.token).await.is_empty());
    assert!(notifications(&server, &sm.token).await.is_empty());
}

#[tokio::test]
async fn test_submission_without_any_manager_still_succeeds() {
    let server = TestServer::start().await;
    let staff = server.create_profile("Kiki", Some("Consignment Staff")).await;

    let resp = server
        .submit(&staff.token, consignment_report("2024-05-01", 10.0, json!([])))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(list(&server, &staff.token, "").await.len(), 1);
}

#[tokio::test]
async fn test_visibility_follows_role() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let other_cashier = server.create_profile("Cahaya", Some("Cashier")).await;
    let staff = server.create_profile("Kiki", Some("Consignment Staff")).await;
    let csup = server.create_profile("Cahya", Some("Consignment Supervisor")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    for (token, body) in [
        (&cashier.token, cashier_report("2024-05-01", 100.0)),
        (&other_cashier.token, cashier_report("2024-05-01", 200.0)),
        (&staff.token, consignment_report("2024-05-02", 50.0, json!([]))),
        (&csup.token, manager_report("2024-05-02")),
        (&am.token, manager_report("2024-05-03")),
        (&sm.token, manager_report("2024-05-03")),
    ] {
        assert_eq!(server.submit(token, body).await.status(), StatusCode::CREATED);
    }

    let own = list(&server, &cashier.token, "").await;
    assert_eq!(own.len(), 1);
    assert_eq!(own[0]["user_id"], cashier.id.as_str());

    let supervised = list(&server, &csup.token, "").await;
    let submitters: Vec<&str> = supervised
        .iter()
        .map(|r| r["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(supervised.len(), 2);
    assert!(submitters.contains(&staff.id.as_str()));
    assert!(submitters.contains(&csup.id.as_str()));

    let accounting = list(&server, &am.token, "").await;
    assert_eq!(accounting.len(), 5);
    assert!(accounting.iter().all(|r| r["user_id"] != sm.id.as_str()));

    let everything = list(&server, &sm.token, "").await;
    assert_eq!(everything.len(), 6);
    let dates: Vec<&str> = everything
        .iter()
        .map(|r| r["report_date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn test_list_filters() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let accountant = server.create_profile("Budi", Some("Accounting Staff")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    server.submit(&cashier.token, cashier_report("2024-05-01", 1.0)).await;
    server.submit(&cashier.token, cashier_report("2024-05-05", 1.0)).await;
    server
        .submit(&accountant.token, accounting_report("2024-05-03", "10", "1"))
        .await;

    let by_role = list(&server, &sm.token, "?role=Accounting%20Staff").await;
    assert_eq!(by_role.len(), 1);
    assert_eq!(by_role[0]["submitter"]["role"], "Accounting Staff");

    let by_name = list(&server, &sm.token, "?name=cici").await;
    assert_eq!(by_name.len(), 2);

    let by_range = list(&server, &sm.token, "?from=2024-05-02&to=2024-05-04").await;
    assert_eq!(by_range.len(), 1);
    assert_eq!(by_range[0]["report_date"], "2024-05-03");
}

#[tokio::test]
async fn test_second_report_same_day_conflicts() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;

    let first = server.submit(&cashier.token, cashier_report("2024-05-01", 1.0)).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = server.submit(&cashier.token, cashier_report("2024-05-01", 2.0)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let next_day = server.submit(&cashier.token, cashier_report("2024-05-02", 2.0)).await;
    assert_eq!(next_day.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_fields_are_rejected_before_storage() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;

    let resp = server
        .submit(&cashier.token, cashier_report("2024-05-01", -5.0))
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"total_sales"));

    assert!(list(&server, &cashier.token, "").await.is_empty());
}

#[tokio::test]
async fn test_role_must_match_report_kind() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;

    let resp = server
        .submit(&cashier.token, accounting_report("2024-05-01", "1", "0"))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_cashier_insentif_reports_incentive() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let insentif = server.create_profile("Indah", Some("Cashier-Insentif")).await;

    let mut report = cashier_report("2024-05-01", 100.0);
    report["incentive_amount"] = json!(5.0);

    let resp = server.submit(&cashier.token, report.clone()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["fields"][0]["field"], "incentive_amount");

    let created = TestServer::json_ok(server.submit(&insentif.token, report).await).await;
    assert_eq!(created["data"]["incentive_amount"], 5.0);

    // Editing cannot sneak an incentive onto a plain cashier report.
    let plain = TestServer::json_ok(
        server
            .submit(&cashier.token, cashier_report("2024-05-01", 100.0))
            .await,
    )
    .await;
    let id = plain["data"]["id"].as_str().unwrap();
    let mut edit = cashier_report("2024-05-01", 100.0);
    edit.as_object_mut().unwrap().remove("report_date");
    edit["incentive_amount"] = json!(9.0);
    let resp = server
        .patch(&format!("/api/v1/reports/cashier/{id}"), &cashier.token)
        .json(&edit)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_manager_view_is_tracked_and_notified_once() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;

    let created = TestServer::json_ok(
        server
            .submit(&cashier.token, cashier_report("2024-05-01", 1.0))
            .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();
    let path = format!("/api/v1/reports/cashier/{id}");

    // The submitter opening their own report is not tracked.
    let own = TestServer::json_ok(server.get(&path, &cashier.token).send().await.unwrap()).await;
    assert!(own["data"].get("accounting_manager_viewed_at").is_none());

    let first = TestServer::json_ok(server.get(&path, &am.token).send().await.unwrap()).await;
    assert_eq!(first["data"]["submitter"]["first_name"], "Cici");

    let again = server.get(&path, &am.token).send().await.unwrap();
    assert_eq!(again.status(), StatusCode::OK);

    let stored = server
        .store
        .get_report(dayreport::types::ReportKind::Cashier, id)
        .unwrap()
        .unwrap();
    assert!(stored.accounting_manager_viewed_at.is_some());
    assert!(stored.senior_manager_viewed_at.is_none());

    let inbox = notifications(&server, &cashier.token).await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["kind"], "view");
}

#[tokio::test]
async fn test_hidden_report_detail_is_not_found() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let other = server.create_profile("Cahaya", Some("Cashier")).await;
    let csup = server.create_profile("Cahya", Some("Consignment Supervisor")).await;

    let created = TestServer::json_ok(
        server
            .submit(&cashier.token, cashier_report("2024-05-01", 1.0))
            .await,
    )
    .await;
    let path = format!(
        "/api/v1/reports/cashier/{}",
        created["data"]["id"].as_str().unwrap()
    );

    for token in [&other.token, &csup.token] {
        let resp = server.get(&path, token).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_lpk_entries_are_diffed_on_edit() {
    let server = TestServer::start().await;
    let staff = server.create_profile("Kiki", Some("Consignment Staff")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    let created = TestServer::json_ok(
        server
            .submit(
                &staff.token,
                consignment_report(
                    "2024-05-01",
                    10.0,
                    json!([{"branch": "North", "count": 3}, {"branch": "South", "count": 4}]),
                ),
            )
            .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/reports/consignment_staff/{id}");

    let detail = TestServer::json_ok(server.get(&path, &staff.token).send().await.unwrap()).await;
    let entries = detail["data"]["lpk_entries"].as_array().unwrap().clone();
    assert_eq!(entries.len(), 2);
    let north = entries.iter().find(|e| e["branch"] == "North").unwrap();

    let mut edit = consignment_report(
        "2024-05-01",
        12.0,
        json!([
            {"id": north["id"], "branch": "North", "count": 5},
            {"branch": "East", "count": 1}
        ]),
    );
    edit.as_object_mut().unwrap().remove("report_date");

    let edited = TestServer::json_ok(
        server.patch(&path, &staff.token).json(&edit).send().await.unwrap(),
    )
    .await;
    let after = edited["data"]["lpk_entries"].as_array().unwrap();
    assert_eq!(after.len(), 2);
    assert!(after.iter().any(|e| e["id"] == north["id"] && e["count"] == 5));
    assert!(after.iter().any(|e| e["branch"] == "East"));
    assert!(after.iter().all(|e| e["branch"] != "South"));

    // Only the submitter may edit.
    let resp = server.patch(&path, &sm.token).json(&edit).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_failed_lpk_edit_leaves_report_untouched() {
    let server = TestServer::start().await;
    let staff = server.create_profile("Kiki", Some("Consignment Staff")).await;

    let created = TestServer::json_ok(
        server
            .submit(
                &staff.token,
                consignment_report("2024-05-01", 10.0, json!([{"branch": "North", "count": 3}])),
            )
            .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/reports/consignment_staff/{id}");

    server
        .store
        .connection()
        .execute_batch(
            "CREATE TRIGGER reject_lpk BEFORE INSERT ON lpk_entries
             BEGIN SELECT RAISE(ABORT, 'lpk insert rejected'); END;",
        )
        .unwrap();

    let mut edit = consignment_report("2024-05-01", 999.0, json!([{"branch": "East", "count": 1}]));
    edit.as_object_mut().unwrap().remove("report_date");
    let resp = server.patch(&path, &staff.token).json(&edit).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let detail = TestServer::json_ok(server.get(&path, &staff.token).send().await.unwrap()).await;
    assert_eq!(detail["data"]["total_sales"], 10.0);
    let branches: Vec<&str> = detail["data"]["lpk_entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["branch"].as_str().unwrap())
        .collect();
    assert_eq!(branches, vec!["North"]);
}

#[tokio::test]
async fn test_summary_sums_per_day_and_period() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let accountant = server.create_profile("Budi", Some("Accounting Staff")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    server.submit(&cashier.token, cashier_report("2024-05-01", 100.0)).await;
    server.submit(&cashier.token, cashier_report("2024-05-02", 50.0)).await;
    server
        .submit(&accountant.token, accounting_report("2024-05-01", "200", "25.5"))
        .await;
    server.submit(&sm.token, manager_report("2024-05-01")).await;

    let resp = server
        .get("/api/v1/functions/summary?date=2024-05-10", &sm.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();

    let daily = body["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0]["date"], "2024-05-01");
    assert_eq!(daily[0]["cashier_sales"], 100.0);
    assert_eq!(daily[0]["accounting_sales"], 200.0);
    assert_eq!(daily[0]["accounting_expenses"], 25.5);

    let monthly = &body["monthly"];
    assert_eq!(monthly["days"], 2);
    assert_eq!(monthly["cashier_sales"], 150.0);
    assert_eq!(monthly["from"], "2024-04-11");
    assert_eq!(monthly["to"], "2024-05-10");
}

#[tokio::test]
async fn test_summary_access_and_bad_date() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;

    let resp = server
        .get("/api/v1/functions/summary", &cashier.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = server
        .get("/api/v1/functions/submission-status?date=yesterday", &am.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));

    let resp = server
        .get("/api/v1/functions/summary", &am.token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["daily"].as_array().unwrap().is_empty());
    assert_eq!(body["monthly"]["days"], 0);
}

#[tokio::test]
async fn test_submission_status_groups_kinds_per_user() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let staff = server.create_profile("Kiki", Some("Consignment Staff")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;

    server.submit(&cashier.token, cashier_report("2024-05-01", 1.0)).await;
    server
        .submit(&staff.token, consignment_report("2024-05-01", 1.0, json!([])))
        .await;
    server.submit(&staff.token, consignment_report("2024-05-02", 1.0, json!([]))).await;

    let body: Value = server
        .get("/api/v1/functions/submission-status?date=2024-05-01", &am.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let submissions = body["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0]["name"], "Cici Test");
    assert_eq!(submissions[0]["kinds"], json!(["cashier"]));
    assert_eq!(submissions[1]["kinds"], json!(["consignment_staff"]));

    let empty: Value = server
        .get("/api/v1/functions/submission-status?date=2024-06-01", &am.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty["submissions"], json!([]));
}

#[tokio::test]
async fn test_session_states() {
    let server = TestServer::start().await;

    let anon = TestServer::json_ok(server.anonymous_get("/api/v1/session").send().await.unwrap()).await;
    assert_eq!(anon["data"]["state"], "unauthenticated");

    let pending = server.create_profile("Nia", None).await;
    let session = TestServer::json_ok(
        server.get("/api/v1/session", &pending.token).send().await.unwrap(),
    )
    .await;
    assert_eq!(session["data"]["state"], "role_unassigned");

    let resp = server.get("/api/v1/reports", &pending.token).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let assigned = server
        .patch(
            &format!("/api/v1/admin/profiles/{}", pending.id),
            &server.admin_token,
        )
        .json(&json!({ "role": "Cashier" }))
        .send()
        .await
        .unwrap();
    assert_eq!(assigned.status(), StatusCode::OK);

    let session = TestServer::json_ok(
        server.get("/api/v1/session", &pending.token).send().await.unwrap(),
    )
    .await;
    assert_eq!(session["data"]["state"], "ready");
    assert_eq!(session["data"]["role"], "Cashier");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;

    let resp = server
        .post("/api/v1/session/logout", &cashier.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = server.get("/api/v1/reports", &cashier.token).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_failing_kind_degrades_to_partial_list() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let accountant = server.create_profile("Budi", Some("Accounting Staff")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    server.submit(&cashier.token, cashier_report("2024-05-01", 1.0)).await;
    server
        .submit(&accountant.token, accounting_report("2024-05-01", "1", "0"))
        .await;

    server
        .store
        .connection()
        .execute_batch("DROP TABLE cashier_reports;")
        .unwrap();

    let rows = list(&server, &sm.token, "").await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "accounting");

    // A cashier only has the one kind, so nothing is left to show.
    let resp = server.get("/api/v1/reports", &cashier.token).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_notifications_mark_read() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let am = server.create_profile("Adi", Some("Accounting Manager")).await;

    server.submit(&cashier.token, cashier_report("2024-05-01", 1.0)).await;
    server.submit(&cashier.token, cashier_report("2024-05-02", 1.0)).await;

    let inbox = notifications(&server, &am.token).await;
    assert_eq!(inbox.len(), 2);
    let id = inbox[0]["id"].as_str().unwrap();

    // Someone else's notification cannot be touched.
    let resp = server
        .post(&format!("/api/v1/notifications/{id}/read"), &cashier.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = server
        .post(&format!("/api/v1/notifications/{id}/read"), &am.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let unread = TestServer::json_ok(
        server
            .get("/api/v1/notifications?unread=true", &am.token)
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(unread["data"].as_array().unwrap().len(), 1);

    let all = TestServer::json_ok(
        server
            .post("/api/v1/notifications/read-all", &am.token)
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(all["data"]["updated"], 1);
    assert_eq!(notifications(&server, &am.token).await.len(), 2);
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let server = TestServer::start().await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    let resp = server
        .get("/api/v1/admin/profiles", &sm.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = server
        .post("/api/v1/admin/profiles", &server.admin_token)
        .json(&json!({ "first_name": "  ", "role": "Cashier" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let listed = TestServer::json_ok(
        server
            .get("/api/v1/admin/profiles", &server.admin_token)
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed["has_more"], false);
}

#[tokio::test]
async fn test_activity_log_for_senior_manager() {
    let server = TestServer::start().await;
    let cashier = server.create_profile("Cici", Some("Cashier")).await;
    let sm = server.create_profile("Sinta", Some("Senior Manager")).await;

    server.submit(&cashier.token, cashier_report("2024-05-01", 1.0)).await;

    let resp = server.get("/api/v1/activity", &cashier.token).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body = TestServer::json_ok(server.get("/api/v1/activity", &sm.token).send().await.unwrap()).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "report.submitted");
    assert_eq!(entries[0]["profile_id"], cashier.id.as_str());
}
