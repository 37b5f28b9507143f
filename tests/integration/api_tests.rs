//! API integration tests
//!
//! Expect a server on localhost:5000 backed by a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000/api/v1";

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn post_json(client: &Client, path: &str, body: Value) -> (u16, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(client: &Client, path: &str) -> (u16, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status().as_u16();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

/// Team with one default technician, plus equipment owned by that team
async fn setup_equipment(client: &Client) -> (i64, i64) {
    let (status, team) = post_json(client, "/teams", json!({ "name": unique("Mechanics") })).await;
    assert_eq!(status, 201);
    let team_id = team["id"].as_i64().unwrap();

    let (status, member) = post_json(
        client,
        &format!("/teams/{}/members", team_id),
        json!({ "name": "Ada Field", "role": "Technician", "is_default_technician": true }),
    )
    .await;
    assert_eq!(status, 201);
    let technician_id = member["id"].as_i64().unwrap();

    let (status, equipment) = post_json(
        client,
        "/equipment",
        json!({
            "name": unique("CNC Lathe"),
            "serial_number": unique("SN"),
            "category": "Machinery",
            "maintenance_team_id": team_id,
            "default_technician_id": technician_id
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(equipment["status"], "Active");

    (equipment["id"].as_i64().unwrap(), technician_id)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let (status, body) = get_json(&client, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&client, "/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_request_prefills_default_technician() {
    let client = Client::new();
    let (equipment_id, technician_id) = setup_equipment(&client).await;

    let (status, request) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Spindle noise", "equipment_id": equipment_id, "request_type": "Corrective" }),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(request["stage"], "New");
    assert_eq!(request["priority"], "Medium");
    assert_eq!(request["assigned_technician_id"].as_i64(), Some(technician_id));
}

#[tokio::test]
#[ignore]
async fn test_create_request_for_unknown_equipment() {
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Ghost", "equipment_id": 999999999, "request_type": "Corrective" }),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number_conflicts() {
    let client = Client::new();
    let serial = unique("DUP");

    let (status, _) = post_json(&client, "/equipment", json!({ "name": "Press", "serial_number": serial })).await;
    assert_eq!(status, 201);

    let (status, _) = post_json(&client, "/equipment", json!({ "name": "Press 2", "serial_number": serial })).await;
    assert_eq!(status, 409);
}

#[tokio::test]
#[ignore]
async fn test_task_workflow_start_progress_complete() {
    let client = Client::new();
    let (equipment_id, _) = setup_equipment(&client).await;

    let (_, request) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Oil change", "equipment_id": equipment_id, "request_type": "Preventive" }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    // No activity before start
    let (status, body) = get_json(&client, &format!("/task-activities/request/{}", request_id)).await;
    assert_eq!(status, 200);
    assert!(body.is_null());

    let response = client
        .patch(format!("{}/task-activities/{}/progress", BASE_URL, request_id))
        .json(&json!({ "work_context": "too early" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let (status, activity) = post_json(&client, &format!("/task-activities/{}/start", request_id), json!({})).await;
    assert_eq!(status, 200);
    assert!(activity["actual_start_time"].is_string());

    let (_, details) = get_json(&client, &format!("/requests/{}", request_id)).await;
    assert_eq!(details["stage"], "In Progress");

    let response = client
        .patch(format!("{}/task-activities/{}/progress", BASE_URL, request_id))
        .json(&json!({ "work_context": "Drained sump", "parts_used": "5L oil" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let (status, done) = post_json(
        &client,
        &format!("/task-activities/{}/complete", request_id),
        json!({ "performance_rating": 5, "feedback": "Quick" }),
    )
    .await;
    assert_eq!(status, 200);
    assert!(done["total_time_minutes"].as_i64().unwrap() >= 0);
    assert_eq!(done["performance_rating"], 5);
    assert_eq!(done["parts_used"], "5L oil");

    let (_, details) = get_json(&client, &format!("/requests/{}", request_id)).await;
    assert_eq!(details["stage"], "Repaired");
    assert_eq!(details["performance_rating"], 5);
}

#[tokio::test]
#[ignore]
async fn test_restart_keeps_single_activity_and_notes() {
    let client = Client::new();
    let (equipment_id, _) = setup_equipment(&client).await;

    let (_, request) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Pump vibration", "equipment_id": equipment_id, "request_type": "Corrective" }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();
    let start_path = format!("/task-activities/{}/start", request_id);

    let (status, first) = post_json(&client, &start_path, json!({})).await;
    assert_eq!(status, 200);

    let response = client
        .patch(format!("{}/task-activities/{}/progress", BASE_URL, request_id))
        .json(&json!({ "work_context": "Realigned coupling" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let (status, second) = post_json(&client, &start_path, json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["work_context"], "Realigned coupling");

    let started = |activity: &Value| {
        chrono::DateTime::parse_from_rfc3339(activity["actual_start_time"].as_str().unwrap()).unwrap()
    };
    assert!(started(&second) > started(&first));
}

#[tokio::test]
#[ignore]
async fn test_complete_without_start_records_zero_minutes() {
    let client = Client::new();
    let (equipment_id, _) = setup_equipment(&client).await;

    let (_, request) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Quick fix", "equipment_id": equipment_id, "request_type": "Corrective" }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    let (status, done) = post_json(&client, &format!("/task-activities/{}/complete", request_id), json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(done["total_time_minutes"], 0);
    assert!(done["actual_start_time"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_stage_scrap_cascades_to_equipment() {
    let client = Client::new();
    let (equipment_id, _) = setup_equipment(&client).await;

    let (_, request) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Cracked frame", "equipment_id": equipment_id, "request_type": "Corrective" }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/requests/{}/stage", BASE_URL, request_id))
        .json(&json!({ "stage": "Scrap" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let (_, equipment) = get_json(&client, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(equipment["status"], "Scrap");

    // Scrapping never creates a task activity
    let (status, activity) = get_json(&client, &format!("/task-activities/request/{}", request_id)).await;
    assert_eq!(status, 200);
    assert!(activity.is_null());

    // Moving the request back does not restore the equipment
    let response = client
        .patch(format!("{}/requests/{}/stage", BASE_URL, request_id))
        .json(&json!({ "stage": "New" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let (_, equipment) = get_json(&client, &format!("/equipment/{}", equipment_id)).await;
    assert_eq!(equipment["status"], "Scrap");
}

#[tokio::test]
#[ignore]
async fn test_overdue_flag_and_kanban_columns() {
    let client = Client::new();
    let (equipment_id, _) = setup_equipment(&client).await;
    let yesterday = (chrono::Utc::now().date_naive() - chrono::Duration::days(1)).to_string();

    let (_, request) = post_json(
        &client,
        "/requests",
        json!({
            "subject": "Belt inspection",
            "equipment_id": equipment_id,
            "request_type": "Preventive",
            "scheduled_date": yesterday
        }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();

    let (_, details) = get_json(&client, &format!("/requests/{}", request_id)).await;
    assert_eq!(details["is_overdue"], true);

    let (status, board) = get_json(&client, "/requests/kanban").await;
    assert_eq!(status, 200);
    for stage in ["New", "In Progress", "Repaired", "Scrap"] {
        assert!(board[stage].is_array(), "missing column {}", stage);
    }

    post_json(&client, &format!("/task-activities/{}/complete", request_id), json!({})).await;
    let (_, details) = get_json(&client, &format!("/requests/{}", request_id)).await;
    assert_eq!(details["is_overdue"], false);
}

#[tokio::test]
#[ignore]
async fn test_invalid_stage_is_rejected() {
    let client = Client::new();

    let response = client
        .patch(format!("{}/requests/1/stage", BASE_URL))
        .json(&json!({ "stage": "Done" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
#[ignore]
async fn test_maintenance_ratio_is_consistent() {
    let client = Client::new();

    let (status, ratio) = get_json(&client, "/reports/maintenance-ratio").await;
    assert_eq!(status, 200);

    let total = ratio["total_requests"].as_i64().unwrap();
    assert_eq!(
        total,
        ratio["preventive_count"].as_i64().unwrap() + ratio["corrective_count"].as_i64().unwrap()
    );
    if total > 0 {
        let sum = ratio["preventive_percentage"].as_f64().unwrap() + ratio["corrective_percentage"].as_f64().unwrap();
        assert!((sum - 100.0).abs() < 0.02);
    }
}

#[tokio::test]
#[ignore]
async fn test_technician_performance_lists_only_assigned_members() {
    let client = Client::new();
    let (equipment_id, technician_id) = setup_equipment(&client).await;

    let (_, idle_team) = post_json(&client, "/teams", json!({ "name": unique("Electricians") })).await;
    let (status, idle) = post_json(
        &client,
        &format!("/teams/{}/members", idle_team["id"].as_i64().unwrap()),
        json!({ "name": "Idle Ivo" }),
    )
    .await;
    assert_eq!(status, 201);
    let idle_id = idle["id"].as_i64().unwrap();

    let (status, _) = post_json(
        &client,
        "/requests",
        json!({ "subject": "Chuck wobble", "equipment_id": equipment_id, "request_type": "Corrective" }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, rows) = get_json(&client, "/reports/technician-performance").await;
    assert_eq!(status, 200);
    let rows = rows.as_array().unwrap();
    let row_for = |id: i64| rows.iter().find(|row| row["technician_id"].as_i64() == Some(id));

    assert!(row_for(idle_id).is_none());
    let assigned = row_for(technician_id).unwrap();
    assert_eq!(assigned["total_assignments"], 1);
}

#[tokio::test]
#[ignore]
async fn test_update_can_unassign_technician_and_clear_date() {
    let client = Client::new();
    let (equipment_id, technician_id) = setup_equipment(&client).await;

    let (_, request) = post_json(
        &client,
        "/requests",
        json!({
            "subject": "Coolant check",
            "equipment_id": equipment_id,
            "request_type": "Preventive",
            "scheduled_date": "2024-09-01"
        }),
    )
    .await;
    let request_id = request["id"].as_i64().unwrap();
    assert_eq!(request["assigned_technician_id"].as_i64(), Some(technician_id));

    let update = |body: Value| {
        client
            .put(format!("{}/requests/{}", BASE_URL, request_id))
            .json(&body)
            .send()
    };

    // Absent fields are left alone
    let updated: Value = update(json!({ "priority": "High" })).await.unwrap().json().await.unwrap();
    assert_eq!(updated["assigned_technician_id"].as_i64(), Some(technician_id));
    assert_eq!(updated["scheduled_date"], "2024-09-01");

    let updated: Value = update(json!({ "assigned_technician_id": null, "scheduled_date": null }))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(updated["assigned_technician_id"].is_null());
    assert!(updated["scheduled_date"].is_null());
    assert_eq!(updated["priority"], "High");
}

#[tokio::test]
#[ignore]
async fn test_reports_respond() {
    let client = Client::new();

    for path in [
        "/reports/equipment-history",
        "/reports/maintenance-costs",
        "/reports/technician-performance",
        "/reports/downtime",
        "/task-activities/completed",
    ] {
        let (status, body) = get_json(&client, path).await;
        assert_eq!(status, 200, "{}", path);
        assert!(body.is_array(), "{}", path);
    }

    let (status, summary) = get_json(&client, "/reports/dashboard").await;
    assert_eq!(status, 200);
    assert!(summary["recent_activities"].as_array().unwrap().len() <= 10);
}

#[tokio::test]
#[ignore]
async fn test_log_updates_asset_and_soft_delete_hides_it() {
    let client = Client::new();

    let (status, asset) = post_json(
        &client,
        "/assets",
        json!({ "name": unique("Generator"), "maintenance_interval_days": 30 }),
    )
    .await;
    assert_eq!(status, 201);
    let asset_id = asset["id"].as_i64().unwrap();

    let (status, log) = post_json(
        &client,
        "/maintenance-logs",
        json!({ "asset_id": asset_id, "maintenance_date": "2024-06-01", "cost": "125.50" }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(log["asset_id"].as_i64(), Some(asset_id));

    let (_, asset) = get_json(&client, &format!("/assets/{}", asset_id)).await;
    assert_eq!(asset["last_maintenance_date"], "2024-06-01");

    let (_, logs) = get_json(&client, &format!("/maintenance-logs?asset_id={}", asset_id)).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);

    let (_, schedule) = get_json(&client, "/assets/schedule").await;
    let line = schedule
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["asset_id"].as_i64() == Some(asset_id))
        .cloned()
        .unwrap();
    assert_eq!(line["next_due"], "2024-07-01");
    assert_eq!(line["status"], "Overdue");

    let response = client
        .delete(format!("{}/assets/{}", BASE_URL, asset_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let (status, _) = get_json(&client, &format!("/assets/{}", asset_id)).await;
    assert_eq!(status, 404);
}
