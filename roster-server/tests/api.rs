//! HTTP surface smoke tests (router + middleware, no socket)

use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use roster_server::db::DbService;
use roster_server::db::repository::{member, store};
use roster_server::{Config, ServerState, api};
use serde_json::{Value, json};
use shared::models::MemberCreate;
use tower::ServiceExt;

async fn setup() -> (axum::Router, ServerState, i64, i64) {
    let db = DbService::in_memory().await.unwrap();
    let store = store::create(&db.pool, "Kiosk").await.unwrap();
    let mut conn = db.pool.acquire().await.unwrap();
    let ana = member::create(
        &mut conn,
        store.id,
        MemberCreate {
            name: "Ana".into(),
            user_id: None,
            job_role_ids: vec![],
        },
    )
    .await
    .unwrap();
    drop(conn);

    let state = ServerState::new(Config::with_overrides(":memory:", 0), db.pool);
    (api::build_app(state.clone()), state, store.id, ana.id)
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, http::HeaderMap, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .header("x-operator-id", "manager-7")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_request_id() {
    let (app, _, _, _) = setup().await;
    let (status, headers, body) =
        send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_schedule_round_trip() {
    let (app, _, store_id, ana) = setup().await;

    let (status, _, item) = send(
        &app,
        post(
            &format!("/api/stores/{store_id}/work-items"),
            json!({"name": "Day", "start_min": 540, "end_min": 1080, "unpaid_break_min": 60}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["max_headcount"], 1);

    let (status, _, body) = send(
        &app,
        post(
            &format!("/api/stores/{store_id}/schedule/auto-assign"),
            json!({"date_from": "2024-06-03", "date_to": "2024-06-05"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created_count"], 3);

    let (status, _, rows) = send(
        &app,
        Request::get(format!(
            "/api/stores/{store_id}/assignments?date_from=2024-06-03&date_to=2024-06-09"
        ))
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[0]["member_id"], ana);
    assert_eq!(rows[0]["status"], "ASSIGNED");
    assert_eq!(rows[0]["created_by"], "manager-7");

    let (status, _, report) = send(
        &app,
        Request::get(format!(
            "/api/stores/{store_id}/reports/paid-hours?date_from=2024-06-03&date_to=2024-06-09"
        ))
        .body(Body::empty())
        .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report[0]["paid_minutes"], 3 * 480);
    assert_eq!(report[0]["paid_hours"], 24.0);

    let (status, _, body) = send(
        &app,
        post(
            &format!("/api/stores/{store_id}/schedule/copy-week"),
            json!({"source_week_start": "2024-06-03", "target_week_start": "2024-06-10"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "copied", "copied_count": 3, "deleted_count": 0}));
}

#[tokio::test]
async fn test_errors_carry_codes() {
    let (app, _, store_id, ana) = setup().await;

    let (status, _, body) = send(
        &app,
        post(
            &format!("/api/stores/{store_id}/schedule/copy-week"),
            json!({"source_week_start": "2024-06-04", "target_week_start": "2024-06-10"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4003);

    let (status, _, body) = send(
        &app,
        post(
            "/api/stores/999/schedule/auto-assign",
            json!({"date_from": "2024-06-03", "date_to": "2024-06-03"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1001);

    let (status, _, _) = send(
        &app,
        post(
            &format!("/api/stores/{store_id}/availability"),
            json!({"member_id": ana, "date": "2024-06-03", "reason": "exam"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(
        &app,
        post(
            &format!("/api/stores/{store_id}/schedule/validate"),
            json!({"work_item_ids": [], "assigned_member_ids": [ana]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_valid"], true);
}
