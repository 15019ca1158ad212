use axum::http::StatusCode;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use treat_tracker::{
    router, table::MONTH_LABELS, AppState, MemoryGateway, SheetLayout, Tracker, Worksheet,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sheet(cells: impl Fn(usize) -> (&'static str, &'static str)) -> Worksheet {
    Worksheet {
        columns: vec!["Mes".into(), "UsuarioA".into(), "UsuarioB".into()],
        rows: MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(idx, month)| {
                let (a, b) = cells(idx);
                vec![month.to_string(), a.to_string(), b.to_string()]
            })
            .collect(),
    }
}

fn app_over(gateway: &Arc<MemoryGateway>) -> axum::Router {
    let tracker = Tracker::new(gateway.clone(), SheetLayout::default());
    router(AppState::new("Reto", tracker))
}

async fn send(app: axum::Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, String) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    send(app, req).await
}

async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, req).await
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn table_endpoint_normalizes_unknown_values() {
    let gateway = Arc::new(MemoryGateway::with_sheet(
        "Hoja 1",
        sheet(|idx| if idx == 0 { ("xyz", "done") } else { ("", "") }),
    ));
    let (status, body) = get(app_over(&gateway), "/api/table").await;
    assert_eq!(status, StatusCode::OK);

    let body = json(&body);
    assert_eq!(body["rows"][0]["user_a"], "pending");
    assert_eq!(body["rows"][0]["icon_a"], "⏳");
    assert_eq!(body["rows"][0]["user_b"], "done");
    assert_eq!(body["scores"]["user_b"]["done"], 1);
    assert_eq!(body["scores"]["user_a"]["done"], 0);
}

#[tokio::test]
async fn toggle_unknown_value_becomes_done() {
    let gateway = Arc::new(MemoryGateway::with_sheet(
        "Hoja 1",
        sheet(|idx| if idx == 0 { ("xyz", "pending") } else { ("pending", "pending") }),
    ));
    let (status, body) = post_json(
        app_over(&gateway),
        "/api/toggle",
        serde_json::json!({ "row": 0, "user": "a" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = json(&body);
    assert_eq!(body["status"], "done");
    assert_eq!(body["icon"], "🍩");
    assert_eq!(body["scores"]["user_a"]["done"], 1);
    assert_eq!(body["scores"]["user_b"]["done"], 0);
    assert_eq!(gateway.get("Hoja 1").unwrap().rows[0][1], "done");
}

#[tokio::test]
async fn failed_save_surfaces_error_and_reload_reverts() {
    let gateway = Arc::new(MemoryGateway::with_sheet(
        "Hoja 1",
        sheet(|_| ("pending", "pending")),
    ));
    gateway.set_fail_writes(true);

    let (status, body) = post_json(
        app_over(&gateway),
        "/api/toggle",
        serde_json::json!({ "row": 4, "user": "b" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("could not save"));

    gateway.set_fail_writes(false);
    let (_, body) = get(app_over(&gateway), "/api/table").await;
    assert_eq!(json(&body)["rows"][4]["user_b"], "pending");
}

#[tokio::test]
async fn index_shows_blocking_error_when_sheet_is_offline() {
    let gateway = Arc::new(MemoryGateway::with_sheet(
        "Hoja 1",
        sheet(|_| ("pending", "pending")),
    ));
    gateway.set_fail_reads(true);

    let (status, body) = get(app_over(&gateway), "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("could not reach the tracker sheet"));
    assert!(!body.contains("<form"));
}

#[tokio::test]
async fn index_names_missing_columns() {
    let mut broken = sheet(|_| ("pending", "pending"));
    broken.columns = vec!["Mes".into(), "Ana".into(), "Luis".into()];
    let gateway = Arc::new(MemoryGateway::with_sheet("Hoja 1", broken));

    let (status, body) = get(app_over(&gateway), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("UsuarioA, UsuarioB"));
}

#[tokio::test]
async fn scores_endpoint_reports_full_year() {
    let gateway = Arc::new(MemoryGateway::with_sheet(
        "Hoja 1",
        sheet(|_| ("done", "failed")),
    ));
    let (status, body) = get(app_over(&gateway), "/api/scores").await;
    assert_eq!(status, StatusCode::OK);

    let body = json(&body);
    assert_eq!(body["user_a"]["done"], 12);
    assert_eq!(body["user_a"]["percent"], 100.0);
    assert_eq!(body["user_b"]["failed"], 12);
    assert_eq!(body["user_b"]["label"], "Usuario B");
}

#[tokio::test]
async fn every_click_rewrites_the_whole_table() {
    let gateway = Arc::new(MemoryGateway::with_sheet(
        "Hoja 1",
        sheet(|idx| if idx == 9 { ("odd", "done") } else { ("failed", "done") }),
    ));
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/toggle/9/b")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = send(app_over(&gateway), req).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let stored = gateway.get("Hoja 1").unwrap();
    assert_eq!(gateway.write_count(), 1);
    assert_eq!(stored.rows.len(), 12);
    assert_eq!(stored.rows[9], vec!["Octubre", "odd", "failed"]);
    assert_eq!(stored.rows[0], vec!["Enero", "failed", "done"]);
}
