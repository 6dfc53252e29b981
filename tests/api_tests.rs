use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use maintenance_map::cache::MemoryStore;
use maintenance_map::clients::DistanceLookup;
use maintenance_map::config::EnvironmentConfig;
use maintenance_map::models::distance::DistanceLeg;
use maintenance_map::utils::errors::LookupError;
use maintenance_map::{create_app, AppState};

/// Proveedor de distancias de prueba: 10 km por vía general, 8 km por autopista
#[derive(Default)]
struct FakeDirections {
    calls: Mutex<Vec<(String, String, bool)>>,
    unreachable: Option<String>,
}

#[async_trait]
impl DistanceLookup for FakeDirections {
    async fn lookup(&self, origin: &str, destination: &str, avoid: bool) -> Result<DistanceLeg, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((origin.to_string(), destination.to_string(), avoid));
        if self.unreachable.as_deref() == Some(destination) {
            return Err(LookupError::Provider("NOT_FOUND".to_string()));
        }
        Ok(DistanceLeg {
            distance_km: if avoid { 10.0 } else { 8.0 },
            duration_text: "20分".to_string(),
        })
    }
}

async fn create_test_app_with(lookup: Arc<FakeDirections>) -> Router {
    let config = EnvironmentConfig {
        distance_call_delay: Duration::ZERO,
        ..Default::default()
    };
    let state = AppState::new(config, Arc::new(MemoryStore::new()), lookup);
    state.repository.ensure_current_workspace().await.unwrap();
    create_app(state)
}

async fn create_test_app() -> Router {
    create_test_app_with(Arc::new(FakeDirections::default())).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn import_sample(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/customers/import",
        Some(json!({
            "rows": [
                ["顧客リスト", "", ""],
                ["設置先名", "住所", "備考"],
                ["A社", "東京都港区１−１", "1F"],
                ["B社", "東京都 港区1-1", "2F"],
                ["C社", "千葉県千葉市", ""]
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn customer_id(customers: &Value, company: &str) -> String {
    customers
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["company"] == company)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_import_groups_same_address() {
    let app = create_test_app().await;
    let body = import_sample(&app).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["sourceCount"], 3);
    assert_eq!(body["data"]["groupedCount"], 2);

    let first = &body["data"]["customers"][0];
    assert_eq!(first["company"], "A社");
    assert_eq!(first["unitCount"], 2);
    assert_eq!(first["note"], "1F\n[B社] 2F");
    assert_eq!(first["status"], "pending");

    let (_, list) = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_without_identity_columns() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/customers/import",
        Some(json!({ "rows": [["電話", "備考"], ["03-0000-0000", "x"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "COLUMN_DETECTION_ERROR");
}

#[tokio::test]
async fn test_create_customer_validation() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({ "company": "  ", "address": "東京都" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({ "company": "新規", "address": "東京都", "phone": "03" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["unitCount"], 1);
    assert!(body["data"]["id"].as_str().unwrap().starts_with("c_"));
}

#[tokio::test]
async fn test_route_order_and_distance_flow() {
    let lookup = Arc::new(FakeDirections::default());
    let app = create_test_app_with(lookup.clone()).await;
    let imported = import_sample(&app).await;
    let customers = &imported["data"]["customers"];
    let a = customer_id(customers, "A社");
    let c = customer_id(customers, "C社");

    // Sin miembros
    let (status, body) = send(&app, Method::GET, "/api/routes/route_1/distance", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "NO_MEMBERS");

    for id in [&a, &c] {
        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/customers/{}", id),
            Some(json!({ "routeId": "route_1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Sin casa
    let (status, body) = send(&app, Method::GET, "/api/routes/route_1/distance", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "MISSING_HOME_ADDRESS");

    send(&app, Method::PUT, "/api/settings", Some(json!({ "homeAddress": "埼玉県" }))).await;

    // C primero
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/routes/route_1/position",
        Some(json!({ "customerId": &c, "position": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"], json!([&c]));

    let (_, visits) = send(&app, Method::GET, "/api/routes/route_1/visits", None).await;
    let order: Vec<&str> = visits["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec![c.as_str(), a.as_str()]);

    // Autopista en el tramo C -> A
    let key = format!("{}_{}", c, a);
    let mut segments = serde_json::Map::new();
    segments.insert(key.clone(), json!("highway"));
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/routes/route_1/segments",
        Some(json!({ "segments": segments })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, plan) = send(&app, Method::GET, "/api/routes/route_1/segments", None).await;
    let plan = plan["data"].as_array().unwrap();
    assert_eq!(plan.len(), 3);
    assert_eq!(plan[0]["key"], format!("home_start_{}", c));
    assert_eq!(plan[1]["key"], key);
    assert_eq!(plan[1]["roadType"], "highway");

    let (status, body) = send(&app, Method::GET, "/api/routes/route_1/distance", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["routeId"], "route_1");
    assert_eq!(data["roadTypeMode"], "segment");
    assert_eq!(data["highwayKm"], 8.0);
    assert_eq!(data["generalKm"], 20.0);
    assert_eq!(data["totalKm"], 28.0);
    assert_eq!(data["segments"][1]["type"], "highway");
    assert_eq!(data["segments"][0]["from"], "埼玉県");

    let (_, body) = send(&app, Method::GET, "/api/routes/route_1/distance?mode=general", None).await;
    assert_eq!(body["data"]["highwayKm"], 0.0);
    assert_eq!(body["data"]["totalKm"], 30.0);

    assert_eq!(lookup.calls.lock().unwrap().len(), 6);
}

#[tokio::test]
async fn test_distance_with_failed_segment() {
    let lookup = Arc::new(FakeDirections {
        unreachable: Some("千葉県千葉市".to_string()),
        ..Default::default()
    });
    let app = create_test_app_with(lookup).await;
    let imported = import_sample(&app).await;
    let c = customer_id(&imported["data"]["customers"], "C社");

    send(&app, Method::PUT, &format!("/api/customers/{}", c), Some(json!({ "routeId": "route_2" }))).await;
    send(&app, Method::PUT, "/api/settings", Some(json!({ "homeAddress": "埼玉県" }))).await;

    let (status, body) = send(&app, Method::GET, "/api/routes/route_2/distance?mode=highway", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "1 tramos sin distancia");
    assert_eq!(body["data"]["segments"][0]["error"], true);
    assert_eq!(body["data"]["segments"][0]["duration"], "計算失敗");
    assert_eq!(body["data"]["segments"][1].get("error"), None);
    assert_eq!(body["data"]["totalKm"], 8.0);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/routes/route_77/distance", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/routes/route_77/order",
        Some(json!({ "order": ["x"] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_position_below_one_moves_first() {
    let app = create_test_app().await;
    let imported = import_sample(&app).await;
    let customers = &imported["data"]["customers"];
    let a = customer_id(customers, "A社");
    let c = customer_id(customers, "C社");

    send(&app, Method::PUT, "/api/routes/route_1/order", Some(json!({ "order": [&a, &c] }))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/routes/route_1/position",
        Some(json!({ "customerId": &c, "position": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"], json!([&c, &a]));

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/routes/route_1/position",
        Some(json!({ "customerId": &a, "position": -5 })),
    )
    .await;
    assert_eq!(body["data"]["order"], json!([&a, &c]));

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/routes/route_1/position",
        Some(json!({ "customerId": &a, "position": null })),
    )
    .await;
    assert_eq!(body["data"]["order"], json!([&c]));
}

#[tokio::test]
async fn test_route_configuration() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/routes/route_2",
        Some(json!({ "name": "北ルート", "color": "#00FF00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "北ルート");
    assert_eq!(body["data"]["color"], "#00ff00");

    let (status, _) = send(&app, Method::PUT, "/api/routes/route_2", Some(json!({ "color": "green" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, routes) = send(&app, Method::GET, "/api/routes", None).await;
    assert_eq!(routes["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_workspaces_isolate_customers() {
    let app = create_test_app().await;
    import_sample(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/workspaces",
        Some(json!({ "id": "2099-01", "name": "2099年1月", "makeCurrent": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, Method::GET, "/api/customers", None).await;
    assert!(list["data"].as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/workspaces",
        Some(json!({ "id": "2099-01", "name": "dup" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, body) = send(&app, Method::DELETE, "/api/workspaces/2099-01", None).await;
    assert_eq!(status, StatusCode::OK);
    let current = body["data"].as_str().unwrap().to_string();

    let (_, list) = send(&app, Method::GET, "/api/workspaces", None).await;
    assert_eq!(list["data"]["current"], current.as_str());

    let (_, customers) = send(&app, Method::GET, "/api/customers", None).await;
    assert_eq!(customers["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_backup_round_trip_keeps_api_key() {
    let app = create_test_app().await;
    import_sample(&app).await;
    send(
        &app,
        Method::PUT,
        "/api/settings",
        Some(json!({ "homeAddress": "埼玉県", "apiKey": "secret" })),
    )
    .await;

    let (status, mut backup) = send(&app, Method::GET, "/api/backup", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backup["version"], "2.0");
    assert_eq!(backup["customers"].as_array().unwrap().len(), 2);

    backup["settings"] = json!({ "homeAddress": "群馬県", "apiKey": "" });
    backup["customers"] = json!([]);
    let (status, _) = send(&app, Method::POST, "/api/backup", Some(backup)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, settings) = send(&app, Method::GET, "/api/settings", None).await;
    assert_eq!(settings["data"]["homeAddress"], "群馬県");
    assert_eq!(settings["data"]["apiKey"], "secret");

    let (_, customers) = send(&app, Method::GET, "/api/customers", None).await;
    assert!(customers["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_and_reset() {
    let app = create_test_app().await;
    let imported = import_sample(&app).await;
    let a = customer_id(&imported["data"]["customers"], "A社");
    send(
        &app,
        Method::PUT,
        &format!("/api/customers/{}", a),
        Some(json!({ "routeId": "route_3", "status": "appointed" })),
    )
    .await;

    let (_, summary) = send(&app, Method::GET, "/api/customers/summary", None).await;
    assert_eq!(summary["data"]["overall"]["total"], 2);
    assert_eq!(summary["data"]["overall"]["appointed"], 1);
    assert_eq!(summary["data"]["unassigned"], 1);
    assert_eq!(summary["data"]["routes"][0]["routeId"], "route_3");

    let (status, _) = send(&app, Method::POST, "/api/workspaces/current/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, list) = send(&app, Method::GET, "/api/customers", None).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_geocache_and_expense_drafts() {
    let app = create_test_app().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/geocache",
        Some(json!({ "address": "東京都港区1-1", "lat": 35.65, "lng": 139.74 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/geocache",
        Some(json!({ "address": "x", "lat": 135.0, "lng": 0.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, cache) = send(&app, Method::GET, "/api/geocache", None).await;
    assert_eq!(cache["data"]["東京都港区1-1"]["lat"], 35.65);

    let drafts = json!([{ "date": "2025-03-01", "items": [] }]);
    let (_, saved) = send(&app, Method::PUT, "/api/expense-drafts", Some(drafts.clone())).await;
    assert_eq!(saved["data"], 1);
    let (_, loaded) = send(&app, Method::GET, "/api/expense-drafts", None).await;
    assert_eq!(loaded["data"], drafts);
}
