use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use server::{ServerState, router};

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build();
    engine.ensure_admin("admin", "admin123").await.unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

fn basic(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{username}:{password}"))
    )
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<(&str, &str)>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((username, password)) = auth {
        builder = builder.header(header::AUTHORIZATION, basic(username, password));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn register_login_roundtrip() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"username": "carla", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "carla");
    assert_eq!(body["is_admin"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"username": "carla", "password": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"username": "carla", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_admin"], false);

    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({"username": "carla", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gated_routes_require_credentials() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/products", Some(("ghost", "nope")), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, "GET", "/products", Some(("admin", "admin123")), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn only_admins_can_record_prices() {
    let app = test_app().await;
    send(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({"username": "carla", "password": "secret"})),
    )
    .await;

    let payload = json!({"product": "Arroz", "establishment": "Mercado A", "amount": "5.50"});
    let (status, _) = send(
        &app,
        "POST",
        "/prices",
        Some(("carla", "secret")),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/prices",
        Some(("admin", "admin123")),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["name"], "Arroz");
    assert_eq!(body["price"]["amount"], 550);
}

#[tokio::test]
async fn invalid_amounts_are_rejected() {
    let app = test_app().await;
    let auth = Some(("admin", "admin123"));

    for amount in ["abc", "-1", "1.234", ""] {
        let (status, _) = send(
            &app,
            "POST",
            "/prices",
            auth,
            Some(json!({"product": "Arroz", "establishment": "Mercado A", "amount": amount})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "amount {amount:?}");
    }

    // Nothing was created by the failed attempts.
    let (_, body) = send(&app, "GET", "/products", auth, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_and_autocomplete() {
    let app = test_app().await;
    let auth = Some(("admin", "admin123"));

    for (product, market, amount) in [
        ("Arroz", "Mercado A", "7.00"),
        ("Arroz", "Mercado B", "4,50"),
        ("Feijão", "Mercado A", "3.00"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/prices",
            auth,
            Some(json!({"product": product, "establishment": market, "amount": amount})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        "GET",
        "/products/autocomplete?q=ar",
        auth,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Arroz"]));

    let (status, body) = send(
        &app,
        "POST",
        "/prices/search",
        auth,
        Some(json!({"name": "Arroz"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let amounts: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|quote| quote["amount"].as_i64().unwrap())
        .collect();
    assert_eq!(amounts, vec![450, 700]);

    let (status, _) = send(
        &app,
        "POST",
        "/prices/search",
        auth,
        Some(json!({"name": "Sushi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn basket_ranking_over_http() {
    let app = test_app().await;
    let auth = Some(("admin", "admin123"));

    for (product, market, amount) in [
        ("Rice", "A", "5.00"),
        ("Beans", "A", "3.00"),
        ("Rice", "B", "4.00"),
    ] {
        send(
            &app,
            "POST",
            "/prices",
            auth,
            Some(json!({"product": product, "establishment": market, "amount": amount})),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "POST",
        "/basket",
        auth,
        Some(json!({"items": "Rice, Beans"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ranking = body.as_array().unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0]["establishment"]["name"], "A");
    assert_eq!(ranking[0]["total"], 800);

    let (status, _) = send(
        &app,
        "POST",
        "/basket",
        auth,
        Some(json!({"items": "Rice, Sushi", "on_unmatched": "reject"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
