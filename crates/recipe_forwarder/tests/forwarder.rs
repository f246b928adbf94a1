use std::sync::{Arc, Once};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use recipe_forwarder::{router, ForwarderConfig, ForwarderState};
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recipe_logging::initialize_for_tests);
}

fn app(api_key: Option<&str>, base_url: &str) -> Router {
    let config = ForwarderConfig {
        port: 0,
        api_key: api_key.map(ToOwned::to_owned),
        base_url: Url::parse(base_url).unwrap(),
    };
    router(ForwarderState::new(config).unwrap())
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn missing_key_fails_every_action() {
    init_logging();
    for uri in [
        "/api/recipes?action=search&query=soup",
        "/api/recipes?action=categories",
        "/api/recipes?action=bogus",
        "/api/recipes?action=search&query=a&query=b",
    ] {
        let (status, body) = get_json(app(None, "http://127.0.0.1:9"), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "API key not configured" }));
    }
}

#[tokio::test]
async fn options_succeeds_without_key() {
    init_logging();
    let (status, body) = send(
        app(None, "http://127.0.0.1:9"),
        Method::OPTIONS,
        "/api/recipes?action=search",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    init_logging();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/recipes")
        .header(header::ORIGIN, "https://recipes.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app(None, "http://127.0.0.1:9").oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn validation_errors_are_400() {
    init_logging();
    let (status, body) = get_json(app(Some("k"), "http://127.0.0.1:9"), "/api/recipes?action=detail").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Recipe ID is required" }));

    let (status, body) = get_json(app(Some("k"), "http://127.0.0.1:9"), "/api/recipes?action=nutrition").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Invalid action. Use: search, random, detail, byCategory, categories" })
    );

    let (status, _) = get_json(
        app(Some("k"), "http://127.0.0.1:9"),
        "/api/recipes?action=search&query=soup&offset=-1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn repeated_parameters_use_last_value() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .and(query_param("query", "ramen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "offset": 0,
            "number": 12,
            "totalResults": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(
        app(Some("k"), &server.uri()),
        "/api/recipes?action=search&query=udon&query=ramen",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 0);
}

#[tokio::test]
async fn categories_are_generated_locally() {
    init_logging();
    let (status, body) = get_json(app(Some("k"), "http://127.0.0.1:9"), "/api/recipes?action=categories").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 12);
    assert_eq!(categories[0]["id"], "italian");
    assert_eq!(categories[0]["name"], "Italian");
}

#[tokio::test]
async fn success_is_relayed_verbatim() {
    init_logging();
    let server = MockServer::start().await;
    let upstream = r#"{"results":[{"id":1,"title":"Tom Yum"}],"offset":0,"number":12,"totalResults":1}"#;
    Mock::given(method("GET"))
        .and(path("/recipes/complexSearch"))
        .and(query_param("apiKey", "secret"))
        .and(query_param("cuisine", "thai"))
        .and(query_param("number", "12"))
        .and(query_param("offset", "0"))
        .and(query_param("addRecipeInformation", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app(Some("secret"), &server.uri()),
        Method::POST,
        "/api/recipes?action=byCategory&cuisine=thai",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), upstream);
}

#[tokio::test]
async fn upstream_failure_keeps_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/42/information"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "status": "failure",
            "code": 402,
            "message": "Your daily points limit of 150 has been reached."
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/recipes/random"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(Some("k"), &server.uri()), "/api/recipes?action=detail&id=42").await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(
        body,
        json!({ "error": "Your daily points limit of 150 has been reached." })
    );

    let (status, body) = get_json(app(Some("k"), &server.uri()), "/api/recipes?action=random").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "API request failed" }));
}

#[tokio::test]
async fn unreachable_provider_is_internal_error() {
    init_logging();
    // Nothing listens on the discard port.
    let (status, body) = get_json(app(Some("k"), "http://127.0.0.1:9"), "/api/recipes?action=random").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}
