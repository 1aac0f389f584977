use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializable body")))
        .expect("request builds")
}

#[tokio::test]
async fn preview_route_returns_score_and_display() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let body = serde_json::to_value(reference_input()).expect("input serializes");

    let response = router
        .oneshot(json_request("POST", "/api/v1/setups/preview", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["grade"], json!("A+"));
    assert_eq!(payload["display"]["percent"], json!("100%"));
    assert_eq!(payload["display"]["tier"], json!("good"));
    assert_eq!(payload["parts"]["missed_must"], json!(false));
}

#[tokio::test]
async fn preview_route_defaults_the_rubric() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let body = json!({
        "rules": [{ "id": "r1", "type": "MUST", "weight": 1 }],
        "rules_checked": { "r1": true },
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/setups/preview", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    // Default rubric weighs rules at 0.7 and there are no confluences.
    assert_eq!(payload["grade"], json!("C"));
    assert_eq!(payload["parts"]["conf_pct"], serde_json::Value::Null);
}

#[tokio::test]
async fn validate_route_reports_errors_and_warnings() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let body = json!({
        "weight_rules": 0.5,
        "weight_confluences": 0.2,
        "must_rule_penalty": 0.4,
        "grade_cutoffs": { "A": 1.2 },
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/rubrics/validate", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["valid"], json!(false));
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("'A'"));
    assert_eq!(payload["warnings"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn commit_route_freezes_once() {
    let (service, _) = build_service();
    let router = router_with_service(service);
    let body = serde_json::to_value(reference_input()).expect("input serializes");

    let created = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/trades/t-100/setup", &body))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let payload = read_json_body(created).await;
    assert_eq!(payload["trade_id"], json!("t-100"));
    assert_eq!(payload["setup_grade"], json!("A+"));

    let conflict = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/trades/t-100/setup", &body))
        .await
        .expect("route executes");
    assert_eq!(conflict.status(), StatusCode::CONFLICT);

    let fetched = router
        .oneshot(
            Request::get("/api/v1/trades/t-100/setup")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(fetched.status(), StatusCode::OK);
    let payload = read_json_body(fetched).await;
    assert_eq!(payload["setup_grade"], json!("A+"));
}

#[tokio::test]
async fn commit_route_rejects_invalid_rubric() {
    let (service, repository) = build_service();
    let router = router_with_service(service);
    let mut input = reference_input();
    input.rubric.weight_rules = 1.5;
    let body = serde_json::to_value(input).expect("input serializes");

    let response = router
        .oneshot(json_request("POST", "/api/v1/trades/t-200/setup", &body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn snapshot_route_returns_not_found_for_unknown_trade() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::get("/api/v1/trades/missing/setup")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some());
}
