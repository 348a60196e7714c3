use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::scoring::domain::Category;
use crate::scoring::router::scoring_router;
use crate::scoring::service::TabulationService;
use crate::scoring::store::ScoreStore;

fn submit_request(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/scores")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serializable body"),
        ))
        .expect("valid request")
}

fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("valid request")
}

#[tokio::test]
async fn submit_route_accepts_payloads() {
    let (service, store) = build_service();
    let router = scoring_router(Arc::new(service));

    let response = router
        .oneshot(submit_request(json!({
            "category": "interview",
            "judgeName": "Judge Reyes",
            "candidateNumber": "3",
            "totalScore": 95.0,
            "scores": {
                "Wit and Content": 40.0,
                "Projection and Delivery": 30.0,
                "Stage Presence": 15.0,
                "Overall Impact": 10.0,
            },
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "success");

    let rows = store.read_all(Category::Interview).expect("rows readable");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].candidate.0, "3");
}

#[tokio::test]
async fn results_route_returns_ranked_envelope() {
    let (service, _) = build_service();
    service
        .submit_score(submission(
            "gown",
            "Judge Reyes",
            "1",
            80.0,
            &proportional_split(Category::Gown, 80.0),
        ))
        .expect("submission accepted");
    service
        .submit_score(submission(
            "gown",
            "Judge Santos",
            "2",
            92.0,
            &proportional_split(Category::Gown, 92.0),
        ))
        .expect("submission accepted");

    let router = scoring_router(Arc::new(service));
    let response = router
        .oneshot(get_request("/api/v1/results/gown"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "success");

    let results = payload["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    // Ranked descending: candidate 2 outscored candidate 1.
    assert_eq!(results[0]["candidate"], "2");
    assert_eq!(results[0]["judgeCount"], 1);
    assert!(results[0]["totalScore"].as_f64().expect("numeric score")
        > results[1]["totalScore"].as_f64().expect("numeric score"));
    assert!(results[0]["scores"]["Poise and Bearing"].is_number());
}

#[tokio::test]
async fn unknown_category_maps_to_bad_request() {
    let (service, _) = build_service();
    let router = scoring_router(Arc::new(service));

    let response = router
        .oneshot(get_request("/api/v1/results/swimsuit"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "error");
    assert!(payload["message"]
        .as_str()
        .expect("message present")
        .contains("swimsuit"));
}

#[tokio::test]
async fn validation_failure_maps_to_unprocessable_entity() {
    let (service, _) = build_service();
    let router = scoring_router(Arc::new(service));

    let response = router
        .oneshot(submit_request(json!({
            "category": "interview",
            "judgeName": "",
            "candidateNumber": "3",
            "totalScore": 95.0,
            "scores": {},
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "error");
}

#[tokio::test]
async fn recompute_route_reports_candidate_count() {
    let (service, _) = build_service();
    service
        .submit_score(submission(
            "sports",
            "Judge Lim",
            "5",
            84.0,
            &proportional_split(Category::Sports, 84.0),
        ))
        .expect("submission accepted");

    let router = scoring_router(Arc::new(service));
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/overall/recompute")
                .body(axum::body::Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["candidates"], 1);
}

#[tokio::test]
async fn storage_failure_maps_to_internal_error() {
    let service = TabulationService::new(Arc::new(UnavailableStore));
    let router = scoring_router(Arc::new(service));

    let response = router
        .oneshot(get_request("/api/v1/results/talent"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "error");
}
