use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::registry::{DonorDirectory, InMemoryDonorDirectory};
use crate::workflows::rewards::{rewards_router, ProgressionEngine, RewardCatalog, RewardsService};

fn router() -> axum::Router {
    rewards_router(Arc::new(seeded_service()))
}

#[tokio::test]
async fn catalog_endpoint_lists_tiers_in_display_order() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/rewards/catalog")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["redemption_threshold"], json!(2));
    let tiers = body["tiers"].as_array().expect("tiers array");
    assert_eq!(tiers.len(), 8);
    assert_eq!(tiers[6]["name"], json!("Gallon Club"));
    assert_eq!(tiers[6]["required_donations"], json!(8));
}

#[tokio::test]
async fn evaluate_endpoint_returns_classification() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rewards/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "donation_count": 2 }).to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["donation_count"], json!(2));
    assert_eq!(body["is_eligible"], json!(true));
    assert_eq!(body["earned_tiers"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["next_tier"]["name"], json!("Triple Threat"));
    assert_eq!(body["remaining_to_next"], json!(1));
}

#[tokio::test]
async fn evaluate_endpoint_rejects_negative_counts() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rewards/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "donation_count": -3 }).to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("negative"));
}

#[tokio::test]
async fn donor_rewards_endpoint_flattens_result() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/donors/donor-3/rewards")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["donor"]["name"], json!("Grace"));
    assert_eq!(body["donor"]["blood_type"], json!("O+"));
    assert_eq!(body["donation_count"], json!(1));
    assert_eq!(body["is_eligible"], json!(false));
    assert_eq!(body["total_tiers"], json!(8));
}

#[tokio::test]
async fn donor_rewards_endpoint_returns_not_found() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/donors/donor-404/rewards")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leaderboard_endpoint_honours_limit() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/rewards/leaderboard?limit=2")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let board = body.as_array().expect("leaderboard array");
    assert_eq!(board.len(), 2);
    assert_eq!(board[0]["donor"]["name"], json!("Ada"));
    assert_eq!(board[1]["donor"]["name"], json!("Grace"));
}

#[tokio::test]
async fn ledger_outage_maps_to_internal_error() {
    let donors = Arc::new(InMemoryDonorDirectory::default());
    donors
        .insert(donor("donor-1", "Linus"))
        .expect("insert donor");
    let service = RewardsService::new(
        donors,
        Arc::new(OfflineLedger),
        RewardCatalog::standard(),
        ProgressionEngine::default(),
    );

    let response = rewards_router(Arc::new(service))
        .oneshot(
            Request::builder()
                .uri("/api/v1/donors/donor-1/rewards")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("database offline"));
}
