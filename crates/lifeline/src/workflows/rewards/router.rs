use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::RewardsService;
use crate::error::AppError;
use crate::workflows::registry::{DonationLedger, DonorDirectory, DonorId};

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Router builder exposing catalog, evaluation and per-donor progression endpoints.
pub fn rewards_router<D, L>(service: Arc<RewardsService<D, L>>) -> Router
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
{
    Router::new()
        .route("/api/v1/rewards/catalog", get(catalog_handler::<D, L>))
        .route("/api/v1/rewards/evaluate", post(evaluate_handler::<D, L>))
        .route(
            "/api/v1/rewards/leaderboard",
            get(leaderboard_handler::<D, L>),
        )
        .route(
            "/api/v1/donors/:donor_id/rewards",
            get(donor_rewards_handler::<D, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) donation_count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn catalog_handler<D, L>(
    State(service): State<Arc<RewardsService<D, L>>>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
{
    let payload = json!({
        "redemption_threshold": service.engine().redemption_threshold(),
        "tiers": service.catalog().list_tiers(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler<D, L>(
    State(service): State<Arc<RewardsService<D, L>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
{
    match service.evaluate_count(request.donation_count) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn leaderboard_handler<D, L>(
    State(service): State<Arc<RewardsService<D, L>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    match service.leaderboard(limit) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn donor_rewards_handler<D, L>(
    State(service): State<Arc<RewardsService<D, L>>>,
    Path(donor_id): Path<String>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
{
    match service.donor_progress(&DonorId(donor_id)) {
        Ok(progress) => (StatusCode::OK, axum::Json(progress)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
