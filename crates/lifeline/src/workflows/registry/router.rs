use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use super::domain::{
    DonorId, DonorRegistration, NewBloodRequest, NewDonation, RequestId, RequestStatus,
};
use super::repository::{DonationLedger, DonorDirectory, RequestBoard};
use super::search::DonorQuery;
use super::service::RegistryService;
use crate::error::AppError;

/// Router builder exposing donor, donation, request and dashboard endpoints.
pub fn registry_router<D, L, B>(service: Arc<RegistryService<D, L, B>>) -> Router
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    Router::new()
        .route(
            "/api/v1/donors",
            post(register_handler::<D, L, B>).get(search_handler::<D, L, B>),
        )
        .route(
            "/api/v1/donors/:donor_id/donations",
            post(donation_handler::<D, L, B>),
        )
        .route(
            "/api/v1/requests",
            post(post_request_handler::<D, L, B>).get(open_requests_handler::<D, L, B>),
        )
        .route(
            "/api/v1/requests/:request_id/status",
            post(request_status_handler::<D, L, B>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<D, L, B>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: RequestStatus,
}

pub(crate) async fn register_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
    axum::Json(registration): axum::Json<DonorRegistration>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.register_donor(registration) {
        Ok(donor) => (StatusCode::CREATED, axum::Json(donor)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn search_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
    Query(query): Query<DonorQuery>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.find_donors(&query) {
        Ok(donors) => (StatusCode::OK, axum::Json(donors)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn donation_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
    Path(donor_id): Path<String>,
    axum::Json(donation): axum::Json<NewDonation>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.record_donation(&DonorId(donor_id), donation) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn post_request_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
    axum::Json(request): axum::Json<NewBloodRequest>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.post_request(request) {
        Ok(posted) => (StatusCode::CREATED, axum::Json(posted)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn open_requests_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.open_requests() {
        Ok(requests) => (StatusCode::OK, axum::Json(requests)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn request_status_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
    Path(request_id): Path<String>,
    axum::Json(update): axum::Json<StatusUpdate>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.update_request_status(&RequestId(request_id), update.status) {
        Ok(request) => (StatusCode::OK, axum::Json(request)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn dashboard_handler<D, L, B>(
    State(service): State<Arc<RegistryService<D, L, B>>>,
) -> Response
where
    D: DonorDirectory + 'static,
    L: DonationLedger + 'static,
    B: RequestBoard + 'static,
{
    match service.dashboard() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
