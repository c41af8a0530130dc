use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::super::domain::{BrandId, CampaignId, InfluencerId, ValidationError};
use super::super::repository::{CampaignRepository, InfluencerRepository};
use super::domain::{ApplicationId, ApplicationStatus};
use super::repository::ApplicationRepository;
use super::service::{ApplicationServiceError, CampaignApplicationService};

/// Router builder exposing the application workflow endpoints.
pub fn application_router<C, I, A>(service: Arc<CampaignApplicationService<C, I, A>>) -> Router
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/campaigns/:campaign_id/applications",
            post(apply_handler::<C, I, A>).get(list_handler::<C, I, A>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/applications/:application_id",
            patch(update_status_handler::<C, I, A>),
        )
        .route(
            "/api/v1/influencers/:influencer_id/applications",
            get(influencer_applications_handler::<C, I, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    influencer_id: Uuid,
    #[serde(default)]
    pitch: Option<String>,
}

pub(crate) async fn apply_handler<C, I, A>(
    State(service): State<Arc<CampaignApplicationService<C, I, A>>>,
    Path(campaign_id): Path<Uuid>,
    Json(payload): Json<ApplyRequest>,
) -> Response
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.apply(
        &CampaignId(campaign_id),
        &InfluencerId(payload.influencer_id),
        payload.pitch,
    ) {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BrandQuery {
    brand_id: Uuid,
}

pub(crate) async fn list_handler<C, I, A>(
    State(service): State<Arc<CampaignApplicationService<C, I, A>>>,
    Path(campaign_id): Path<Uuid>,
    Query(query): Query<BrandQuery>,
) -> Response
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_for_campaign(&CampaignId(campaign_id), &BrandId(query.brand_id)) {
        Ok(views) => (StatusCode::OK, Json(json!({ "applications": views }))).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    brand_id: Uuid,
    status: String,
}

pub(crate) async fn update_status_handler<C, I, A>(
    State(service): State<Arc<CampaignApplicationService<C, I, A>>>,
    Path((campaign_id, application_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Response
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
    A: ApplicationRepository + 'static,
{
    let status = match ApplicationStatus::parse(&payload.status) {
        Ok(status) => status,
        Err(err) => return validation_response(err),
    };

    match service.update_status(
        &CampaignId(campaign_id),
        &ApplicationId(application_id),
        &BrandId(payload.brand_id),
        status,
    ) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn influencer_applications_handler<C, I, A>(
    State(service): State<Arc<CampaignApplicationService<C, I, A>>>,
    Path(influencer_id): Path<Uuid>,
) -> Response
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_for_influencer(&InfluencerId(influencer_id)) {
        Ok(views) => (StatusCode::OK, Json(json!({ "applications": views }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::AlreadyApplied => StatusCode::CONFLICT,
        ApplicationServiceError::CampaignNotFound
        | ApplicationServiceError::ApplicationNotFound => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

fn validation_response(error: ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}
