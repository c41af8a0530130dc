use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use creator_match::workflows::marketplace::applications::{
    application_router, CampaignApplicationService,
};
use creator_match::workflows::marketplace::{
    discovery_router, DiscoveryState, RecommendationEngine, SearchService,
};

use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryCampaignRepository,
    InMemoryInfluencerRepository,
};

type Workflow = CampaignApplicationService<
    InMemoryCampaignRepository,
    InMemoryInfluencerRepository,
    InMemoryApplicationRepository,
>;

pub(crate) fn router(
    search: Arc<SearchService<InMemoryInfluencerRepository>>,
    engine: Arc<RecommendationEngine<InMemoryCampaignRepository, InMemoryInfluencerRepository>>,
    workflow: Arc<Workflow>,
) -> Router {
    discovery_router(DiscoveryState { search, engine })
        .merge(application_router(workflow))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
