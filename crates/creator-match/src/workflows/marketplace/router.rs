//! HTTP endpoints for natural search, structured listing, and campaign
//! recommendations.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::domain::{CampaignId, FilterSet, Platform, SortKey, ValidationError};
use super::recommend::{RecommendError, RecommendationEngine};
use super::repository::{CampaignRepository, InfluencerRepository, RepositoryError};
use super::search::{SearchService, DEFAULT_SEARCH_LIMIT};

/// Shared state for the discovery endpoints.
pub struct DiscoveryState<R, C> {
    pub search: Arc<SearchService<R>>,
    pub engine: Arc<RecommendationEngine<C, R>>,
}

impl<R, C> Clone for DiscoveryState<R, C> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            engine: self.engine.clone(),
        }
    }
}

/// Router builder exposing the discovery endpoints.
pub fn discovery_router<R, C>(state: DiscoveryState<R, C>) -> Router
where
    R: InfluencerRepository + 'static,
    C: CampaignRepository + 'static,
{
    Router::new()
        .route("/api/v1/search/natural", post(natural_search_handler::<R, C>))
        .route(
            "/api/v1/search/recommendations/:campaign_id",
            get(recommendations_handler::<R, C>),
        )
        .route("/api/v1/influencers", get(list_influencers_handler::<R, C>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NaturalSearchRequest {
    query: String,
    #[serde(default)]
    limit: Option<usize>,
}

pub(crate) async fn natural_search_handler<R, C>(
    State(state): State<DiscoveryState<R, C>>,
    Json(payload): Json<NaturalSearchRequest>,
) -> Response
where
    R: InfluencerRepository + 'static,
    C: CampaignRepository + 'static,
{
    let limit = payload.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    match state.search.natural_search(&payload.query, limit).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => repository_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InfluencerListQuery {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    min_followers: Option<u64>,
    #[serde(default)]
    max_followers: Option<u64>,
    #[serde(default)]
    min_engagement: Option<f64>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    min_authenticity: Option<f64>,
    #[serde(default)]
    sort_by: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

pub(crate) async fn list_influencers_handler<R, C>(
    State(state): State<DiscoveryState<R, C>>,
    Query(query): Query<InfluencerListQuery>,
) -> Response
where
    R: InfluencerRepository + 'static,
    C: CampaignRepository + 'static,
{
    let platform = match query.platform.as_deref().map(Platform::parse).transpose() {
        Ok(platform) => platform,
        Err(err) => return validation_response(err),
    };
    let sort = match query.sort_by.as_deref().map(SortKey::parse).transpose() {
        Ok(sort) => sort.unwrap_or_default(),
        Err(err) => return validation_response(err),
    };

    let filters = FilterSet {
        category: query.category,
        min_followers: query.min_followers,
        max_followers: query.max_followers,
        min_engagement: query.min_engagement,
        location: query.location,
        platform,
        min_authenticity: query.min_authenticity,
    };

    match state
        .search
        .list(&filters, sort, query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => repository_error_response(err),
    }
}

pub(crate) async fn recommendations_handler<R, C>(
    State(state): State<DiscoveryState<R, C>>,
    Path(campaign_id): Path<Uuid>,
) -> Response
where
    R: InfluencerRepository + 'static,
    C: CampaignRepository + 'static,
{
    match state.engine.recommend(&CampaignId(campaign_id)).await {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(err @ RecommendError::CampaignNotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

fn repository_error_response(error: RepositoryError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}

fn validation_response(error: ValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}
