use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use creator_match::config::AppConfig;
use creator_match::error::AppError;
use creator_match::telemetry;
use creator_match::workflows::marketplace::applications::CampaignApplicationService;
use creator_match::workflows::marketplace::assistant;
use creator_match::workflows::marketplace::{RecommendationEngine, SearchService};

use crate::cli::ServeArgs;
use crate::demo::seed_marketplace;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryCampaignRepository,
    InMemoryInfluencerRepository,
};
use crate::routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let influencers = Arc::new(InMemoryInfluencerRepository::default());
    let campaigns = Arc::new(InMemoryCampaignRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    seed_marketplace(&influencers, &campaigns);
    info!(
        influencers = influencers.len(),
        campaigns = campaigns.len(),
        "seeded in-memory marketplace"
    );

    let interpreter = assistant::interpreter_from_config(&config.assistant);
    let explainer = assistant::explainer_from_config(&config.assistant);
    if config.assistant.api_key.is_some() {
        info!(model = %config.assistant.model, "language model configured with keyword fallback");
    } else {
        info!("no language model configured; running deterministic interpretation only");
    }

    let search = Arc::new(SearchService::new(influencers.clone(), interpreter));
    let engine = Arc::new(RecommendationEngine::new(
        campaigns.clone(),
        influencers.clone(),
        explainer,
    ));
    let workflow = Arc::new(CampaignApplicationService::new(
        campaigns,
        influencers,
        applications,
    ));

    let app = routes::router(search, engine, workflow)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "creator match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
