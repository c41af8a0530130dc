//! Integration specifications for the discovery side: natural-language
//! search, structured listing, and campaign recommendations, exercised
//! through the public service facades and HTTP router.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use uuid::Uuid;

    use creator_match::workflows::marketplace::{
        Campaign, CampaignId, CampaignRepository, CampaignStatus, InfluencerId,
        InfluencerProfile, InfluencerRepository, RepositoryError,
    };

    #[derive(Default, Clone)]
    pub(super) struct MemoryInfluencers {
        profiles: Arc<Mutex<BTreeMap<InfluencerId, InfluencerProfile>>>,
    }

    impl MemoryInfluencers {
        pub(super) fn insert(&self, profile: InfluencerProfile) {
            self.profiles
                .lock()
                .expect("lock")
                .insert(profile.id, profile);
        }
    }

    impl InfluencerRepository for MemoryInfluencers {
        fn fetch(
            &self,
            id: &InfluencerId,
        ) -> Result<Option<InfluencerProfile>, RepositoryError> {
            Ok(self.profiles.lock().expect("lock").get(id).cloned())
        }

        fn list(&self) -> Result<Vec<InfluencerProfile>, RepositoryError> {
            Ok(self
                .profiles
                .lock()
                .expect("lock")
                .values()
                .cloned()
                .collect())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryCampaigns {
        campaigns: Arc<Mutex<BTreeMap<CampaignId, Campaign>>>,
    }

    impl MemoryCampaigns {
        pub(super) fn insert(&self, campaign: Campaign) {
            self.campaigns
                .lock()
                .expect("lock")
                .insert(campaign.id, campaign);
        }
    }

    impl CampaignRepository for MemoryCampaigns {
        fn fetch(&self, id: &CampaignId) -> Result<Option<Campaign>, RepositoryError> {
            Ok(self.campaigns.lock().expect("lock").get(id).cloned())
        }
    }

    pub(super) fn profile(
        name: &str,
        category: &str,
        followers: u64,
        engagement: f64,
        authenticity: f64,
        location: &str,
    ) -> InfluencerProfile {
        InfluencerProfile {
            id: InfluencerId(Uuid::new_v4()),
            display_name: name.to_string(),
            bio: None,
            avatar_url: None,
            categories: vec![category.to_string()],
            instagram_handle: Some(format!("{}.ig", name.to_lowercase().replace(' ', "."))),
            tiktok_handle: None,
            youtube_handle: None,
            follower_count: followers,
            engagement_rate: engagement,
            avg_likes: (followers as f64 * engagement) as u64,
            avg_comments: (followers as f64 * engagement / 30.0) as u64,
            authenticity_score: authenticity,
            fake_follower_pct: 100.0 - authenticity,
            location: Some(location.to_string()),
            is_verified: false,
        }
    }

    /// A marketplace with creators on both sides of every interesting
    /// threshold.
    pub(super) fn seeded_influencers() -> MemoryInfluencers {
        let influencers = MemoryInfluencers::default();
        influencers.insert(profile("Lena Glow", "beauty", 45_000, 0.05, 88.0, "Los Angeles, US"));
        influencers.insert(profile("Priya Sharma", "beauty", 60_000, 0.045, 62.0, "Mumbai, IN"));
        influencers.insert(profile("Nano Nina", "beauty", 5_000, 0.09, 95.0, "London, UK"));
        influencers.insert(profile("Maya Fit", "fitness", 25_000, 0.06, 91.0, "London, UK"));
        influencers.insert(profile("Cole Strong", "fitness", 100_000, 0.03, 80.0, "Austin, US"));
        influencers.insert(profile("Jo Gains", "fitness", 8_000, 0.08, 65.0, "Denver, US"));
        influencers.insert(profile("Kai Travels", "travel", 900_000, 0.015, 75.0, "Bali, ID"));
        influencers
    }

    pub(super) fn fitness_campaign(id: CampaignId) -> Campaign {
        Campaign {
            id,
            brand_id: creator_match::workflows::marketplace::BrandId(Uuid::new_v4()),
            title: "Spring fitness push".to_string(),
            category: Some("fitness".to_string()),
            min_followers: Some(5_000),
            min_engagement_rate: Some(0.02),
            status: CampaignStatus::Active,
            created_at: Utc::now(),
        }
    }
}

mod search {
    use std::sync::Arc;

    use creator_match::workflows::marketplace::assistant::KeywordInterpreter;
    use creator_match::workflows::marketplace::{FilterSet, SearchService, SortKey};

    use super::common::seeded_influencers;

    #[tokio::test]
    async fn natural_search_applies_the_interpreted_filters() {
        let influencers = Arc::new(seeded_influencers());
        let service = SearchService::new(influencers, Arc::new(KeywordInterpreter));

        let outcome = service
            .natural_search("micro influencers in beauty with authentic audience", 20)
            .await
            .expect("search succeeds");

        assert_eq!(
            outcome.interpreted_filters,
            FilterSet {
                category: Some("beauty".to_string()),
                min_followers: Some(10_000),
                max_followers: Some(100_000),
                min_authenticity: Some(80.0),
                ..FilterSet::default()
            }
        );
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.results[0].display_name, "Lena Glow");
    }

    #[tokio::test]
    async fn natural_search_total_ignores_the_limit() {
        let influencers = Arc::new(seeded_influencers());
        let service = SearchService::new(influencers, Arc::new(KeywordInterpreter));

        let outcome = service
            .natural_search("fitness creators", 1)
            .await
            .expect("search succeeds");

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.total, 3);
        // Default ordering is reach, descending.
        assert_eq!(outcome.results[0].display_name, "Cole Strong");
    }

    #[test]
    fn structured_listing_is_idempotent() {
        let influencers = Arc::new(seeded_influencers());
        let service = SearchService::new(influencers, Arc::new(KeywordInterpreter));

        let filters = FilterSet {
            min_followers: Some(10_000),
            ..FilterSet::default()
        };

        let first = service
            .list(&filters, SortKey::EngagementRate, 10)
            .expect("list succeeds");
        let second = service
            .list(&filters, SortKey::EngagementRate, 10)
            .expect("list succeeds");

        assert_eq!(first.total, second.total);
        let names = |outcome: &creator_match::workflows::marketplace::SearchOutcome| {
            outcome
                .results
                .iter()
                .map(|profile| profile.display_name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }
}

mod fallback {
    use std::sync::Arc;

    use async_trait::async_trait;
    use creator_match::workflows::marketplace::assistant::{
        AssistantError, KeywordInterpreter, QueryInterpreter, ResilientInterpreter,
    };
    use creator_match::workflows::marketplace::SearchService;

    use super::common::seeded_influencers;

    struct OutageInterpreter;

    #[async_trait]
    impl QueryInterpreter for OutageInterpreter {
        async fn interpret(
            &self,
            _query: &str,
        ) -> Result<creator_match::workflows::marketplace::FilterSet, AssistantError> {
            Err(AssistantError::Api("upstream 503".to_string()))
        }
    }

    #[tokio::test]
    async fn remote_outage_degrades_to_keyword_rules() {
        let influencers = Arc::new(seeded_influencers());
        let resilient = Arc::new(ResilientInterpreter::new(
            OutageInterpreter,
            KeywordInterpreter,
        ));
        let service = SearchService::new(influencers, resilient);

        let outcome = service
            .natural_search("micro influencers in beauty with authentic audience", 20)
            .await
            .expect("search still answers");

        assert_eq!(outcome.interpreted_filters.category.as_deref(), Some("beauty"));
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.results[0].display_name, "Lena Glow");
    }
}

mod recommendations {
    use std::sync::Arc;

    use creator_match::workflows::marketplace::assistant::TemplateExplainer;
    use creator_match::workflows::marketplace::{
        CampaignId, RecommendError, RecommendationEngine,
    };
    use uuid::Uuid;

    use super::common::{fitness_campaign, seeded_influencers, MemoryCampaigns};

    fn build_engine() -> (
        RecommendationEngine<MemoryCampaigns, super::common::MemoryInfluencers>,
        CampaignId,
    ) {
        let influencers = Arc::new(seeded_influencers());
        let campaigns = Arc::new(MemoryCampaigns::default());
        let campaign_id = CampaignId(Uuid::new_v4());
        campaigns.insert(fitness_campaign(campaign_id));
        let engine =
            RecommendationEngine::new(campaigns, influencers, Arc::new(TemplateExplainer));
        (engine, campaign_id)
    }

    #[tokio::test]
    async fn low_trust_candidates_are_never_recommended() {
        let (engine, campaign_id) = build_engine();

        let recommendation = engine
            .recommend(&campaign_id)
            .await
            .expect("recommendation succeeds");

        let names: Vec<&str> = recommendation
            .recommendations
            .iter()
            .map(|profile| profile.display_name.as_str())
            .collect();

        // Jo Gains matches every campaign filter but sits below the trust
        // floor of 70.
        assert!(!names.contains(&"Jo Gains"));
        // Ranked by engagement, not reach.
        assert_eq!(names, ["Maya Fit", "Cole Strong"]);
    }

    #[tokio::test]
    async fn reasoning_names_the_lead_candidates() {
        let (engine, campaign_id) = build_engine();

        let recommendation = engine
            .recommend(&campaign_id)
            .await
            .expect("recommendation succeeds");

        assert!(recommendation.reasoning.contains("Spring fitness push"));
        assert!(recommendation.reasoning.contains("Maya Fit"));
        assert!(recommendation.reasoning.contains("in the fitness space"));
    }

    #[tokio::test]
    async fn unknown_campaign_is_not_found() {
        let (engine, _) = build_engine();

        match engine.recommend(&CampaignId(Uuid::new_v4())).await {
            Err(RecommendError::CampaignNotFound) => {}
            other => panic!("expected campaign not found, got {other:?}"),
        }
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use creator_match::workflows::marketplace::assistant::{KeywordInterpreter, TemplateExplainer};
    use creator_match::workflows::marketplace::{
        discovery_router, CampaignId, DiscoveryState, RecommendationEngine, SearchService,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::common::{fitness_campaign, seeded_influencers, MemoryCampaigns};

    fn build_router() -> (axum::Router, CampaignId) {
        let influencers = Arc::new(seeded_influencers());
        let campaigns = Arc::new(MemoryCampaigns::default());
        let campaign_id = CampaignId(Uuid::new_v4());
        campaigns.insert(fitness_campaign(campaign_id));

        let search = Arc::new(SearchService::new(
            influencers.clone(),
            Arc::new(KeywordInterpreter),
        ));
        let engine = Arc::new(RecommendationEngine::new(
            campaigns,
            influencers,
            Arc::new(TemplateExplainer),
        ));

        (discovery_router(DiscoveryState { search, engine }), campaign_id)
    }

    async fn body_json(body: Body) -> Value {
        let bytes = to_bytes(body, 1024 * 1024).await.expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn natural_search_endpoint_reports_interpretation() {
        let (router, _) = build_router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/search/natural")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "query": "micro influencers in beauty with authentic audience" })
                    .to_string(),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response.into_body()).await;
        assert_eq!(
            payload
                .get("interpreted_filters")
                .and_then(|filters| filters.get("category")),
            Some(&json!("beauty"))
        );
        assert_eq!(payload.get("total"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn recommendations_endpoint_returns_reasoning() {
        let (router, campaign_id) = build_router();
        let request = Request::builder()
            .method("GET")
            .uri(format!(
                "/api/v1/search/recommendations/{}",
                campaign_id.0
            ))
            .body(Body::empty())
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response.into_body()).await;
        assert!(payload
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .contains("Maya Fit"));
    }

    #[tokio::test]
    async fn recommendations_for_unknown_campaign_return_not_found() {
        let (router, _) = build_router();
        let request = Request::builder()
            .method("GET")
            .uri(format!("/api/v1/search/recommendations/{}", Uuid::new_v4()))
            .body(Body::empty())
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_rejects_unknown_sort_fields() {
        let (router, _) = build_router();
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/influencers?sort_by=popularity")
            .body(Body::empty())
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn listing_filters_by_platform_handles() {
        let (router, _) = build_router();
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/influencers?platform=tiktok")
            .body(Body::empty())
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response.into_body()).await;
        // Every seeded creator only carries an Instagram handle.
        assert_eq!(payload.get("total"), Some(&json!(0)));
    }
}
