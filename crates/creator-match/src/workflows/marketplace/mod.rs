//! Creator-brand marketplace workflows.
//!
//! The module splits into the discovery side (trust scoring, query
//! interpretation, candidate search, campaign recommendation) and the
//! campaign-application workflow. Persistence is abstracted behind the
//! repository traits so the services can be exercised in isolation.

pub mod applications;
pub mod assistant;
pub mod domain;
pub mod recommend;
pub mod repository;
pub mod router;
pub mod search;
pub mod trust;

pub use domain::{
    BrandId, Campaign, CampaignId, CampaignStatus, EngagementStats, FilterSet, InfluencerId,
    InfluencerProfile, Platform, SortKey, TrustScore, ValidationError,
};
pub use recommend::{CampaignRecommendation, RecommendError, RecommendationEngine};
pub use repository::{CampaignRepository, InfluencerRepository, RepositoryError};
pub use router::{discovery_router, DiscoveryState};
pub use search::{NaturalSearchOutcome, SearchOutcome, SearchService, DEFAULT_SEARCH_LIMIT};
