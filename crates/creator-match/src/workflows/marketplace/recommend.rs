//! Campaign-driven candidate recommendation.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::assistant::{MatchExplainer, TemplateExplainer};
use super::domain::{CampaignId, FilterSet, InfluencerProfile, SortKey};
use super::repository::{CampaignRepository, InfluencerRepository, RepositoryError};
use super::search;

/// Influencers below this authenticity floor are never recommended,
/// campaign filters notwithstanding.
pub const RECOMMENDATION_TRUST_FLOOR: f64 = 70.0;
/// Upper bound on candidates returned per campaign.
pub const RECOMMENDATION_LIMIT: usize = 10;
/// Lead candidates handed to the explainer, in ranked order.
const EXPLAINED_CANDIDATES: usize = 3;

/// Ranked candidates plus the reasoning text shown to the brand.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignRecommendation {
    pub campaign_id: CampaignId,
    pub recommendations: Vec<InfluencerProfile>,
    pub reasoning: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("campaign not found")]
    CampaignNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Engine composing campaign-derived filters, the trust floor, and the
/// explainer.
pub struct RecommendationEngine<C, I> {
    campaigns: Arc<C>,
    influencers: Arc<I>,
    explainer: Arc<dyn MatchExplainer>,
}

impl<C, I> RecommendationEngine<C, I>
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
{
    pub fn new(
        campaigns: Arc<C>,
        influencers: Arc<I>,
        explainer: Arc<dyn MatchExplainer>,
    ) -> Self {
        Self {
            campaigns,
            influencers,
            explainer,
        }
    }

    pub async fn recommend(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignRecommendation, RecommendError> {
        let campaign = self
            .campaigns
            .fetch(campaign_id)?
            .ok_or(RecommendError::CampaignNotFound)?;

        let filters = FilterSet {
            min_authenticity: Some(RECOMMENDATION_TRUST_FLOOR),
            ..campaign.candidate_filters()
        };

        // Responsiveness over reach: rank by engagement, not audience size.
        let outcome = search::select(
            self.influencers.list()?,
            &filters,
            SortKey::EngagementRate,
            RECOMMENDATION_LIMIT,
        );

        let lead_names: Vec<String> = outcome
            .results
            .iter()
            .take(EXPLAINED_CANDIDATES)
            .map(|profile| profile.display_name.clone())
            .collect();

        let reasoning = match self
            .explainer
            .explain(&campaign.title, campaign.category.as_deref(), &lead_names)
            .await
        {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "explainer failed without fallback; using template");
                TemplateExplainer::explain_selection(
                    &campaign.title,
                    campaign.category.as_deref(),
                    &lead_names,
                )
            }
        };

        Ok(CampaignRecommendation {
            campaign_id: campaign.id,
            recommendations: outcome.results,
            reasoning,
        })
    }
}
