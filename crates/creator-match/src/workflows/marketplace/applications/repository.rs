use super::super::domain::{CampaignId, InfluencerId};
use super::super::repository::RepositoryError;
use super::domain::{ApplicationId, CampaignApplication};

/// Storage abstraction for campaign applications.
///
/// `insert` must enforce (campaign, influencer) uniqueness as a backstop:
/// the service pre-checks, but concurrent applies for the same pair can
/// only be serialized by the store.
pub trait ApplicationRepository: Send + Sync {
    fn insert(
        &self,
        application: CampaignApplication,
    ) -> Result<CampaignApplication, RepositoryError>;
    fn update(&self, application: CampaignApplication) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<CampaignApplication>, RepositoryError>;
    fn find_for_pair(
        &self,
        campaign_id: &CampaignId,
        influencer_id: &InfluencerId,
    ) -> Result<Option<CampaignApplication>, RepositoryError>;
    fn list_for_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<CampaignApplication>, RepositoryError>;
    fn list_for_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<CampaignApplication>, RepositoryError>;
}
