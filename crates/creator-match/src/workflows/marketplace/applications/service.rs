use std::sync::Arc;

use chrono::Utc;

use super::super::domain::{BrandId, Campaign, CampaignId, InfluencerId};
use super::super::repository::{CampaignRepository, InfluencerRepository, RepositoryError};
use super::domain::{
    ApplicationId, ApplicationStatus, CampaignApplication, CampaignApplicationView,
    InfluencerApplicationView,
};
use super::repository::ApplicationRepository;

/// Service governing the campaign-application lifecycle. Ownership checks
/// deliberately answer NotFound rather than Forbidden so foreign campaigns
/// are indistinguishable from missing ones.
pub struct CampaignApplicationService<C, I, A> {
    campaigns: Arc<C>,
    influencers: Arc<I>,
    applications: Arc<A>,
}

/// Error raised by the application workflow.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("campaign not found")]
    CampaignNotFound,
    #[error("application not found")]
    ApplicationNotFound,
    #[error("already applied to this campaign")]
    AlreadyApplied,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl<C, I, A> CampaignApplicationService<C, I, A>
where
    C: CampaignRepository + 'static,
    I: InfluencerRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(campaigns: Arc<C>, influencers: Arc<I>, applications: Arc<A>) -> Self {
        Self {
            campaigns,
            influencers,
            applications,
        }
    }

    /// Create a pending application; at most one per (campaign, influencer)
    /// pair. The pair is pre-checked so duplicates surface as a typed
    /// conflict instead of a storage constraint violation.
    pub fn apply(
        &self,
        campaign_id: &CampaignId,
        influencer_id: &InfluencerId,
        pitch: Option<String>,
    ) -> Result<CampaignApplication, ApplicationServiceError> {
        self.campaigns
            .fetch(campaign_id)?
            .ok_or(ApplicationServiceError::CampaignNotFound)?;

        if self
            .applications
            .find_for_pair(campaign_id, influencer_id)?
            .is_some()
        {
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let application = CampaignApplication {
            id: ApplicationId::new(),
            campaign_id: *campaign_id,
            influencer_id: *influencer_id,
            status: ApplicationStatus::Pending,
            pitch,
            created_at: Utc::now(),
        };

        match self.applications.insert(application) {
            Ok(stored) => Ok(stored),
            // The storage backstop can still catch a racing duplicate.
            Err(RepositoryError::Conflict) => Err(ApplicationServiceError::AlreadyApplied),
            Err(other) => Err(other.into()),
        }
    }

    /// List a campaign's applications for its owning brand, newest first,
    /// joined with each applicant's display name and avatar.
    pub fn list_for_campaign(
        &self,
        campaign_id: &CampaignId,
        brand_id: &BrandId,
    ) -> Result<Vec<CampaignApplicationView>, ApplicationServiceError> {
        self.owned_campaign(campaign_id, brand_id)?;

        let mut applications = self.applications.list_for_campaign(campaign_id)?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(applicant) = self.influencers.fetch(&application.influencer_id)? else {
                continue;
            };
            views.push(CampaignApplicationView {
                id: application.id,
                campaign_id: application.campaign_id,
                influencer_id: application.influencer_id,
                status: application.status,
                pitch: application.pitch,
                created_at: application.created_at,
                influencer_name: applicant.display_name,
                influencer_avatar: applicant.avatar_url,
            });
        }
        Ok(views)
    }

    /// Overwrite an application's status on behalf of the owning brand.
    ///
    /// Re-transitioning an already-terminal application is currently
    /// permitted; the brand sees the latest decision only.
    pub fn update_status(
        &self,
        campaign_id: &CampaignId,
        application_id: &ApplicationId,
        brand_id: &BrandId,
        status: ApplicationStatus,
    ) -> Result<CampaignApplication, ApplicationServiceError> {
        self.owned_campaign(campaign_id, brand_id)?;

        let mut application = self
            .applications
            .fetch(application_id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)?;
        if application.campaign_id != *campaign_id {
            return Err(ApplicationServiceError::ApplicationNotFound);
        }

        application.status = status;
        self.applications.update(application.clone())?;
        Ok(application)
    }

    /// An influencer's own applications, newest first, joined with campaign
    /// titles.
    pub fn list_for_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<InfluencerApplicationView>, ApplicationServiceError> {
        let mut applications = self.applications.list_for_influencer(influencer_id)?;
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(campaign) = self.campaigns.fetch(&application.campaign_id)? else {
                continue;
            };
            views.push(InfluencerApplicationView {
                id: application.id,
                campaign_id: application.campaign_id,
                influencer_id: application.influencer_id,
                status: application.status,
                pitch: application.pitch,
                created_at: application.created_at,
                campaign_title: campaign.title,
            });
        }
        Ok(views)
    }

    fn owned_campaign(
        &self,
        campaign_id: &CampaignId,
        brand_id: &BrandId,
    ) -> Result<Campaign, ApplicationServiceError> {
        let campaign = self
            .campaigns
            .fetch(campaign_id)?
            .ok_or(ApplicationServiceError::CampaignNotFound)?;
        if campaign.brand_id != *brand_id {
            return Err(ApplicationServiceError::CampaignNotFound);
        }
        Ok(campaign)
    }
}
