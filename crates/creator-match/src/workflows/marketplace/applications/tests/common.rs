use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::workflows::marketplace::applications::domain::{ApplicationId, CampaignApplication};
use crate::workflows::marketplace::applications::repository::ApplicationRepository;
use crate::workflows::marketplace::applications::service::CampaignApplicationService;
use crate::workflows::marketplace::domain::{
    BrandId, Campaign, CampaignId, CampaignStatus, InfluencerId, InfluencerProfile,
};
use crate::workflows::marketplace::repository::{
    CampaignRepository, InfluencerRepository, RepositoryError,
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
    fn fetch(&self, id: &InfluencerId) -> Result<Option<InfluencerProfile>, RepositoryError> {
        Ok(self.profiles.lock().expect("lock").get(id).cloned())
    }

    fn list(&self) -> Result<Vec<InfluencerProfile>, RepositoryError> {
        Ok(self.profiles.lock().expect("lock").values().cloned().collect())
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

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    records: Arc<Mutex<BTreeMap<ApplicationId, CampaignApplication>>>,
}

impl ApplicationRepository for MemoryApplications {
    fn insert(
        &self,
        application: CampaignApplication,
    ) -> Result<CampaignApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        let duplicate_pair = guard.values().any(|existing| {
            existing.campaign_id == application.campaign_id
                && existing.influencer_id == application.influencer_id
        });
        if duplicate_pair || guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id, application.clone());
        Ok(application)
    }

    fn update(&self, application: CampaignApplication) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id, application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<CampaignApplication>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn find_for_pair(
        &self,
        campaign_id: &CampaignId,
        influencer_id: &InfluencerId,
    ) -> Result<Option<CampaignApplication>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .find(|application| {
                application.campaign_id == *campaign_id
                    && application.influencer_id == *influencer_id
            })
            .cloned())
    }

    fn list_for_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Vec<CampaignApplication>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|application| application.campaign_id == *campaign_id)
            .cloned()
            .collect())
    }

    fn list_for_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<CampaignApplication>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("lock")
            .values()
            .filter(|application| application.influencer_id == *influencer_id)
            .cloned()
            .collect())
    }
}

pub(super) fn sample_influencer(name: &str) -> InfluencerProfile {
    InfluencerProfile {
        id: InfluencerId(Uuid::new_v4()),
        display_name: name.to_string(),
        bio: None,
        avatar_url: Some(format!("https://cdn.example.com/{name}.png")),
        categories: vec!["fitness".to_string()],
        instagram_handle: Some(format!("{name}.ig")),
        tiktok_handle: None,
        youtube_handle: None,
        follower_count: 25_000,
        engagement_rate: 0.04,
        avg_likes: 900,
        avg_comments: 25,
        authenticity_score: 85.0,
        fake_follower_pct: 15.0,
        location: Some("US".to_string()),
        is_verified: false,
    }
}

pub(super) fn sample_campaign(brand_id: BrandId) -> Campaign {
    Campaign {
        id: CampaignId(Uuid::new_v4()),
        brand_id,
        title: "Summer collection push".to_string(),
        category: Some("fitness".to_string()),
        min_followers: Some(5_000),
        min_engagement_rate: Some(0.02),
        status: CampaignStatus::Active,
        created_at: Utc::now(),
    }
}

pub(super) type Service =
    CampaignApplicationService<MemoryCampaigns, MemoryInfluencers, MemoryApplications>;

pub(super) fn build_service() -> (
    Arc<Service>,
    Arc<MemoryCampaigns>,
    Arc<MemoryInfluencers>,
    Arc<MemoryApplications>,
) {
    let campaigns = Arc::new(MemoryCampaigns::default());
    let influencers = Arc::new(MemoryInfluencers::default());
    let applications = Arc::new(MemoryApplications::default());
    let service = Arc::new(CampaignApplicationService::new(
        campaigns.clone(),
        influencers.clone(),
        applications.clone(),
    ));
    (service, campaigns, influencers, applications)
}
