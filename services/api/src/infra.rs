use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use creator_match::workflows::marketplace::applications::{
    ApplicationId, ApplicationRepository, CampaignApplication,
};
use creator_match::workflows::marketplace::{
    Campaign, CampaignId, CampaignRepository, InfluencerId, InfluencerProfile,
    InfluencerRepository, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInfluencerRepository {
    profiles: Arc<Mutex<BTreeMap<InfluencerId, InfluencerProfile>>>,
}

impl InMemoryInfluencerRepository {
    pub(crate) fn insert(&self, profile: InfluencerProfile) {
        let mut guard = self.profiles.lock().expect("influencer mutex poisoned");
        guard.insert(profile.id, profile);
    }

    pub(crate) fn len(&self) -> usize {
        self.profiles.lock().expect("influencer mutex poisoned").len()
    }
}

impl InfluencerRepository for InMemoryInfluencerRepository {
    fn fetch(&self, id: &InfluencerId) -> Result<Option<InfluencerProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("influencer mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<InfluencerProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("influencer mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCampaignRepository {
    campaigns: Arc<Mutex<BTreeMap<CampaignId, Campaign>>>,
}

impl InMemoryCampaignRepository {
    pub(crate) fn insert(&self, campaign: Campaign) {
        let mut guard = self.campaigns.lock().expect("campaign mutex poisoned");
        guard.insert(campaign.id, campaign);
    }

    pub(crate) fn len(&self) -> usize {
        self.campaigns.lock().expect("campaign mutex poisoned").len()
    }
}

impl CampaignRepository for InMemoryCampaignRepository {
    fn fetch(&self, id: &CampaignId) -> Result<Option<Campaign>, RepositoryError> {
        let guard = self.campaigns.lock().expect("campaign mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<BTreeMap<ApplicationId, CampaignApplication>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(
        &self,
        application: CampaignApplication,
    ) -> Result<CampaignApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
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
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id, application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<CampaignApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_for_pair(
        &self,
        campaign_id: &CampaignId,
        influencer_id: &InfluencerId,
    ) -> Result<Option<CampaignApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
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
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.campaign_id == *campaign_id)
            .cloned()
            .collect())
    }

    fn list_for_influencer(
        &self,
        influencer_id: &InfluencerId,
    ) -> Result<Vec<CampaignApplication>, RepositoryError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| application.influencer_id == *influencer_id)
            .cloned()
            .collect())
    }
}
