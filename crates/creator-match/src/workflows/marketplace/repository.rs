use super::domain::{Campaign, CampaignId, InfluencerId, InfluencerProfile};

/// Storage abstraction over influencer profiles so the matching services can
/// be exercised in isolation. Implementations must return a deterministic
/// iteration order from `list`.
pub trait InfluencerRepository: Send + Sync {
    fn fetch(&self, id: &InfluencerId) -> Result<Option<InfluencerProfile>, RepositoryError>;
    fn list(&self) -> Result<Vec<InfluencerProfile>, RepositoryError>;
}

/// Read-only access to campaigns; the CRUD layer owns every write.
pub trait CampaignRepository: Send + Sync {
    fn fetch(&self, id: &CampaignId) -> Result<Option<Campaign>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
