use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::domain::{CampaignId, InfluencerId, ValidationError};

/// Identifier wrapper for campaign applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub Uuid);

impl ApplicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle state of a campaign application. `Accepted` and `Rejected` are
/// terminal; nothing transitions out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// An influencer's pitch for a campaign slot. At most one exists per
/// (campaign, influencer) pair; applications are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignApplication {
    pub id: ApplicationId,
    pub campaign_id: CampaignId,
    pub influencer_id: InfluencerId,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub pitch: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Application joined with applicant identity for brand review.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignApplicationView {
    pub id: ApplicationId,
    pub campaign_id: CampaignId,
    pub influencer_id: InfluencerId,
    pub status: ApplicationStatus,
    pub pitch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub influencer_name: String,
    pub influencer_avatar: Option<String>,
}

/// Application joined with the campaign title for the applicant's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct InfluencerApplicationView {
    pub id: ApplicationId,
    pub campaign_id: CampaignId,
    pub influencer_id: InfluencerId,
    pub status: ApplicationStatus,
    pub pitch: Option<String>,
    pub created_at: DateTime<Utc>,
    pub campaign_title: String,
}
