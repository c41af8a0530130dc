use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::trust;

/// Identifier wrapper for influencer profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InfluencerId(pub Uuid);

/// Identifier wrapper for brand profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrandId(pub Uuid);

/// Identifier wrapper for campaigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub Uuid);

/// Social platform a creator publishes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Tiktok, Platform::Youtube];

    pub const fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::Tiktok),
            "youtube" => Ok(Self::Youtube),
            other => Err(ValidationError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Raw engagement statistics the trust scorer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub follower_count: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// Fraction of followers interacting with a post, in [0, 1].
    pub engagement_rate: f64,
}

/// Derived trust signal stored on the influencer profile.
///
/// The two fields always sum to 100 (within rounding); both are kept so the
/// read side never recomputes the complement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustScore {
    pub authenticity_score: f64,
    pub fake_follower_pct: f64,
}

/// Influencer profile as read from the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerProfile {
    pub id: InfluencerId,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub tiktok_handle: Option<String>,
    #[serde(default)]
    pub youtube_handle: Option<String>,
    pub follower_count: u64,
    pub engagement_rate: f64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    pub authenticity_score: f64,
    pub fake_follower_pct: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl InfluencerProfile {
    /// Project the statistics the trust scorer consumes.
    pub fn stats(&self) -> EngagementStats {
        EngagementStats {
            follower_count: self.follower_count,
            avg_likes: self.avg_likes,
            avg_comments: self.avg_comments,
            engagement_rate: self.engagement_rate,
        }
    }

    pub fn handle_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Instagram => self.instagram_handle.as_deref(),
            Platform::Tiktok => self.tiktok_handle.as_deref(),
            Platform::Youtube => self.youtube_handle.as_deref(),
        }
    }

    /// Recompute the stored trust pair from the current statistics. Must be
    /// called by whichever path mutates the engagement fields.
    pub fn refresh_trust(&mut self) {
        let score = trust::score(&self.stats());
        self.authenticity_score = score.authenticity_score;
        self.fake_follower_pct = score.fake_follower_pct;
    }
}

/// Normalized structured search constraints. Absent fields impose no
/// constraint; the set is built once and interpreted as a pure conjunction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_engagement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_authenticity: Option<f64>,
}

/// Fields the candidate filter can order by, always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    FollowerCount,
    EngagementRate,
    AuthenticityScore,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            SortKey::FollowerCount => "follower_count",
            SortKey::EngagementRate => "engagement_rate",
            SortKey::AuthenticityScore => "authenticity_score",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "follower_count" => Ok(Self::FollowerCount),
            "engagement_rate" => Ok(Self::EngagementRate),
            "authenticity_score" => Ok(Self::AuthenticityScore),
            other => Err(ValidationError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Campaign lifecycle state, owned by the excluded CRUD layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::UnknownCampaignStatus(other.to_string())),
        }
    }
}

/// Campaign fields the matching core reads. The full entity lives in the
/// excluded CRUD layer; this core never writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub brand_id: BrandId,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_followers: Option<u64>,
    #[serde(default)]
    pub min_engagement_rate: Option<f64>,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// The implicit search constraints a campaign imposes on its candidates.
    /// Fields absent on the campaign are simply omitted.
    pub fn candidate_filters(&self) -> FilterSet {
        FilterSet {
            category: self.category.clone(),
            min_followers: self.min_followers,
            min_engagement: self.min_engagement_rate,
            ..FilterSet::default()
        }
    }
}

/// Boundary validation failures for textual enum values. Surfaced to the
/// caller rather than silently defaulting.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("unrecognized platform '{0}'")]
    UnknownPlatform(String),
    #[error("unrecognized application status '{0}'")]
    UnknownStatus(String),
    #[error("unrecognized campaign status '{0}'")]
    UnknownCampaignStatus(String),
    #[error("unrecognized sort field '{0}'")]
    UnknownSortKey(String),
}
