//! Campaign-application workflow: creation with uniqueness enforcement and
//! ownership-scoped status transitions.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, CampaignApplication, CampaignApplicationView,
    InfluencerApplicationView,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationServiceError, CampaignApplicationService};
