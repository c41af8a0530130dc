//! Matching and trust core for the creator-brand marketplace.
//!
//! The crate owns the decision logic of the platform: converting raw
//! engagement statistics into a trust signal, turning natural-language
//! search queries into structured filters, ranking candidate creators for
//! campaigns, and governing the campaign-application lifecycle. Profile
//! CRUD, authentication, and storage mechanics live elsewhere and are
//! reached through the repository traits in [`workflows::marketplace`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
