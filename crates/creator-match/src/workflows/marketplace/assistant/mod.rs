//! Optional external language-model capabilities with deterministic fallbacks.
//!
//! Two ports cross this boundary: query interpretation and recommendation
//! reasoning. Each has a remote adapter speaking to an OpenAI-compatible
//! endpoint and a local deterministic adapter; the `Resilient*` decorators
//! catch remote failures and answer from the local path, so a downstream
//! outage degrades answer quality, never availability.

mod keyword;
mod openai;
mod template;

pub use keyword::KeywordInterpreter;
pub use openai::{OpenAiExplainer, OpenAiInterpreter};
pub use template::TemplateExplainer;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::AssistantConfig;

use super::domain::FilterSet;

/// Error type for external language-service calls. Never crosses the
/// composed production boundary; the decorators absorb it.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant API error: {0}")]
    Api(String),
    #[error("invalid assistant response: {0}")]
    InvalidFormat(String),
    #[error("assistant request timed out")]
    Timeout,
}

/// Port turning a natural-language query into structured filters.
#[async_trait]
pub trait QueryInterpreter: Send + Sync {
    async fn interpret(&self, query: &str) -> Result<FilterSet, AssistantError>;
}

/// Port producing a short justification for a recommendation set.
#[async_trait]
pub trait MatchExplainer: Send + Sync {
    async fn explain(
        &self,
        campaign_title: &str,
        campaign_category: Option<&str>,
        influencer_names: &[String],
    ) -> Result<String, AssistantError>;
}

/// Decorator that absorbs primary-path failures and re-asks the fallback.
pub struct ResilientInterpreter<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> ResilientInterpreter<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> QueryInterpreter for ResilientInterpreter<P, F>
where
    P: QueryInterpreter,
    F: QueryInterpreter,
{
    async fn interpret(&self, query: &str) -> Result<FilterSet, AssistantError> {
        match self.primary.interpret(query).await {
            Ok(filters) => Ok(filters),
            Err(err) => {
                warn!(error = %err, "query interpretation fell back to keyword rules");
                self.fallback.interpret(query).await
            }
        }
    }
}

/// Fallback decorator for the reasoning port.
pub struct ResilientExplainer<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> ResilientExplainer<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> MatchExplainer for ResilientExplainer<P, F>
where
    P: MatchExplainer,
    F: MatchExplainer,
{
    async fn explain(
        &self,
        campaign_title: &str,
        campaign_category: Option<&str>,
        influencer_names: &[String],
    ) -> Result<String, AssistantError> {
        match self
            .primary
            .explain(campaign_title, campaign_category, influencer_names)
            .await
        {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(error = %err, "recommendation reasoning fell back to template");
                self.fallback
                    .explain(campaign_title, campaign_category, influencer_names)
                    .await
            }
        }
    }
}

/// Compose the configured interpreter: remote with keyword fallback when a
/// credential is present, keyword rules alone otherwise. Callers cannot tell
/// which path produced an answer.
pub fn interpreter_from_config(config: &AssistantConfig) -> Arc<dyn QueryInterpreter> {
    match &config.api_key {
        Some(key) => Arc::new(ResilientInterpreter::new(
            OpenAiInterpreter::new(key.clone(), config),
            KeywordInterpreter,
        )),
        None => Arc::new(KeywordInterpreter),
    }
}

/// Same composition for the reasoning port.
pub fn explainer_from_config(config: &AssistantConfig) -> Arc<dyn MatchExplainer> {
    match &config.api_key {
        Some(key) => Arc::new(ResilientExplainer::new(
            OpenAiExplainer::new(key.clone(), config),
            TemplateExplainer,
        )),
        None => Arc::new(TemplateExplainer),
    }
}
