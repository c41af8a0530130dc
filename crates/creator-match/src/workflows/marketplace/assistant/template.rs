//! Templated recommendation reasoning, the deterministic counterpart to the
//! remote explainer.

use async_trait::async_trait;

use super::{AssistantError, MatchExplainer};

/// Names shown in the templated sentence.
const NAMED_CANDIDATES: usize = 3;

pub struct TemplateExplainer;

impl TemplateExplainer {
    pub fn explain_selection(
        campaign_title: &str,
        campaign_category: Option<&str>,
        influencer_names: &[String],
    ) -> String {
        let names = influencer_names
            .iter()
            .take(NAMED_CANDIDATES)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let space = campaign_category
            .map(|category| format!(" in the {category} space"))
            .unwrap_or_default();

        format!(
            "These influencers are recommended for '{campaign_title}' based on their strong \
             engagement rates, audience alignment{space}, and high authenticity scores. \
             {names} have demonstrated consistent content quality and audience trust."
        )
    }
}

#[async_trait]
impl MatchExplainer for TemplateExplainer {
    async fn explain(
        &self,
        campaign_title: &str,
        campaign_category: Option<&str>,
        influencer_names: &[String],
    ) -> Result<String, AssistantError> {
        Ok(Self::explain_selection(
            campaign_title,
            campaign_category,
            influencer_names,
        ))
    }
}
