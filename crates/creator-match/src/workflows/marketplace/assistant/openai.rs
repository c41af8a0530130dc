//! OpenAI chat-completions adapters for query interpretation and
//! recommendation reasoning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AssistantConfig;
use crate::workflows::marketplace::domain::{FilterSet, Platform};

use super::{AssistantError, MatchExplainer, QueryInterpreter};

const INTERPRET_INSTRUCTION: &str = "You extract search filters from natural language queries \
     about influencers. Return a JSON object with these optional keys: category (string), \
     min_followers (int), max_followers (int), min_engagement (float 0-1), location (string), \
     platform (instagram|tiktok|youtube), min_authenticity (float 0-100). Only include keys \
     that are mentioned or implied.";

const EXPLAIN_INSTRUCTION: &str = "You provide brief explanations for why influencers are \
     recommended for marketing campaigns. Keep it to 2-3 sentences.";

const EXPLAIN_MAX_TOKENS: u32 = 200;

/// Shared chat-completions plumbing for both adapters.
struct OpenAiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    fn new(api_key: SecretString, config: &AssistantConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        max_tokens: Option<u32>,
        json_response: bool,
    ) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature,
            max_tokens,
            response_format: json_response.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AssistantError::Timeout
                } else {
                    AssistantError::Api(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api(format!(
                "API returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| AssistantError::InvalidFormat(err.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(AssistantError::InvalidFormat(
                "empty completion".to_string(),
            ));
        }

        Ok(content)
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: String,
}

/// Remote filter extraction.
pub struct OpenAiInterpreter {
    client: OpenAiClient,
}

impl OpenAiInterpreter {
    pub fn new(api_key: SecretString, config: &AssistantConfig) -> Self {
        Self {
            client: OpenAiClient::new(api_key, config),
        }
    }
}

#[async_trait]
impl QueryInterpreter for OpenAiInterpreter {
    async fn interpret(&self, query: &str) -> Result<FilterSet, AssistantError> {
        let content = self
            .client
            .chat(INTERPRET_INSTRUCTION, query, 0.0, None, true)
            .await?;

        let value: Value = serde_json::from_str(&content)
            .map_err(|err| AssistantError::InvalidFormat(err.to_string()))?;

        Ok(filters_from_value(&value))
    }
}

/// Extract the documented filter keys from a model response, dropping
/// unrecognized keys and unusable values.
fn filters_from_value(value: &Value) -> FilterSet {
    FilterSet {
        category: value
            .get("category")
            .and_then(Value::as_str)
            .map(str::to_string),
        min_followers: value.get("min_followers").and_then(Value::as_u64),
        max_followers: value.get("max_followers").and_then(Value::as_u64),
        min_engagement: value.get("min_engagement").and_then(Value::as_f64),
        location: value
            .get("location")
            .and_then(Value::as_str)
            .map(str::to_string),
        platform: value
            .get("platform")
            .and_then(Value::as_str)
            .and_then(|raw| Platform::parse(raw).ok()),
        min_authenticity: value.get("min_authenticity").and_then(Value::as_f64),
    }
}

/// Remote recommendation reasoning.
pub struct OpenAiExplainer {
    client: OpenAiClient,
}

impl OpenAiExplainer {
    pub fn new(api_key: SecretString, config: &AssistantConfig) -> Self {
        Self {
            client: OpenAiClient::new(api_key, config),
        }
    }
}

#[async_trait]
impl MatchExplainer for OpenAiExplainer {
    async fn explain(
        &self,
        campaign_title: &str,
        campaign_category: Option<&str>,
        influencer_names: &[String],
    ) -> Result<String, AssistantError> {
        let category = campaign_category.unwrap_or("general");
        let prompt = format!(
            "Campaign: {campaign_title} (Category: {category}). Recommended influencers: {}. \
             Why are they a good fit?",
            influencer_names.join(", ")
        );

        self.client
            .chat(EXPLAIN_INSTRUCTION, &prompt, 0.7, Some(EXPLAIN_MAX_TOKENS), false)
            .await
    }
}
