use async_trait::async_trait;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponseFormat};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use tracing::debug;

use super::{ExplanationContext, ExplanationError, ExplanationProvider};
use crate::constants::EXPLANATION_TARGET_CHARS;

/// Chat-model explanation provider built on `genai`.
pub struct GenaiExplanationProvider {
    client: Client,
    model: String,
    system_prompt: String,
}

impl std::fmt::Debug for GenaiExplanationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiExplanationProvider")
            .field("model", &self.model)
            .finish()
    }
}

impl GenaiExplanationProvider {
    /// Uses genai's default credential lookup (provider env vars).
    pub fn new(model: &str, context_hint: &str) -> Self {
        Self::with_client(Client::default(), model, context_hint)
    }

    /// Authenticates every request with `api_key`.
    pub fn with_api_key(api_key: &str, model: &str, context_hint: &str) -> Self {
        let key = api_key.trim().to_string();
        let auth = AuthResolver::from_resolver_fn(
            move |_: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(key.clone())))
            },
        );
        let client = Client::builder().with_auth_resolver(auth).build();
        Self::with_client(client, model, context_hint)
    }

    /// Sends every request to the OpenAI-compatible API at `base_url`,
    /// authenticated with `api_key`.
    pub fn with_openai_endpoint(
        api_key: &str,
        base_url: &str,
        model: &str,
        context_hint: &str,
    ) -> Self {
        let key = api_key.trim().to_string();
        let endpoint = chat_endpoint(base_url);
        let target = ServiceTargetResolver::from_resolver_fn(
            move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(endpoint.clone()),
                    auth: AuthData::from_single(key.clone()),
                    model: ModelIden::new(AdapterKind::OpenAI, target.model.model_name),
                })
            },
        );
        let client = Client::builder().with_service_target_resolver(target).build();
        Self::with_client(client, model, context_hint)
    }

    pub fn with_client(client: Client, model: &str, context_hint: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            system_prompt: system_prompt(context_hint),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// genai joins request paths onto the endpoint, so it must end with `/`.
pub(crate) fn chat_endpoint(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}

pub(crate) fn chat_options() -> ChatOptions {
    ChatOptions::default()
        .with_temperature(0.2)
        .with_response_format(ChatResponseFormat::JsonMode)
}

pub(crate) fn system_prompt(context_hint: &str) -> String {
    let mut prompt = format!(
        "You explain why a job matches a worker. Return strict JSON: \
         {{\"why\": \"short reason, at most {EXPLANATION_TARGET_CHARS} characters\"}}."
    );
    let hint = context_hint.trim();
    if !hint.is_empty() {
        prompt.push(' ');
        prompt.push_str(hint);
    }
    prompt
}

#[async_trait]
impl ExplanationProvider for GenaiExplanationProvider {
    async fn get_explanation(&self, ctx: &ExplanationContext) -> Result<String, ExplanationError> {
        let payload = serde_json::to_string(ctx)?;
        let request = ChatRequest::new(vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(payload),
        ]);
        let options = chat_options();

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await?;

        let text = response.first_text().unwrap_or_default().to_string();
        debug!(model = %self.model, reply_len = text.len(), "Explanation received");
        Ok(text)
    }

    fn name(&self) -> &str {
        "genai"
    }
}
