//! Assistant implementation: two-pass tool-calling chat over an
//! OpenAI-compatible API.

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use database::models::ChatMessage as StoredMessage;

use crate::api_types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ToolDefinition,
};
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use crate::prompt;
use crate::tools::{self, FoundTask, ToolContext};

/// Reply used when the model produces no text.
const FALLBACK_REPLY: &str = "I'm sorry, I couldn't come up with a response.";

/// One chat turn from the user.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    /// The user's message.
    pub message: String,
    /// The user the conversation belongs to.
    pub user_id: i64,
    /// User location as (lat, lng), when the client provided one.
    pub location: Option<(f64, f64)>,
}

/// The structured result of a chat turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Final natural-language reply.
    pub reply: String,
    /// Map id the model highlighted, if any.
    pub highlight_task_id: Option<i64>,
    /// Tasks surfaced by the last results-bearing tool call.
    pub found_tasks: Vec<FoundTask>,
}

/// The conversational assistant.
///
/// Holds the HTTP client and configuration; all per-request state (user,
/// location, history) is passed into [`Assistant::chat`].
pub struct Assistant {
    client: Client,
    config: AssistantConfig,
}

impl Assistant {
    /// Create a new assistant with the given configuration.
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder().build().map_err(|e| {
            AssistantError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!("Assistant initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create an assistant from environment variables.
    ///
    /// See [`AssistantConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::new(AssistantConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Run one chat turn.
    ///
    /// First model call advertises the toolset; if the model requests tools
    /// they are executed in order against the available-tasks snapshot and a
    /// single second call produces the final reply. If no tools are
    /// requested, the first call's text is the reply and exactly one model
    /// invocation occurs.
    pub async fn chat(
        &self,
        pool: &SqlitePool,
        turn: &ChatTurn,
        history: &[StoredMessage],
    ) -> Result<ChatOutcome, AssistantError> {
        debug!(user_id = turn.user_id, "Processing chat turn");

        let system_prompt = prompt::build_system_prompt(pool, turn.user_id, turn.location).await?;
        let mut messages = self.build_messages(system_prompt, history, &turn.message);

        let first = self
            .chat_completion(messages.clone(), Some(tools::definitions()))
            .await?;
        let choice = first
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AssistantError::InvalidResponse("no choices in response".to_string()))?;

        let tool_calls = choice.message.tool_calls.unwrap_or_default();
        if tool_calls.is_empty() {
            let reply = non_empty(choice.message.content).unwrap_or_else(|| {
                warn!("No content in response, using fallback");
                FALLBACK_REPLY.to_string()
            });
            return Ok(ChatOutcome {
                reply,
                highlight_task_id: None,
                found_tasks: Vec::new(),
            });
        }

        info!(count = tool_calls.len(), "Model requested tools");
        messages.push(ChatMessage::assistant_tool_calls(
            choice.message.content,
            tool_calls.clone(),
        ));

        let ctx = ToolContext {
            pool,
            location: turn.location,
        };
        let mut fold = tools::OutcomeFold::default();

        for call in &tool_calls {
            let outcome = tools::execute(&ctx, &call.function.name, &call.function.arguments).await;
            fold.absorb(&outcome);
            messages.push(ChatMessage::tool(&call.id, outcome.content));
        }

        // Second pass carries no tools, so further tool calls are not honored.
        let second = self.chat_completion(messages, None).await?;
        let reply = second
            .choices
            .into_iter()
            .next()
            .and_then(|c| non_empty(c.message.content))
            .unwrap_or_else(|| {
                warn!("No content in final response, using fallback");
                FALLBACK_REPLY.to_string()
            });

        Ok(ChatOutcome {
            reply,
            highlight_task_id: fold.highlight_task_id,
            found_tasks: fold.found_tasks,
        })
    }

    /// Assemble the message list: system prompt, truncated history, then the
    /// new user message.
    fn build_messages(
        &self,
        system_prompt: String,
        history: &[StoredMessage],
        user_text: &str,
    ) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(system_prompt)];

        let window_start = history
            .len()
            .saturating_sub(self.config.max_history_messages);
        for msg in &history[window_start..] {
            messages.push(ChatMessage {
                role: msg.role.clone(),
                content: Some(msg.content.clone()),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        messages.push(ChatMessage::user(user_text));
        messages
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<ChatCompletionResponse, AssistantError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            tools,
        };

        debug!("Sending request to chat API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(&error_text) {
                return Err(AssistantError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(AssistantError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AssistantError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }
}

fn non_empty(content: Option<String>) -> Option<String> {
    content.filter(|s| !s.trim().is_empty())
}
