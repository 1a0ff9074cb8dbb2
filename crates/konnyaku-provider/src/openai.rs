use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use konnyaku_config::Config;
use konnyaku_core::language::language_label;
use konnyaku_core::mode::is_dictionary_mode;
use konnyaku_core::partial::build_partial_dictionary;
use konnyaku_core::sse::SseSplitter;
use konnyaku_types::ProcessorResult;

use crate::prompts::build_system_prompt;
use crate::{LlmProvider, PartialSink, ProcessError, ProviderMetadata, finalize_result};

const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const SPEECH_URL: &str = "https://api.openai.com/v1/audio/speech";
const TTS_MODEL: &str = "gpt-4o-mini-tts";
const TTS_VOICE: &str = "nova";

#[derive(Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    prompts: konnyaku_config::prompts::PromptConfig,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            prompts: Default::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.network.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key: config.provider.openai_api_key.clone(),
            model: config.provider.openai_model.clone(),
            prompts: config.prompts.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn process(
        &self,
        text: &str,
        target_lang: &str,
        on_partial: Option<PartialSink<'_>>,
        cancel: CancellationToken,
    ) -> Result<ProcessorResult, ProcessError> {
        if self.api_key.is_empty() {
            return Err(ProcessError::Authentication);
        }

        let phrase_mode = is_dictionary_mode(text);
        let prompt = build_system_prompt(text, target_lang, &self.prompts, phrase_mode);
        tracing::debug!(model = %self.model, phrase_mode, "openai request");

        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt },
                { "role": "user", "content": text }
            ],
            "stream": true
        });
        if phrase_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .client
            .post(CHAT_URL)
            .bearer_auth(&self.api_key)
            .header("Accept", "text/event-stream")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProcessError::RateLimit);
        }
        if status.as_u16() == 401 {
            return Err(ProcessError::Authentication);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut stream = response.bytes_stream();
        let mut sse = SseSplitter::new();
        let mut content = String::new();
        let mut raw_response = Vec::new();
        let mut done_reading = false;

        while !done_reading {
            let Some(item) = stream.next().await else {
                break;
            };
            if cancel.is_cancelled() {
                tracing::info!("openai stream cancelled");
                return Ok(ProcessorResult::Translation {
                    text: String::new(),
                });
            }

            let bytes = item?;
            raw_response.extend_from_slice(&bytes);

            for event in sse.feed(&bytes) {
                if event == "[DONE]" {
                    done_reading = true;
                    break;
                }
                let payload: ChatStreamChunk = match serde_json::from_str(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!("failed to parse openai stream event: {e}");
                        continue;
                    }
                };
                let Some(delta) = delta_content(&payload) else {
                    continue;
                };
                content.push_str(delta);
                if let Some(sink) = on_partial {
                    let snapshot = if phrase_mode {
                        ProcessorResult::Dictionary {
                            data: build_partial_dictionary(&content, text),
                        }
                    } else {
                        ProcessorResult::Translation {
                            text: content.clone(),
                        }
                    };
                    sink(snapshot);
                }
            }
        }

        // Some gateways answer with a plain JSON body despite the stream flag.
        let raw_response = String::from_utf8_lossy(&raw_response);
        if content.is_empty() && raw_response.trim_start().starts_with('{') {
            if let Ok(payload) = serde_json::from_str::<ChatCompletion>(&raw_response) {
                if let Some(message) = payload
                    .choices
                    .first()
                    .and_then(|c| c.message.as_ref())
                    .and_then(|m| m.content.as_deref())
                {
                    content = message.to_string();
                }
            }
        }

        if content.is_empty() {
            return Err(ProcessError::EmptyResponse);
        }
        Ok(finalize_result(&content, text, phrase_mode))
    }

    async fn speak(&self, text: &str, lang: &str) -> Result<Option<Vec<u8>>, ProcessError> {
        if self.api_key.is_empty() {
            return Err(ProcessError::Authentication);
        }

        let body = tts_request_body(text, lang);
        let response = self
            .client
            .post(SPEECH_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("audio") {
            tracing::warn!("openai tts returned unexpected content-type: {content_type}");
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        Ok(Some(bytes.to_vec()))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ChatStreamChunk {
    #[serde(default)]
    choices: Vec<ChatStreamChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatStreamChoice {
    #[serde(default)]
    delta: ChatDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChatDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatCompletionChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

// The speech endpoint has no language field; the model takes pronunciation
// hints through `instructions` instead.
fn tts_request_body(text: &str, lang: &str) -> serde_json::Value {
    json!({
        "model": TTS_MODEL,
        "input": text,
        "voice": TTS_VOICE,
        "instructions": format!("Pronounce the input as {}.", language_label(lang))
    })
}

fn delta_content(chunk: &ChatStreamChunk) -> Option<&str> {
    chunk
        .choices
        .first()
        .and_then(|c| c.delta.content.as_deref())
        .filter(|s| !s.is_empty())
}
