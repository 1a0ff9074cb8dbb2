use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use konnyaku_config::Config;
use konnyaku_core::mode::is_dictionary_mode;
use konnyaku_core::partial::build_partial_dictionary;
use konnyaku_core::sse::SseSplitter;
use konnyaku_types::ProcessorResult;

use crate::prompts::build_system_prompt;
use crate::{LlmProvider, PartialSink, ProcessError, ProviderMetadata, finalize_result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
const TTS_VOICE: &str = "Aoede";

#[derive(Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    prompts: konnyaku_config::prompts::PromptConfig,
}

impl GeminiProvider {
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
            api_key: config.provider.gemini_api_key.clone(),
            model: config.provider.gemini_model.clone(),
            prompts: config.prompts.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
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
        tracing::debug!(model = %self.model, phrase_mode, "gemini request");

        let url = format!(
            "{GEMINI_BASE_URL}/{}:streamGenerateContent?alt=sse&key={}",
            self.model, self.api_key
        );
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if phrase_mode {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProcessError::RateLimit);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
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
        let mut raw_text = String::new();

        while let Some(item) = stream.next().await {
            if cancel.is_cancelled() {
                tracing::info!("gemini stream cancelled");
                return Ok(ProcessorResult::Translation {
                    text: String::new(),
                });
            }

            let bytes = item?;
            for event in sse.feed(&bytes) {
                if event == "[DONE]" {
                    break;
                }
                let payload: GeminiStreamChunk = match serde_json::from_str(&event) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!("failed to parse gemini stream event: {e}");
                        continue;
                    }
                };
                let delta = chunk_text(&payload);
                if delta.is_empty() {
                    continue;
                }
                raw_text.push_str(&delta);
                if let Some(sink) = on_partial {
                    let snapshot = if phrase_mode {
                        ProcessorResult::Dictionary {
                            data: build_partial_dictionary(&raw_text, text),
                        }
                    } else {
                        ProcessorResult::Translation {
                            text: raw_text.clone(),
                        }
                    };
                    sink(snapshot);
                }
            }
        }

        if raw_text.is_empty() {
            return Err(ProcessError::EmptyResponse);
        }
        Ok(finalize_result(&raw_text, text, phrase_mode))
    }

    async fn speak(&self, text: &str, lang: &str) -> Result<Option<Vec<u8>>, ProcessError> {
        if self.api_key.is_empty() {
            return Err(ProcessError::Authentication);
        }

        let url = format!(
            "{GEMINI_BASE_URL}/{TTS_MODEL}:generateContent?key={}",
            self.api_key
        );
        let body = tts_request_body(text, lang);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            // TTS model not available for this key scope.
            tracing::warn!("gemini tts model not found");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GeminiStreamChunk = response.json().await?;
        let audio = payload
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.inline_data.as_ref())
            .filter(|d| d.mime_type.starts_with("audio"))
            .and_then(|d| BASE64.decode(&d.data).ok());

        if audio.is_none() {
            tracing::warn!("gemini tts returned no audio data");
        }
        Ok(audio)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            model: self.model.clone(),
            requires_api_key: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GeminiStreamChunk {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default)]
    text: String,
    #[serde(default)]
    inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

/// BCP-47 locale casing (`ja-jp` -> `ja-JP`) for the speech config.
fn canonical_locale(lang: &str) -> String {
    match lang.split_once('-') {
        Some((language, region)) => {
            format!("{}-{}", language.to_lowercase(), region.to_uppercase())
        }
        None => lang.to_lowercase(),
    }
}

fn tts_request_body(text: &str, lang: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": text }] }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "languageCode": canonical_locale(lang),
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": TTS_VOICE }
                }
            }
        }
    })
}

/// Concatenated text of every part in the first candidate.
fn chunk_text(chunk: &GeminiStreamChunk) -> String {
    chunk
        .candidates
        .first()
        .map(|c| {
            c.content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}
