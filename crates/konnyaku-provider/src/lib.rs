use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use konnyaku_core::partial::build_partial_dictionary;
use konnyaku_types::{DictionaryRecord, ProcessorResult};

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Callback invoked with a fresh result snapshot after every streamed delta.
pub type PartialSink<'a> = &'a (dyn Fn(ProcessorResult) + Send + Sync);

/// LLM backend interface
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one request end to end. The provider classifies the input,
    /// streams the response, reports snapshots through `on_partial`, and
    /// resolves to the authoritative result. A cancelled request resolves
    /// to an empty translation instead of an error.
    async fn process(
        &self,
        text: &str,
        target_lang: &str,
        on_partial: Option<PartialSink<'_>>,
        cancel: CancellationToken,
    ) -> Result<ProcessorResult, ProcessError>;

    /// Synthesize speech for `text` in the given locale, returning encoded
    /// audio bytes if the backend produced any.
    async fn speak(&self, text: &str, lang: &str) -> Result<Option<Vec<u8>>, ProcessError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication error")]
    Authentication,

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Empty response from model")]
    EmptyResponse,
}

/// Drop a surrounding markdown code fence if the model ignored the
/// "no markdown" instruction.
pub(crate) fn strip_code_fences(text: &str) -> String {
    let mut s = text.trim().to_string();
    if s.starts_with("```") {
        if let Some(i) = s.find('\n') {
            s = s[i + 1..].to_string();
        }
        if let Some(end) = s.rfind("```") {
            s = s[..end].to_string();
        }
    }
    s.trim().to_string()
}

/// Turn the complete accumulated stream text into the final result.
///
/// Phrase mode prefers a strict JSON parse; when the text never became valid
/// JSON the last best-effort partial build is authoritative.
pub(crate) fn finalize_result(raw: &str, input: &str, phrase_mode: bool) -> ProcessorResult {
    if !phrase_mode {
        return ProcessorResult::Translation {
            text: raw.to_string(),
        };
    }

    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<serde_json::Value>(&cleaned) {
        Ok(value) => {
            if value.get("mode").and_then(|m| m.as_str()) == Some("translation") {
                let text = value
                    .get("text")
                    .and_then(|t| t.as_str())
                    .unwrap_or(&cleaned)
                    .to_string();
                return ProcessorResult::Translation { text };
            }
            match serde_json::from_value::<DictionaryRecord>(value) {
                Ok(mut data) => {
                    if data.word.is_empty() {
                        data.word = input.to_string();
                    }
                    ProcessorResult::Dictionary { data }
                }
                Err(_) => ProcessorResult::Dictionary {
                    data: build_partial_dictionary(&cleaned, input),
                },
            }
        }
        Err(_) => ProcessorResult::Dictionary {
            data: build_partial_dictionary(&cleaned, input),
        },
    }
}
