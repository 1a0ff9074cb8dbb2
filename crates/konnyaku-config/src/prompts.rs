use std::env;

use serde::{Deserialize, Serialize};

/// User-supplied prompt overrides. When disabled the built-in dictionary and
/// translator prompts are used.
#[derive(Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PromptConfig {
    pub enabled: bool,
    pub phrase_prompt: String,
    pub sentence_prompt: String,
}

impl PromptConfig {
    pub fn new() -> Self {
        let phrase_prompt = env::var("KONNYAKU_PHRASE_PROMPT").unwrap_or_default();
        let sentence_prompt = env::var("KONNYAKU_SENTENCE_PROMPT").unwrap_or_default();
        let enabled = env::var("KONNYAKU_CUSTOM_PROMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false)
            && (!phrase_prompt.is_empty() || !sentence_prompt.is_empty());

        Self {
            enabled,
            phrase_prompt,
            sentence_prompt,
        }
    }
}
