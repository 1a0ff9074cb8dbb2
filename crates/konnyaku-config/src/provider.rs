use std::env;

use serde::{Deserialize, Serialize};

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    /// Which backend to use: "gemini" or "openai".
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            gemini_api_key: String::new(),
            gemini_model: default_gemini_model(),
            openai_api_key: String::new(),
            openai_model: default_openai_model(),
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        let provider = env::var("KONNYAKU_PROVIDER").unwrap_or_else(|_| default_provider());
        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let gemini_model = env::var("GEMINI_MODEL").unwrap_or_else(|_| default_gemini_model());
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| default_openai_model());

        Self {
            provider,
            gemini_api_key,
            gemini_model,
            openai_api_key,
            openai_model,
        }
    }
}
