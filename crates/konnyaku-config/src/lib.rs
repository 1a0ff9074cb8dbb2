use std::env;

use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::prompts::PromptConfig;
use self::provider::ProviderConfig;

pub mod network;
pub mod prompts;
pub mod provider;

fn default_target_lang() -> String {
    "zh-CN".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub prompts: PromptConfig,
    pub network: NetworkConfig,

    /// Default translation target when the CLI does not override it.
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            prompts: PromptConfig::default(),
            network: NetworkConfig::default(),
            target_lang: default_target_lang(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let target_lang = env::var("KONNYAKU_TARGET_LANG").unwrap_or_else(|_| default_target_lang());

        Config {
            provider: ProviderConfig::new(),
            prompts: PromptConfig::new(),
            network: NetworkConfig::new(),
            target_lang,
        }
    }
}
