use std::env;

use serde::{Deserialize, Serialize};

fn default_request_timeout_secs() -> u64 {
    45
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Whole-request deadline for provider calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let request_timeout_secs = env::var("KONNYAKU_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_secs);

        Self {
            request_timeout_secs,
        }
    }
}
