use std::path::PathBuf;
use std::sync::Arc;

use konnyaku_config::Config;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// When set, synthesized audio for dictionary lookups lands here.
    pub speak_out: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Config, speak_out: Option<PathBuf>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            speak_out,
        }
    }
}
