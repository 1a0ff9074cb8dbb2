use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use konnyaku_config::Config;
use konnyaku_provider::{GeminiProvider, LlmProvider, OpenAiProvider};
use konnyaku_types::AppEvent;

use crate::state::AppState;

mod text_input;

use text_input::handle_text_input;

pub fn build_provider(config: &Config) -> anyhow::Result<Arc<dyn LlmProvider>> {
    match config.provider.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::from_config(config))),
        "openai" => Ok(Arc::new(OpenAiProvider::from_config(config))),
        other => anyhow::bail!("unknown provider '{other}', expected gemini or openai"),
    }
}

/// Main event dispatch loop. Ends when all input senders are dropped.
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    render_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let provider = {
        let config = state.config.read().await;
        build_provider(&config)?
    };

    let meta = provider.metadata();
    tracing::info!(provider = meta.name, model = %meta.model, "provider ready");
    if meta.requires_api_key {
        tracing::debug!("provider requires an API key");
    }

    while let Ok(event) = input_rx.recv().await {
        handle_events(&state, provider.clone(), event, &render_tx, &cancel).await;
    }

    Ok(())
}

async fn handle_events(
    state: &Arc<AppState>,
    provider: Arc<dyn LlmProvider>,
    event: AppEvent,
    render_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
) {
    match event {
        AppEvent::TextInput(text) => {
            tracing::debug!("text input received");
            handle_text_input(state, provider, text, render_tx, cancel).await;
        }
        AppEvent::Shutdown => {
            cancel.cancel();
        }
        // Render-side events never arrive on this channel.
        AppEvent::StreamPartial(_) | AppEvent::StreamDone(_) | AppEvent::StreamError(_) => {}
    }
}
