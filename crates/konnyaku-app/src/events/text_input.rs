use std::sync::Arc;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use konnyaku_core::language::resolve_speech_language;
use konnyaku_core::preprocess::{DefaultPreprocessor, Preprocessor};
use konnyaku_provider::LlmProvider;
use konnyaku_types::{AppEvent, ProcessorResult};

use crate::state::AppState;

/// Preprocess one piece of input and stream the provider's response to the
/// render task. Partial snapshots go out as `StreamPartial`, the finished
/// result as `StreamDone`.
pub async fn handle_text_input(
    state: &Arc<AppState>,
    provider: Arc<dyn LlmProvider>,
    text: String,
    render_tx: &AsyncSender<AppEvent>,
    cancel: &CancellationToken,
) {
    let preprocessor = DefaultPreprocessor;
    let text = preprocessor.process(&text);
    if text.is_empty() {
        tracing::debug!("input empty after preprocessing, skipping");
        return;
    }

    let target_lang = {
        let config = state.config.read().await;
        config.target_lang.clone()
    };

    let partial_tx = render_tx.clone();
    let on_partial = move |partial: ProcessorResult| {
        let tx = partial_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::StreamPartial(partial)).await;
        });
    };

    let result = provider
        .process(&text, &target_lang, Some(&on_partial), cancel.child_token())
        .await;

    let event = match result {
        Ok(result) => {
            if let ProcessorResult::Dictionary { data } = &result {
                save_pronunciation(state, provider.clone(), &data.word).await;
            }
            AppEvent::StreamDone(result)
        }
        Err(e) => {
            tracing::warn!("processing failed: {e}");
            AppEvent::StreamError(e.to_string())
        }
    };

    if let Err(e) = render_tx.send(event).await {
        tracing::warn!("render channel closed: {e}");
    }
}

/// Fetch TTS audio for the headword and save it when `--speak-out` is set.
async fn save_pronunciation(state: &Arc<AppState>, provider: Arc<dyn LlmProvider>, word: &str) {
    let Some(path) = state.speak_out.clone() else {
        return;
    };
    if word.is_empty() {
        return;
    }

    let speech_lang = resolve_speech_language(word, Some("auto"));
    tracing::debug!(%speech_lang, "requesting pronunciation audio");

    match provider.speak(word, &speech_lang).await {
        Ok(Some(bytes)) => {
            if let Err(e) = tokio::fs::write(&path, &bytes).await {
                tracing::warn!("failed to write audio to {}: {e}", path.display());
            } else {
                tracing::info!(bytes = bytes.len(), "saved audio to {}", path.display());
            }
        }
        Ok(None) => tracing::warn!("provider produced no audio for '{word}'"),
        Err(e) => tracing::warn!("speech synthesis failed: {e}"),
    }
}
