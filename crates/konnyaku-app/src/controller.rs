use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use konnyaku_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::render::render_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_render: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            input_to_app: kanal::bounded_async(64),    // user inputs
            app_to_render: kanal::bounded_async(256),  // streaming burst capacity
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the event, render and input tasks. All channel endpoints move
    /// into the tasks, so closing stdin (or finishing a one-shot input)
    /// unwinds the whole pipeline without explicit shutdown messages.
    pub fn spawn_tasks(&self, one_shot: Option<String>) -> JoinSet<anyhow::Result<()>> {
        let channels = ChannelSet::new();
        let (input_tx, input_rx) = channels.input_to_app;
        let (render_tx, render_rx) = channels.app_to_render;

        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            input_rx,
            render_tx,
            self.cancel_token.child_token(),
        ));

        tasks.spawn(render_loop(render_rx));

        tasks.spawn(watcher_io(
            one_shot,
            input_tx,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
