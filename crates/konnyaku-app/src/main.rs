use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use konnyaku_config::Config;

mod controller;
mod events;
mod io;
mod render;
mod state;

#[cfg(test)]
mod tests;

use crate::controller::AppController;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "konnyaku", about = "LLM dictionary and translation assistant")]
struct Args {
    /// Text to process once; reads stdin line by line when omitted
    text: Option<String>,

    /// Target language code, e.g. zh-CN, ja, en-SG
    #[arg(short, long)]
    target_lang: Option<String>,

    /// Provider override: gemini or openai
    #[arg(short, long)]
    provider: Option<String>,

    /// Write synthesized audio for dictionary lookups to this file
    #[arg(long, value_name = "PATH")]
    speak_out: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(target) = args.target_lang {
        config.target_lang = target;
    }
    if let Some(provider) = args.provider {
        config.provider.provider = provider;
    }

    let state = Arc::new(AppState::new(config, args.speak_out));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(args.text);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
            while tasks.join_next().await.is_some() {}
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => {
                    // Input closed cleanly. Dropped channel senders unwind the
                    // remaining tasks once in-flight work finishes, so drain
                    // without cancelling.
                    while let Some(res) = tasks.join_next().await {
                        if let Ok(Err(e)) = res {
                            tracing::error!("task exited with error: {e}");
                        }
                    }
                }
                Some(Ok(Err(e))) => {
                    tracing::error!("task exited with error: {e}");
                    controller.shutdown();
                    while tasks.join_next().await.is_some() {}
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    controller.shutdown();
                    while tasks.join_next().await.is_some() {}
                }
                None => {}
            }
        }
    }

    Ok(())
}
