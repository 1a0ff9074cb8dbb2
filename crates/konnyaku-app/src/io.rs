use kanal::AsyncSender;
use konnyaku_types::AppEvent;
use tokio::io::AsyncBufReadExt;
use tokio_util::sync::CancellationToken;

/// Feed user input into the event loop: a single CLI argument in one-shot
/// mode, otherwise stdin line by line until EOF or cancellation.
pub async fn watcher_io(
    one_shot: Option<String>,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if let Some(text) = one_shot {
        event_tx.send(AppEvent::TextInput(text)).await?;
        return Ok(());
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    event_tx.send(AppEvent::TextInput(line)).await?;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("stdin read failed: {e}");
                    break;
                }
            }
        }
    }

    Ok(())
}
