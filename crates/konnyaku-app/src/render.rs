use std::io::Write;

use kanal::AsyncReceiver;
use konnyaku_types::{AppEvent, DictionaryRecord, ProcessorResult};

/// Render streamed results to stdout. Partial snapshots overwrite a single
/// status line; the final result replaces it with the full block.
pub async fn render_loop(render_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    let mut streaming = false;

    while let Ok(event) = render_rx.recv().await {
        match event {
            AppEvent::StreamPartial(result) => {
                let line = summary_line(&result);
                write!(stdout, "\r\x1b[2K{line}")?;
                stdout.flush()?;
                streaming = true;
            }
            AppEvent::StreamDone(result) => {
                if streaming {
                    write!(stdout, "\r\x1b[2K")?;
                    streaming = false;
                }
                writeln!(stdout, "{}", format_result(&result))?;
                stdout.flush()?;
            }
            AppEvent::StreamError(message) => {
                if streaming {
                    write!(stdout, "\r\x1b[2K")?;
                    streaming = false;
                }
                stdout.flush()?;
                tracing::error!("{message}");
            }
            _ => {}
        }
    }

    Ok(())
}

pub(crate) fn format_result(result: &ProcessorResult) -> String {
    match result {
        ProcessorResult::Translation { text } => text.clone(),
        ProcessorResult::Dictionary { data } => format_dictionary(data),
    }
}

pub(crate) fn format_dictionary(record: &DictionaryRecord) -> String {
    let mut out = String::new();

    out.push_str(&record.word);
    if !record.phonetic.is_empty() {
        out.push_str(&format!("  {}", record.phonetic));
    }
    if !record.parts_of_speech.is_empty() {
        out.push_str(&format!("  ({})", record.parts_of_speech));
    }
    out.push('\n');

    if let Some(direct) = &record.direct_translation {
        if !direct.is_empty() {
            out.push_str(&format!("→ {direct}\n"));
        }
    }
    if !record.definition.is_empty() {
        out.push_str(&record.definition);
        out.push('\n');
    }
    if !record.examples.is_empty() {
        out.push_str("Examples:\n");
        for example in &record.examples {
            out.push_str(&format!("  - {example}\n"));
        }
    }
    if let Some(synonyms) = &record.synonyms {
        if !synonyms.is_empty() {
            out.push_str(&format!("Synonyms: {}\n", synonyms.join(", ")));
        }
    }
    if let Some(etymology) = &record.etymology {
        if !etymology.is_empty() {
            out.push_str(&format!("Etymology: {etymology}\n"));
        }
    }

    out.trim_end().to_string()
}

/// One-line progress summary for in-flight stream snapshots.
pub(crate) fn summary_line(result: &ProcessorResult) -> String {
    let line = match result {
        ProcessorResult::Translation { text } => text.replace('\n', " "),
        ProcessorResult::Dictionary { data } => {
            if data.definition.is_empty() {
                data.word.clone()
            } else {
                format!("{}: {}", data.word, data.definition.replace('\n', " "))
            }
        }
    };
    truncate_chars(&line, 100)
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
