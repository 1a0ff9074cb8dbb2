/// Split a server-sent-event byte stream into `data:` payloads.
///
/// Transport chunks can cut an event anywhere, including in the middle of a
/// multi-byte UTF-8 sequence, so both an undecoded byte tail and the text
/// after the last blank-line boundary stay buffered until the next feed.
#[derive(Debug, Default)]
pub struct SseSplitter {
    pending: Vec<u8>,
    buffer: String,
}

impl SseSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one transport chunk, returning every completed `data:` payload.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        self.drain_decoded();

        let combined = std::mem::take(&mut self.buffer).replace("\r\n", "\n");
        let mut events = Vec::new();
        let mut cursor = 0usize;

        while let Some(idx) = combined[cursor..].find("\n\n") {
            let raw_event = &combined[cursor..cursor + idx];
            cursor += idx + 2;

            for line in raw_event.split('\n') {
                if let Some(data) = line.strip_prefix("data:") {
                    let data = data.trim();
                    if !data.is_empty() {
                        events.push(data.to_string());
                    }
                }
            }
        }

        self.buffer = combined[cursor..].to_string();
        events
    }

    /// Move every complete UTF-8 sequence from `pending` into `buffer`,
    /// keeping a truncated trailing sequence for the next chunk. Bytes that
    /// can never form a valid sequence become U+FFFD.
    fn drain_decoded(&mut self) {
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(s) => {
                    self.buffer.push_str(s);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push('\u{FFFD}');
                            self.pending.drain(..valid + len);
                        }
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Unconsumed decoded tail, useful when a stream ends without a final
    /// boundary.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }
}
