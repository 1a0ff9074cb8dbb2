use serde::{Deserialize, Serialize};

/// Structured dictionary result reconstructed from a model response.
///
/// Wire names are camelCase because the dictionary prompt asks the model for
/// exactly that JSON shape. Unknown fields (like the `mode` discriminator the
/// prompt also requests) are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DictionaryRecord {
    pub word: String,
    /// Short gloss line, absent until the stream has produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_translation: Option<String>,
    pub phonetic: String,
    pub parts_of_speech: String,
    pub definition: String,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    /// None means "no synonyms known yet"; examples stay a plain list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
}

/// What a provider request resolved (or is resolving) to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProcessorResult {
    Translation { text: String },
    Dictionary { data: DictionaryRecord },
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput(String),
    /// Snapshot rebuilt from the accumulated stream text.
    StreamPartial(ProcessorResult),
    StreamDone(ProcessorResult),
    StreamError(String),
    Shutdown,
}
