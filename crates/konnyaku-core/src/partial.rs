use once_cell::sync::Lazy;
use regex::Regex;

use konnyaku_types::DictionaryRecord;

static STRING_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:\\.|[^"\\])*)""#).expect("string item"));

fn field_string_re(key: &str) -> Regex {
    Regex::new(&format!(
        r#""{}"\s*:\s*"((?:\\.|[^"\\])*)""#,
        regex::escape(key)
    ))
    .expect("field string")
}

fn field_array_re(key: &str) -> Regex {
    // Non-greedy up to the first `]`, or end of input when the array is
    // still open because the stream cut off mid-element.
    Regex::new(&format!(
        r#"(?s)"{}"\s*:\s*\[(.*?)(?:\]|\z)"#,
        regex::escape(key)
    ))
    .expect("field array")
}

// Compiled once; the builder runs on every streamed delta.
static WORD_RE: Lazy<Regex> = Lazy::new(|| field_string_re("word"));
static DIRECT_TRANSLATION_RE: Lazy<Regex> = Lazy::new(|| field_string_re("directTranslation"));
static PHONETIC_RE: Lazy<Regex> = Lazy::new(|| field_string_re("phonetic"));
static PARTS_OF_SPEECH_RE: Lazy<Regex> = Lazy::new(|| field_string_re("partsOfSpeech"));
static DEFINITION_RE: Lazy<Regex> = Lazy::new(|| field_string_re("definition"));
static ETYMOLOGY_RE: Lazy<Regex> = Lazy::new(|| field_string_re("etymology"));
static EXAMPLES_RE: Lazy<Regex> = Lazy::new(|| field_array_re("examples"));
static SYNONYMS_RE: Lazy<Regex> = Lazy::new(|| field_array_re("synonyms"));

fn decode_json_string(value: &str) -> String {
    match serde_json::from_str::<String>(&format!("\"{value}\"")) {
        Ok(decoded) => decoded,
        Err(_) => value.replace("\\\"", "\"").replace("\\\\", "\\"),
    }
}

/// Last complete `"key": "value"` pair in `raw`, JSON-decoded.
///
/// The model may restart its output mid-stream, and an earlier hit can be a
/// false positive inside some other string value, so the last match wins.
fn extract_json_string(raw: &str, re: &Regex) -> Option<String> {
    let caps = re.captures_iter(raw).last()?;
    Some(decode_json_string(&caps[1]))
}

/// String elements of the last `"key": [...]` array in `raw`.
///
/// A truncated body falls back to collecting whatever complete string
/// literals it contains, silently dropping the unterminated tail.
fn extract_json_array(raw: &str, re: &Regex) -> Vec<String> {
    let Some(caps) = re.captures_iter(raw).last() else {
        return Vec::new();
    };
    let body = caps[1].to_string();

    match serde_json::from_str::<serde_json::Value>(&format!("[{body}]")) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => STRING_ITEM_RE
            .captures_iter(&body)
            .map(|item| decode_json_string(&item[1]))
            .collect(),
    }
}

/// Reconstruct a best-effort [`DictionaryRecord`] from the raw text of an
/// in-flight model response.
///
/// `raw` is the full accumulated stream so far and is usually not valid JSON
/// yet. Every field is re-derived from scratch on each call, so repeated
/// calls with growing input never regress a field that was already complete.
/// Total: any input yields a structurally valid record.
pub fn build_partial_dictionary(raw: &str, fallback_word: &str) -> DictionaryRecord {
    let word = extract_json_string(raw, &WORD_RE)
        .filter(|w| !w.is_empty())
        .unwrap_or_else(|| fallback_word.to_string());
    let direct_translation =
        extract_json_string(raw, &DIRECT_TRANSLATION_RE).filter(|s| !s.is_empty());
    let phonetic = extract_json_string(raw, &PHONETIC_RE).unwrap_or_default();
    let parts_of_speech = extract_json_string(raw, &PARTS_OF_SPEECH_RE).unwrap_or_default();
    let definition = extract_json_string(raw, &DEFINITION_RE).unwrap_or_default();
    let etymology = extract_json_string(raw, &ETYMOLOGY_RE).filter(|s| !s.is_empty());
    let examples = extract_json_array(raw, &EXAMPLES_RE);
    let synonyms = extract_json_array(raw, &SYNONYMS_RE);

    DictionaryRecord {
        word,
        direct_translation,
        phonetic,
        parts_of_speech,
        definition,
        examples,
        etymology,
        synonyms: if synonyms.is_empty() {
            None
        } else {
            Some(synonyms)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_scalar_is_not_extracted() {
        let record = build_partial_dictionary(r#"{"word":"cat","definition":"a sma"#, "cat");
        assert_eq!(record.word, "cat");
        assert_eq!(record.definition, "");
        assert_eq!(record.phonetic, "");
        assert_eq!(record.parts_of_speech, "");
        assert!(record.direct_translation.is_none());
        assert!(record.etymology.is_none());
        assert!(record.examples.is_empty());
        assert!(record.synonyms.is_none());
    }

    #[test]
    fn truncated_array_keeps_complete_items() {
        let record = build_partial_dictionary(r#"{"word":"cat","examples":["Meow","Pu"#, "cat");
        assert_eq!(record.examples, vec!["Meow".to_string()]);
    }

    #[test]
    fn garbage_input_yields_fallback_record() {
        let record = build_partial_dictionary("garbage not json at all", "fallback");
        assert_eq!(record.word, "fallback");
        assert_eq!(record.definition, "");
        assert!(record.examples.is_empty());
        assert!(record.synonyms.is_none());
    }

    #[test]
    fn empty_input_yields_fallback_record() {
        let record = build_partial_dictionary("", "λόγος");
        assert_eq!(record.word, "λόγος");
    }

    #[test]
    fn complete_object_extracts_every_field() {
        let raw = r#"{"mode":"dictionary","word":"ephemeral","directTranslation":"短暂的","phonetic":"/ɪˈfem(ə)rəl/","partsOfSpeech":"adj.","definition":"lasting a very short time","examples":["Fame is ephemeral.","An ephemeral bloom"],"etymology":"Greek ephēmeros","synonyms":["transient","fleeting"]}"#;
        let record = build_partial_dictionary(raw, "ephemeral");
        assert_eq!(record.word, "ephemeral");
        assert_eq!(record.direct_translation.as_deref(), Some("短暂的"));
        assert_eq!(record.phonetic, "/ɪˈfem(ə)rəl/");
        assert_eq!(record.parts_of_speech, "adj.");
        assert_eq!(record.definition, "lasting a very short time");
        assert_eq!(record.examples.len(), 2);
        assert_eq!(record.etymology.as_deref(), Some("Greek ephēmeros"));
        assert_eq!(
            record.synonyms,
            Some(vec!["transient".to_string(), "fleeting".to_string()])
        );
    }

    #[test]
    fn escaped_quotes_decode() {
        let raw = r#"{"word":"say","definition":"utter \"words\" aloud \\ more"}"#;
        let record = build_partial_dictionary(raw, "say");
        assert_eq!(record.definition, r#"utter "words" aloud \ more"#);
    }

    #[test]
    fn last_match_wins_when_field_repeats() {
        let raw = r#"{"word":"first"} {"word":"second"}"#;
        let record = build_partial_dictionary(raw, "x");
        assert_eq!(record.word, "second");
    }

    #[test]
    fn empty_word_falls_back() {
        let record = build_partial_dictionary(r#"{"word":""}"#, "fb");
        assert_eq!(record.word, "fb");
    }

    #[test]
    fn examples_synonyms_asymmetry() {
        let record = build_partial_dictionary(r#"{"word":"x"}"#, "x");
        assert!(record.examples.is_empty());
        assert!(record.synonyms.is_none());

        let record = build_partial_dictionary(r#"{"word":"x","synonyms":[]}"#, "x");
        assert!(record.synonyms.is_none());
    }

    #[test]
    fn non_string_array_elements_are_dropped() {
        let record =
            build_partial_dictionary(r#"{"word":"x","examples":["one",2,null,"three"]}"#, "x");
        assert_eq!(record.examples, vec!["one".to_string(), "three".to_string()]);
    }

    #[test]
    fn idempotent_for_identical_input() {
        let raw = r#"{"word":"cat","definition":"feline","examples":["Meow","Pu"#;
        assert_eq!(
            build_partial_dictionary(raw, "cat"),
            build_partial_dictionary(raw, "cat")
        );
    }

    #[test]
    fn completed_fields_never_regress_as_stream_grows() {
        let raw1 = r#"{"word":"cat","phonetic":"/kæt/","definition":"a small feline""#;
        let raw2 = format!("{raw1},\"examples\":[\"Meow\"]}}");
        let first = build_partial_dictionary(raw1, "cat");
        let second = build_partial_dictionary(&raw2, "cat");
        assert_eq!(first.word, second.word);
        assert_eq!(first.phonetic, second.phonetic);
        assert_eq!(first.definition, second.definition);
        assert_eq!(second.examples, vec!["Meow".to_string()]);
    }
}
