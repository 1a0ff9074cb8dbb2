use konnyaku_types::{DictionaryRecord, ProcessorResult};

use crate::render::{format_dictionary, format_result, summary_line};

fn sample_record() -> DictionaryRecord {
    DictionaryRecord {
        word: "serendipity".to_string(),
        phonetic: "/ˌsɛrənˈdɪpɪti/".to_string(),
        parts_of_speech: "noun".to_string(),
        direct_translation: Some("机缘巧合".to_string()),
        definition: "The occurrence of events by chance in a happy way.".to_string(),
        examples: vec![
            "A fortunate stroke of serendipity brought them together.".to_string(),
        ],
        synonyms: Some(vec!["fluke".to_string(), "chance".to_string()]),
        etymology: Some("Coined by Horace Walpole in 1754.".to_string()),
    }
}

#[test]
fn test_format_dictionary_full_record() {
    let out = format_dictionary(&sample_record());

    assert!(out.starts_with("serendipity  /ˌsɛrənˈdɪpɪti/  (noun)"));
    assert!(out.contains("→ 机缘巧合"));
    assert!(out.contains("The occurrence of events by chance in a happy way."));
    assert!(out.contains("Examples:\n  - A fortunate stroke"));
    assert!(out.contains("Synonyms: fluke, chance"));
    assert!(out.contains("Etymology: Coined by Horace Walpole"));
}

#[test]
fn test_format_dictionary_minimal_record() {
    let record = DictionaryRecord {
        word: "cat".to_string(),
        ..Default::default()
    };

    let out = format_dictionary(&record);
    assert_eq!(out, "cat");
}

#[test]
fn test_format_dictionary_skips_empty_optionals() {
    let record = DictionaryRecord {
        word: "cat".to_string(),
        direct_translation: Some(String::new()),
        definition: "A small feline.".to_string(),
        ..Default::default()
    };

    let out = format_dictionary(&record);
    assert!(!out.contains('→'));
    assert!(!out.contains("Synonyms"));
    assert!(out.contains("A small feline."));
}

#[test]
fn test_format_result_translation_passthrough() {
    let result = ProcessorResult::Translation {
        text: "Bonjour le monde".to_string(),
    };
    assert_eq!(format_result(&result), "Bonjour le monde");
}

#[test]
fn test_summary_line_flattens_and_truncates() {
    let result = ProcessorResult::Translation {
        text: format!("line one\nline two {}", "x".repeat(200)),
    };

    let line = summary_line(&result);
    assert!(!line.contains('\n'));
    assert!(line.chars().count() <= 100);
    assert!(line.ends_with('…'));
}

#[test]
fn test_summary_line_prefers_word_and_definition() {
    let result = ProcessorResult::Dictionary {
        data: DictionaryRecord {
            word: "cat".to_string(),
            definition: "A small feline.".to_string(),
            ..Default::default()
        },
    };

    assert_eq!(summary_line(&result), "cat: A small feline.");
}
