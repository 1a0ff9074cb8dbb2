use konnyaku_config::prompts::PromptConfig;
use konnyaku_core::language::language_label;

/// System prompt for word/phrase lookups. The JSON contract here is what
/// the partial dictionary builder expects to see in the stream.
pub const DICTIONARY_PROMPT: &str = r#"You are a professional dictionary and language expert. When given a phrase or word (≤10 words):

1. **Direct Translation (准确直译)**: Provide the most accurate, concise translation that precisely captures the meaning
   - Format: "[Original] = [Translation] ([context if needed])"
   - Example: "สวัสดีครับ = 你好（男性用语）"
   - This MUST be the first line, clear and prominent
   - IT MUST ACCURATELY EXPRESS THE EXACT MEANING of the original phrase/word

2. **Detailed Explanation**: Then provide:
   - Pronunciation (use IPA only when appropriate for the source language; otherwise use the standard romanization/pronunciation scheme, e.g., Mandarin Pinyin with tone marks, Japanese Kana + Romaji, Korean Hangul + RR, Thai RTGS, Vietnamese Quoc ngu)
   - Part of speech
   - Detailed meaning and usage
   - Example sentences
   - Etymology (if interesting)

Target Language: {target_lang}
Input Text: "{text}"

Return a raw JSON object (no markdown) with this structure:
{
  "mode": "dictionary",
  "word": "{text}",
  "directTranslation": "Exact translation as described above",
  "phonetic": "Pronunciation per above (include scheme label when not IPA)",
  "partsOfSpeech": "n./v./adj.",
  "definition": "Detailed definition in target language",
  "examples": ["Example sentence 1", "Example sentence 2"],
  "etymology": "Brief origin",
  "synonyms": ["Synonym1", "Synonym2"]
}

IMPORTANT: Return ONLY valid JSON. Do not wrap in ```json blocks."#;

/// System prompt for passage translation.
pub const TRANSLATION_PROMPT: &str = r#"You are a professional translator. Translate the given text accurately while preserving tone, style, and cultural nuances. Provide natural, fluent translation. If the target language is English (Singapore), use natural Singaporean English word choice and mild Singlish particles sparingly (e.g., lah, lor) without being exaggerated.

Target Language: {target_lang}
Input Text: "{text}"

Preserve the original formatting exactly, including line breaks, indentation, bullet markers, and spacing.

Return ONLY the translated text. Do not wrap in JSON or markdown."#;

pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Assemble the system prompt for one request, honoring custom prompt
/// overrides from config.
pub fn build_system_prompt(
    text: &str,
    target_lang: &str,
    prompts: &PromptConfig,
    phrase_mode: bool,
) -> String {
    let target_label = language_label(target_lang);

    if prompts.enabled {
        let custom = if phrase_mode {
            &prompts.phrase_prompt
        } else {
            &prompts.sentence_prompt
        };
        return format!("{custom}\n\nTarget Language: {target_label}\nInput Text: \"{text}\"");
    }

    let template = if phrase_mode {
        DICTIONARY_PROMPT
    } else {
        TRANSLATION_PROMPT
    };
    render_template(template, &[("target_lang", &target_label), ("text", text)])
}
