use once_cell::sync::Lazy;
use regex::Regex;

static CJK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u4e00-\u9fff]").expect("cjk"));
static KANA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u3040-\u30ff]").expect("kana"));
static HANGUL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\uac00-\ud7af]").expect("hangul"));
static CYRILLIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u0400-\u04ff]").expect("cyrillic"));
static THAI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u0e00-\u0e7f]").expect("thai"));
static VIETNAMESE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "[ăâđêôơưĂÂĐÊÔƠƯàáảãạăằắẳẵặâầấẩẫậđèéẻẽẹêềếểễệìíỉĩịòóỏõọôồốổỗộơờớởỡợùúủũụưừứửữựỳýỷỹỵ]",
    )
    .expect("vietnamese")
});

/// Supported target languages, as presented to the user and to prompts.
pub const LANGUAGE_OPTIONS: &[(&str, &str)] = &[
    ("auto", "Auto Detect"),
    ("en-US", "English"),
    ("en-SG", "English (Singapore)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("zh-HK", "Cantonese (Hong Kong)"),
    ("ja-JP", "Japanese"),
    ("ko-KR", "Korean"),
    ("fr-FR", "French"),
    ("es-ES", "Spanish"),
    ("de-DE", "German"),
    ("ru-RU", "Russian"),
    ("th-TH", "Thai"),
    ("vi-VN", "Vietnamese"),
    ("ms-MY", "Malay"),
    ("id-ID", "Indonesian"),
    ("fil-PH", "Filipino"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("it-IT", "Italian"),
    ("ar-SA", "Arabic"),
    ("hi-IN", "Hindi"),
    ("tr-TR", "Turkish"),
    ("nl-NL", "Dutch"),
    ("sv-SE", "Swedish"),
    ("pl-PL", "Polish"),
    ("cs-CZ", "Czech"),
    ("el-GR", "Greek"),
    ("he-IL", "Hebrew"),
    ("ta-IN", "Tamil"),
    ("nan", "Min Nan (Taiwanese)"),
    ("lo-LA", "Lao"),
    ("km-KH", "Khmer"),
    ("bn-IN", "Bengali"),
    ("uk-UA", "Ukrainian"),
];

const DEFAULT_LOCALE_BY_LANG: &[(&str, &str)] = &[
    ("en", "en-us"),
    ("en_sg", "en-sg"),
    ("zh", "zh-cn"),
    ("ja", "ja-jp"),
    ("ko", "ko-kr"),
    ("fr", "fr-fr"),
    ("es", "es-es"),
    ("de", "de-de"),
    ("ru", "ru-ru"),
    ("th", "th-th"),
    ("vi", "vi-vn"),
    ("ms", "ms-my"),
    ("id", "id-id"),
    ("fil", "fil-ph"),
    ("pt", "pt-br"),
    ("it", "it-it"),
    ("ar", "ar-sa"),
    ("hi", "hi-in"),
    ("tr", "tr-tr"),
    ("nl", "nl-nl"),
    ("sv", "sv-se"),
    ("pl", "pl-pl"),
    ("cs", "cs-cz"),
    ("el", "el-gr"),
    ("he", "he-il"),
    ("ta", "ta-in"),
    ("uk", "uk-ua"),
    ("nan", "zh-tw"),
];

fn default_locale(base: &str) -> Option<&'static str> {
    DEFAULT_LOCALE_BY_LANG
        .iter()
        .find(|(lang, _)| *lang == base)
        .map(|(_, locale)| *locale)
}

/// Human-readable label for a language code, falling back to the code itself.
pub fn language_label(code: &str) -> String {
    let lower = code.to_lowercase();
    LANGUAGE_OPTIONS
        .iter()
        .find(|(c, _)| c.to_lowercase() == lower)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Normalize a language code to a full lowercase locale (`ja` -> `ja-jp`).
/// `auto` passes through so callers can defer to detection.
pub fn normalize_lang_code(lang: Option<&str>) -> String {
    let Some(lang) = lang else {
        return "en-us".to_string();
    };
    let lower = lang.to_lowercase();
    if lower == "auto" || lower == "en-sg" {
        return lower;
    }
    let base = lower.split('-').next().unwrap_or(&lower);
    if base == "nan" {
        return "zh-tw".to_string();
    }
    if lower.contains('-') {
        return lower;
    }
    default_locale(base)
        .map(str::to_string)
        .unwrap_or_else(|| base.to_string())
}

/// Guess the language of `text` from its script. First matching script wins.
pub fn detect_language(text: &str) -> &'static str {
    if CJK_RE.is_match(text) {
        "zh"
    } else if KANA_RE.is_match(text) {
        "ja"
    } else if HANGUL_RE.is_match(text) {
        "ko"
    } else if CYRILLIC_RE.is_match(text) {
        "ru"
    } else if THAI_RE.is_match(text) {
        "th"
    } else if VIETNAMESE_RE.is_match(text) {
        "vi"
    } else {
        "en"
    }
}

/// Locale to hand to a TTS voice: explicit language if given, otherwise
/// detected from the text itself.
pub fn resolve_speech_language(text: &str, lang: Option<&str>) -> String {
    let normalized = normalize_lang_code(lang);
    if normalized != "auto" {
        return normalized;
    }
    let detected = detect_language(text);
    default_locale(detected)
        .map(str::to_string)
        .unwrap_or_else(|| detected.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_scripts() {
        assert_eq!(detect_language("你好"), "zh");
        assert_eq!(detect_language("ゆっくり"), "ja");
        assert_eq!(detect_language("안녕하세요"), "ko");
        assert_eq!(detect_language("привет"), "ru");
        assert_eq!(detect_language("สวัสดี"), "th");
        assert_eq!(detect_language("cảm ơn"), "vi");
        assert_eq!(detect_language("hello"), "en");
    }

    #[test]
    fn cjk_outranks_kana_in_mixed_text() {
        // Kanji plus kana still detects as zh by block priority.
        assert_eq!(detect_language("勉強する"), "zh");
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_lang_code(None), "en-us");
        assert_eq!(normalize_lang_code(Some("auto")), "auto");
        assert_eq!(normalize_lang_code(Some("ja")), "ja-jp");
        assert_eq!(normalize_lang_code(Some("zh-TW")), "zh-tw");
        assert_eq!(normalize_lang_code(Some("en-SG")), "en-sg");
        assert_eq!(normalize_lang_code(Some("nan")), "zh-tw");
        assert_eq!(normalize_lang_code(Some("xx")), "xx");
    }

    #[test]
    fn labels_fall_back_to_code() {
        assert_eq!(language_label("ja-JP"), "Japanese");
        assert_eq!(language_label("JA-jp"), "Japanese");
        assert_eq!(language_label("zz-ZZ"), "zz-ZZ");
    }

    #[test]
    fn speech_language_resolution() {
        assert_eq!(resolve_speech_language("hello", Some("fr")), "fr-fr");
        assert_eq!(resolve_speech_language("こんにちは", Some("auto")), "ja-jp");
        assert_eq!(resolve_speech_language("hello", None), "en-us");
    }
}
