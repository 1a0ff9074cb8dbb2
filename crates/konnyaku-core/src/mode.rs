use once_cell::sync::Lazy;
use regex::Regex;

static CJK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\u4e00-\u9fff]").expect("cjk"));
static SENTENCE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？…]").expect("sentence punct"));
static CLAUSE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;，；:：]").expect("clause punct"));

// Tuned cutoffs, not semantic boundaries. Adjust here, not in the control flow.
pub const MAX_TERM_WORDS: usize = 12;
pub const MAX_TERM_CJK: usize = 20;
pub const MAX_TERM_CHARS: usize = 60;
pub const PUNCT_TERM_WORDS: usize = 4;
pub const PUNCT_TERM_CJK: usize = 6;
pub const PUNCT_TERM_CHARS: usize = 18;

/// Decide whether input should be treated as a word/phrase lookup (`true`)
/// or a passage to translate (`false`).
///
/// Purely lexical: word count, CJK ideograph density, overall length and
/// punctuation. Empty input counts as a lookup by convention; anything
/// multi-line is a passage.
pub fn is_dictionary_mode(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.contains('\n') {
        return false;
    }

    let word_count = trimmed.split_whitespace().count();
    let cjk_count = CJK_RE.find_iter(trimmed).count();
    let total_len = trimmed.chars().count();
    let has_sentence_punct = SENTENCE_PUNCT_RE.is_match(trimmed);
    let has_clause_punct = CLAUSE_PUNCT_RE.is_match(trimmed);

    if word_count > MAX_TERM_WORDS || cjk_count > MAX_TERM_CJK || total_len > MAX_TERM_CHARS {
        return false;
    }
    if (has_sentence_punct || has_clause_punct)
        && (word_count > PUNCT_TERM_WORDS
            || cjk_count > PUNCT_TERM_CJK
            || total_len > PUNCT_TERM_CHARS)
    {
        return false;
    }

    true
}
