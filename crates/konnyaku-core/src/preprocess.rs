use unicode_normalization::UnicodeNormalization;

/// Input cleanup applied before a prompt is built.
///
/// Classification runs on the trimmed original text; this only shapes what
/// the model sees (NFKC, stripped control characters, collapsed CR).
pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let normalized: String = text.nfkc().collect();

        normalized
            .replace('\r', "")
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect::<String>()
            .trim()
            .to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_normalizes() {
        let p = DefaultPreprocessor;
        assert_eq!(p.process("  ｈｅｌｌｏ  "), "hello");
        assert_eq!(p.process(""), "");
    }

    #[test]
    fn keeps_newlines_but_drops_carriage_returns() {
        let p = DefaultPreprocessor;
        assert_eq!(p.process("line one\r\nline two"), "line one\nline two");
    }
}
