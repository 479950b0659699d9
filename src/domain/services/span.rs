use once_cell::sync::Lazy;
use regex::Regex;

static EMPTY_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").unwrap());

/// Byte range of an accepted match inside the text it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub text: String,
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn new(text: &str, start: usize) -> Self {
        Self {
            text: text.to_string(),
            start,
            len: text.len(),
        }
    }

    pub fn from_match(m: regex::Match<'_>) -> Self {
        Self::new(m.as_str(), m.start())
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Whether the recorded offsets still point at the recorded text.
    fn lines_up(&self, original: &str) -> bool {
        original.get(self.start..self.end()) == Some(self.text.as_str())
    }
}

/// A value pulled out of the text together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Found {
    pub value: String,
    pub span: Span,
}

impl Found {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            span,
        }
    }
}

/// Removes every span from `original` and tidies what is left.
///
/// Spans whose offsets do not line up with `original` fall back to removing
/// the first occurrence of their text.
pub(crate) fn subtract_spans(original: &str, spans: &[Span]) -> String {
    let (mut aligned, loose): (Vec<&Span>, Vec<&Span>) =
        spans.iter().partition(|span| span.lines_up(original));
    aligned.sort_by_key(|span| span.start);

    let mut result = String::with_capacity(original.len());
    let mut cursor = 0;
    for span in aligned {
        if span.start > cursor {
            result.push_str(&original[cursor..span.start]);
        }
        result.push(' ');
        cursor = cursor.max(span.end());
    }
    if cursor < original.len() {
        result.push_str(&original[cursor..]);
    }

    for span in loose {
        if span.text.is_empty() {
            continue;
        }
        tracing::trace!("span '{}' drifted, removing by value", span.text);
        result = result.replacen(&span.text, " ", 1);
    }

    clean_residual(&result)
}

/// Replaces each span with the same number of spaces so that byte offsets
/// into the result stay valid.
pub(crate) fn mask_spans(original: &str, spans: &[Span]) -> String {
    let mut masked = original.to_string();
    for span in spans.iter().filter(|span| span.lines_up(original)) {
        masked.replace_range(span.start..span.end(), &" ".repeat(span.len));
    }
    masked
}

pub(crate) fn clean_residual(text: &str) -> String {
    let without_parens = EMPTY_PARENS.replace_all(text, " ");
    collapse_whitespace(&without_parens)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Offset-stable working copy used by the address passes.
///
/// Separators that carry no meaning for the patterns (line breaks, commas,
/// pipes, tabs) become plain spaces, and excised matches are blanked rather
/// than removed.
#[derive(Debug, Clone)]
pub(crate) struct WorkingText {
    text: String,
}

impl WorkingText {
    pub fn new(source: &str) -> Self {
        let text = source
            .chars()
            .map(|c| match c {
                '\n' | '\r' | '\t' | ',' | '|' | ';' => ' ',
                other => other,
            })
            .collect();
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn excise(&mut self, span: &Span) {
        if span.lines_up(&self.text) {
            self.text
                .replace_range(span.start..span.end(), &" ".repeat(span.len));
        }
    }

    pub fn excise_range(&mut self, start: usize, end: usize) {
        if let Some(slice) = self.text.get(start..end) {
            let span = Span::new(slice, start);
            self.excise(&span);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_spans_removes_by_position() {
        let original = "ส่ง 0812345678 ที่ 0812345678";
        let start = original.rfind("0812345678").unwrap();
        let spans = vec![Span::new("0812345678", start)];

        // only the second occurrence goes
        assert_eq!(subtract_spans(original, &spans), "ส่ง 0812345678 ที่");
    }

    #[test]
    fn test_subtract_spans_merges_overlaps_and_strips_parens() {
        let original = "คุณเอ (0812345678) 12/3";
        let name = Span::new("คุณเอ", 0);
        let phone_start = original.find('0').unwrap();
        let phone = Span::new("0812345678", phone_start);
        let overlap = Span::new("(0812345678)", phone_start - 1);

        assert_eq!(subtract_spans(original, &[name, phone, overlap]), "12/3");
    }

    #[test]
    fn test_subtract_spans_falls_back_to_value() {
        let drifted = Span::new("โทร", 99);
        assert_eq!(subtract_spans("โทร 0812345678", &[drifted]), "0812345678");
    }

    #[test]
    fn test_mask_keeps_offsets() {
        let original = "ชื่อ 0812345678 ที่อยู่";
        let start = original.find('0').unwrap();
        let masked = mask_spans(original, &[Span::new("0812345678", start)]);

        assert_eq!(masked.len(), original.len());
        assert!(!masked.contains("081"));
        assert!(masked.ends_with("ที่อยู่"));
    }

    #[test]
    fn test_working_text_excise_is_offset_stable() {
        let mut work = WorkingText::new("99,ถนนพหลโยธิน|50000");
        let tail = work.as_str().find("50000").unwrap();
        work.excise_range(0, 2);

        assert_eq!(work.as_str().find("50000"), Some(tail));
        assert!(work.as_str().starts_with("   ถนน"));
    }
}
