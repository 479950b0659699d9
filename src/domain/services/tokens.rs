//! Keyword vocabulary and token-level helpers shared by the extractors.

use once_cell::sync::Lazy;
use regex::Regex;

use super::gazetteer;

pub(crate) static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// Keywords that open an address section. A token starting with one of
/// these ends whatever section is being collected.
const SECTION_KEYWORDS: &[&str] = &[
    "บ้านเลขที่",
    "เลขที่",
    "หมู่บ้าน",
    "หมู่ที่",
    "หมู่",
    "ม.",
    "อาคาร",
    "ตึก",
    "คอนโด",
    "วิลล่า",
    "ชั้น",
    "ฟลอร์",
    "ห้องเลขที่",
    "ห้อง",
    "ซอย",
    "ซ.",
    "ถนน",
    "ถ.",
    "ตำบล",
    "ต.",
    "แขวง",
    "อำเภอ",
    "อ.",
    "เขต",
    "จังหวัด",
    "จ.",
    "รหัสไปรษณีย์",
    "ปณ.",
    "โทร",
    "เบอร์",
];

/// Keywords that may appear glued to the end of a previous word.
const EMBEDDED_KEYWORDS: &[&str] = &[
    "แขวง",
    "เขต",
    "ตำบล",
    "อำเภอ",
    "จังหวัด",
    "ซอย",
    "ถนน",
    "ชั้น",
    "อาคาร",
    "หมู่",
    "รหัสไปรษณีย์",
    "กรุงเทพ",
    "กทม",
];

/// Subdistrict/district/province markers.
pub(crate) const LOCALITY_MARKERS: &[&str] = &[
    "แขวง", "ตำบล", "ต.", "เขต", "อำเภอ", "อ.", "จังหวัด", "จ.",
];

/// Words that tell a line is an address rather than a name.
pub(crate) const ADDRESS_KEYWORDS: &[&str] = &[
    "ตำบล",
    "ต.",
    "แขวง",
    "อำเภอ",
    "อ.",
    "เขต",
    "จังหวัด",
    "จ.",
    "รหัสไปรษณีย์",
    "บ้านเลขที่",
    "เลขที่",
    "หมู่",
    "ม.",
    "ซอย",
    "ซ.",
    "ถนน",
    "ถ.",
    "อาคาร",
    "ตึก",
    "คอนโด",
    "ชั้น",
    "กรุงเทพ",
    "กทม",
];

pub(crate) fn starts_with_keyword(token: &str) -> bool {
    SECTION_KEYWORDS.iter().any(|kw| token.starts_with(kw))
}

pub(crate) fn contains_address_keyword(text: &str) -> bool {
    ADDRESS_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Cuts a token where a glued keyword or bracket begins, e.g.
/// `คลองตันเขตคลองเตย` becomes `คลองตัน`.
pub(crate) fn cut_at_embedded_keyword(token: &str) -> &str {
    for (idx, c) in token.char_indices() {
        if c == '(' || c == ')' {
            return &token[..idx];
        }
        if idx > 0 && EMBEDDED_KEYWORDS.iter().any(|kw| token[idx..].starts_with(kw)) {
            return &token[..idx];
        }
    }
    token
}

pub(crate) fn is_thai_letter(c: char) -> bool {
    matches!(c, '\u{0E01}'..='\u{0E2E}' | '\u{0E30}'..='\u{0E4E}')
}

pub(crate) fn is_thai_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| is_thai_letter(c) || c == 'ฯ')
}

/// Digits with optional `/`, `-` or `.` separators and nothing else.
pub(crate) fn is_numeric_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '/' | '-' | '.' | ' '))
}

pub(crate) fn is_latin_token(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_alphabetic())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '&' | '\''))
}

/// Whether a place name ending at `end` stands on its own: end of text, a
/// non-Thai character, or another keyword/place glued straight after it.
pub(crate) fn has_right_boundary(text: &str, end: usize) -> bool {
    let rest = &text[end..];
    match rest.chars().next() {
        None => true,
        Some(c) if !is_thai_letter(c) => true,
        Some(_) => starts_with_keyword(rest) || gazetteer::starts_with_locality(rest),
    }
}

/// Whether a place name starting at `start` begins a word: start of text, a
/// non-Thai character, or a marker/place glued straight before it.
pub(crate) fn has_left_boundary(text: &str, start: usize) -> bool {
    let before = &text[..start];
    match before.chars().next_back() {
        None => true,
        Some(c) if !is_thai_letter(c) => true,
        Some(_) => {
            LOCALITY_MARKERS.iter().any(|m| before.ends_with(m))
                || gazetteer::bangkok_districts()
                    .iter()
                    .any(|name| before.ends_with(name))
                || gazetteer::province_names()
                    .iter()
                    .any(|name| before.ends_with(name))
        }
    }
}

/// Abbreviated keywords such as `ถ.` or `อ.` only count at a word start.
pub(crate) fn abbreviation_ok(text: &str, start: usize, keyword: &str) -> bool {
    !keyword.ends_with('.')
        || text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_thai_letter(c))
}
