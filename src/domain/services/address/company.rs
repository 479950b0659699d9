use once_cell::sync::Lazy;
use regex::Regex;

use super::sections::{take_value, Policy};
use crate::domain::services::span::{collapse_whitespace, Found, Span};

static THAI_COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"บริษัท\s*\S.*?จำกัด(?:\s*\(มหาชน\))?").unwrap());

static ABBREVIATED_COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"บจก\.|หจก\.|บมจ\.|ห้างหุ้นส่วนจำกัด").unwrap());

static ENGLISH_COMPANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b[a-z][a-z0-9&'.-]*(?:\s+[a-z0-9&'.-]+){0,4}?\s*(?:co\.?\s*,?\s*ltd\.?|company\s+limited|corporation|inc\.)",
    )
    .unwrap()
});

const COMPANY_POLICY: Policy = Policy {
    max_tokens: 3,
    thai_continuation: true,
    latin_continuation: true,
    trailing_number: false,
    word_start: false,
};

/// Company names written inside the address: full Thai form, the common
/// abbreviations, and English `Co., Ltd.` style names.
pub(super) fn find_company(text: &str) -> Option<Found> {
    if let Some(m) = THAI_COMPANY.find(text) {
        return Some(Found::new(collapse_whitespace(m.as_str()), Span::from_match(m)));
    }

    let abbreviated = ABBREVIATED_COMPANY.find_iter(text).find_map(|kw| {
        let (_, end) = take_value(text, kw.end(), COMPANY_POLICY)?;
        let raw = &text[kw.start()..end];
        Some(Found::new(collapse_whitespace(raw), Span::new(raw, kw.start())))
    });
    if abbreviated.is_some() {
        return abbreviated;
    }

    let m = ENGLISH_COMPANY.find(text)?;
    Some(Found::new(collapse_whitespace(m.as_str()), Span::from_match(m)))
}
