//! Contact extraction: finds the phone number and the customer (or company)
//! name in a pasted block and hands back what is left for the address passes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::gazetteer;
use super::ladder::{first_match, Rule};
use super::span::{collapse_whitespace, mask_spans, subtract_spans, Found, Span};
use super::tokens::{self, TOKEN};
use crate::domain::model::AddressComponents;

const PHONE_BODY: &str = r"(?:\+66[-. ]?[0-9]{1,2}|0[0-9]{1,2})[-. ]?[0-9]{3}[-. ]?[0-9]{3,4}";

static PHONE_IN_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\(\s*({PHONE_BODY})\s*\)")).unwrap());

static LABELED_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:โทรศัพท์|โทร\.?|เบอร์โทรศัพท์|เบอร์โทร|เบอร์|มือถือ|mobile|phone|tel\.?|:)\s*[:.]?\s*({PHONE_BODY})"
    ))
    .unwrap()
});

static INTERNATIONAL_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+66[-. ]?[0-9]{1,2}[-. ]?[0-9]{3}[-. ]?[0-9]{3,4}").unwrap());

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

static SEGMENTED_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"0[0-9]{1,2}[-. ][0-9]{3}[-. ][0-9]{3,4}").unwrap());

static COMPANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"บริษัท\s*[^\n]+?\s*จำกัด(?:\s*\(มหาชน\))?").unwrap());

static SHOP_WITH_PERSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^\n()]+?)\s*\(([^()\n]*)\)").unwrap());

static HONORIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"คุณ|นางสาว|นาย|นาง|น\.ส\.|น\.สาว|ดร\.|ดอกเตอร์|อาจารย์").unwrap()
});

static NAME_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(?:ชื่อผู้รับ|ชื่อ|ผู้รับ|name)\s*:?\s*").unwrap());

static FIVE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{5}").unwrap());

/// Words that end a name even though they are not address keywords.
const NAME_STOPS: &[&str] = &[
    "มือถือ",
    "ที่อยู่",
    "tel",
    "phone",
    "mobile",
    "บริษัท",
    "บจก",
    "หจก",
    "บมจ",
    "ห้างหุ้นส่วน",
];

const PHONE_RULES: &[Rule<Found>] = &[
    Rule::new("parenthesized", phone_in_parens),
    Rule::new("labeled", labeled_phone),
    Rule::new("bare", bare_phone),
    Rule::new("segmented", segmented_phone),
];

const NAME_RULES: &[Rule<NameMatch>] = &[
    Rule::new("company", company_name),
    Rule::new("shop", shop_name),
    Rule::new("honorific", honorific_name),
    Rule::new("first line", first_line_name),
];

/// Result of the contact pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactExtraction {
    /// Only `customer_name`, `customer_phone` and `store_name` are ever set.
    pub components: AddressComponents,
    /// The input with the accepted name and phone cut out.
    pub residual: String,
}

#[derive(Debug, Clone)]
struct NameMatch {
    name: Found,
    store_name: Option<String>,
}

impl NameMatch {
    fn person(name: Found) -> Self {
        Self {
            name,
            store_name: None,
        }
    }
}

pub fn extract_contact(text: &str) -> ContactExtraction {
    let mut components = AddressComponents::default();
    let mut spans: Vec<Span> = Vec::new();

    if let Some(phone) = first_match("phone", PHONE_RULES, text) {
        tracing::debug!("📞 phone: {}", phone.value);
        components.customer_phone = Some(phone.value);
        spans.push(phone.span);
    }

    // 名字在遮蔽電話後的文字上找，位移不變
    let masked = mask_spans(text, &spans);
    if let Some(hit) = first_match("name", NAME_RULES, &masked) {
        tracing::debug!("👤 name: {}", hit.name.value);
        let span = &hit.name.span;
        if let Some(slice) = text.get(span.start..span.end()) {
            spans.push(Span::new(slice, span.start));
        }
        components.customer_name = Some(hit.name.value);
        components.store_name = hit.store_name;
    }

    let residual = subtract_spans(text, &spans);
    ContactExtraction {
        components,
        residual,
    }
}

/// Digits only, `+66` folded to a leading `0`; `None` unless the result
/// starts with `0` and has 9 or 10 digits.
pub(crate) fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.strip_prefix("66") {
        Some(rest) if raw.trim_start().starts_with('+') => format!("0{rest}"),
        _ => digits,
    };
    (digits.starts_with('0') && (9..=10).contains(&digits.len())).then_some(digits)
}

fn digits_isolated(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

fn phone_in_parens(text: &str) -> Option<Found> {
    PHONE_IN_PARENS.captures_iter(text).find_map(|caps| {
        let body = caps.get(1)?;
        let number = normalize_phone(body.as_str())?;
        Some(Found::new(number, Span::from_match(body)))
    })
}

fn labeled_phone(text: &str) -> Option<Found> {
    LABELED_PHONE
        .captures_iter(text)
        .find_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            if !digits_isolated(text, body.start(), body.end()) {
                return None;
            }
            let number = normalize_phone(body.as_str())?;
            Some(Found::new(number, Span::from_match(whole)))
        })
        .or_else(|| {
            INTERNATIONAL_PHONE.find_iter(text).find_map(|m| {
                if !digits_isolated(text, m.start(), m.end()) {
                    return None;
                }
                let number = normalize_phone(m.as_str())?;
                Some(Found::new(number, Span::from_match(m)))
            })
        })
}

fn bare_phone(text: &str) -> Option<Found> {
    DIGIT_RUN.find_iter(text).find_map(|m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        // part of a house number like 12/0812345 or 5-0812345
        if matches!(before, Some('/' | '-' | '.')) || matches!(after, Some('/' | '-')) {
            return None;
        }
        let number = normalize_phone(m.as_str())?;
        Some(Found::new(number, Span::from_match(m)))
    })
}

fn segmented_phone(text: &str) -> Option<Found> {
    SEGMENTED_PHONE.find_iter(text).find_map(|m| {
        if !digits_isolated(text, m.start(), m.end()) {
            return None;
        }
        let number = normalize_phone(m.as_str())?;
        Some(Found::new(number, Span::from_match(m)))
    })
}

fn company_name(text: &str) -> Option<NameMatch> {
    let m = COMPANY.find(text)?;
    Some(NameMatch::person(Found::new(
        collapse_whitespace(m.as_str()),
        Span::from_match(m),
    )))
}

fn shop_name(text: &str) -> Option<NameMatch> {
    let (offset, line) = first_line(text)?;

    if let Some(caps) = SHOP_WITH_PERSON.captures(line) {
        let (whole, shop, person) = (caps.get(0)?, caps.get(1)?, caps.get(2)?);
        let person_name = person.as_str().trim();
        if acceptable_person(person_name) && acceptable_shop(shop.as_str()) {
            let start = offset + shop.start();
            let end = offset + whole.end();
            return Some(NameMatch {
                name: Found::new(
                    collapse_whitespace(person_name),
                    Span::new(&text[start..end], start),
                ),
                store_name: Some(collapse_whitespace(shop.as_str())),
            });
        }
    }

    let start = offset + (line.len() - line.trim_start().len());
    if !text[start..].starts_with("ร้าน") {
        return None;
    }
    let end = name_extent(text, start, 4)?;
    let shop = collapse_whitespace(&text[start..end]);
    if shop == "ร้าน" {
        return None;
    }
    Some(NameMatch {
        name: Found::new(shop.clone(), Span::new(&text[start..end], start)),
        store_name: Some(shop),
    })
}

fn acceptable_person(person: &str) -> bool {
    !person.is_empty()
        && !tokens::is_numeric_token(person)
        && person.chars().count() < 15
        && !tokens::contains_address_keyword(person)
}

fn acceptable_shop(shop: &str) -> bool {
    let shop = shop.trim();
    !shop.is_empty()
        && !shop.starts_with(|c: char| c.is_ascii_digit())
        && !tokens::contains_address_keyword(shop)
        && shop.chars().count() < 50
}

fn honorific_name(text: &str) -> Option<NameMatch> {
    HONORIFIC.find_iter(text).find_map(|m| {
        if !honorific_boundary(text, m.start()) {
            return None;
        }
        let end = name_extent(text, m.start(), 3)?;
        if end <= m.end() {
            return None;
        }
        let raw = &text[m.start()..end];
        Some(NameMatch::person(Found::new(
            collapse_whitespace(raw),
            Span::new(raw, m.start()),
        )))
    })
}

/// An honorific must start a word, and must not be the start of a place
/// name written after a marker (`อำเภอ นางรอง`).
fn honorific_boundary(text: &str, start: usize) -> bool {
    let before = &text[..start];
    let word_start = match before.chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, ',' | '(' | '|' | ':'),
    };
    word_start
        && !before
            .split_whitespace()
            .next_back()
            .is_some_and(|prev| tokens::LOCALITY_MARKERS.iter().any(|m| prev.ends_with(m)))
}

fn first_line_name(text: &str) -> Option<NameMatch> {
    let (offset, line) = first_line(text)?;
    let segment = &line[..line.find([',', '|']).unwrap_or(line.len())];
    let lead = segment.len() - segment.trim_start().len();
    let value_start = lead + NAME_LABEL.find(&segment[lead..]).map_or(0, |m| m.end());

    let value = segment[value_start..].split('(').next()?.trim_end();
    let acceptable = !value.is_empty()
        && !is_bare_honorific(value)
        && !value.starts_with(|c: char| c.is_ascii_digit())
        && !tokens::is_numeric_token(value)
        && !tokens::contains_address_keyword(value)
        && !FIVE_DIGITS.is_match(value)
        && !gazetteer::is_locality_name(value)
        && value.chars().count() < 50;
    if !acceptable {
        return None;
    }

    let start = offset + lead;
    let end = offset + value_start + value.len();
    Some(NameMatch::person(Found::new(
        collapse_whitespace(value),
        Span::new(&text[start..end], start),
    )))
}

/// A title with nobody behind it, e.g. `นาย` alone on the first line.
fn is_bare_honorific(value: &str) -> bool {
    HONORIFIC
        .find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

fn first_line(text: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    for line in text.split('\n') {
        if !line.trim().is_empty() {
            return Some((offset, line));
        }
        offset += line.len() + 1;
    }
    None
}

/// End offset of a name beginning at `start`: at most `max_tokens` words,
/// stopping at digits, brackets, separators, line breaks, and address or
/// phone words.
fn name_extent(text: &str, start: usize, max_tokens: usize) -> Option<usize> {
    let mut end = start;
    let mut pos = start;

    for count in 0..max_tokens {
        let Some(m) = TOKEN.find_at(text, pos) else {
            break;
        };
        // a line break or a blanked-out phone ends the name
        let gap = &text[end..m.start()];
        if count > 0 && (gap.contains('\n') || gap.len() > 3) {
            break;
        }
        let token = m.as_str();
        let cut = token
            .find(|c: char| c.is_ascii_digit() || "()[],|:;".contains(c))
            .unwrap_or(token.len());
        let word = &token[..cut];
        if word.is_empty() {
            break;
        }
        if count > 0 && ends_name(word) {
            break;
        }
        end = m.start() + cut;
        if cut < token.len() {
            break;
        }
        pos = m.end();
    }

    (end > start).then_some(end)
}

fn ends_name(word: &str) -> bool {
    let lowered = word.to_lowercase();
    tokens::starts_with_keyword(word)
        || gazetteer::starts_with_locality(word)
        || NAME_STOPS.iter().any(|stop| lowered.starts_with(stop))
}
