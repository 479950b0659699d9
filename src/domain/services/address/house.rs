use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::services::ladder::{first_match, Rule};
use crate::domain::services::span::{Found, Span};
use crate::domain::services::tokens;

static LABELED_HOUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:บ้านเลขที่|เลขที่)\s*([0-9]+(?:/[0-9]+)*(?:-[0-9]+)?[ก-ฮ]?)").unwrap()
});

static SLASHED_HOUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:/[0-9]+)+(?:-[0-9]+)?").unwrap());

static LEADING_HOUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]+(?:/[0-9]+)*[ก-ฮ]?)(?:\s|$)").unwrap());

static ANY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:/[0-9]+)?[ก-ฮ]?").unwrap());

const HOUSE_RULES: &[Rule<Found>] = &[
    Rule::new("labeled", labeled),
    Rule::new("slashed", slashed),
    Rule::new("leading", leading),
    Rule::new("any number", any_number),
];

/// House number from what is left after the zipcode and the keyword
/// sections were cut out.
pub(super) fn find_house_number(text: &str) -> Option<Found> {
    first_match("house number", HOUSE_RULES, text)
}

fn labeled(text: &str) -> Option<Found> {
    LABELED_HOUSE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let number = caps.get(1)?;
        let end = drop_glued_letter(text, number.start(), number.end());
        Some(Found::new(
            &text[number.start()..end],
            Span::new(&text[whole.start()..end], whole.start()),
        ))
    })
}

fn slashed(text: &str) -> Option<Found> {
    SLASHED_HOUSE.find_iter(text).find_map(|m| {
        let before = text[..m.start()].chars().next_back();
        if before.is_some_and(|c| c.is_ascii_alphanumeric() || c == '/') {
            return None;
        }
        Some(Found::new(m.as_str(), Span::from_match(m)))
    })
}

fn leading(text: &str) -> Option<Found> {
    let number = LEADING_HOUSE.captures(text)?.get(1)?;
    Some(Found::new(number.as_str(), Span::from_match(number)))
}

fn any_number(text: &str) -> Option<Found> {
    ANY_NUMBER.find_iter(text).find_map(|m| {
        let before = text[..m.start()].chars().next_back();
        if before.is_some_and(|c| c.is_ascii_alphanumeric() || c == '.') {
            return None;
        }
        let end = drop_glued_letter(text, m.start(), m.end());
        Some(Found::new(
            &text[m.start()..end],
            Span::new(&text[m.start()..end], m.start()),
        ))
    })
}

/// A trailing consonant only belongs to the number (`12ก`) when no other
/// Thai letter follows it.
fn drop_glued_letter(text: &str, start: usize, end: usize) -> usize {
    match text[start..end].chars().next_back() {
        Some(last)
            if tokens::is_thai_letter(last)
                && text[end..].chars().next().is_some_and(tokens::is_thai_letter) =>
        {
            end - last.len_utf8()
        }
        _ => end,
    }
}
