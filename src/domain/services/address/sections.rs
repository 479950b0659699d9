//! Keyword-led sections of the first address line: room, village (หมู่),
//! soi, road, building and floor. Each one is matched on its own and cut out
//! of the working text once accepted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::AddressComponents;
use crate::domain::services::gazetteer;
use crate::domain::services::span::{collapse_whitespace, Found, Span, WorkingText};
use crate::domain::services::tokens::{self, TOKEN};

static ROOM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(ห้องเลขที่|ห้องที่|ห้อง|room|rm\.?)\s*([a-z]?[0-9]+[a-z0-9/-]*)").unwrap()
});

static VILLAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(หมู่ที่|หมู่|ม\.)\s*([0-9]{1,3})").unwrap());

static SOI_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"ซอย|ซ\.").unwrap());

static ROAD_KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"ถนน|ถ\.").unwrap());

static BUILDING_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"หมู่บ้าน|วิลล่า|คอนโด|อาคาร|ตึก").unwrap());

static ENGLISH_BUILDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:[a-z][a-z0-9&'.-]*\s+){1,4}(?:tower|complex|plaza|building|place|court|mansion|village|residence|condo)s?\b",
    )
    .unwrap()
});

static FLOOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(ชั้นที่|ชั้น|ฟลอร์|floor|fl\.)\s*([0-9]{1,3})").unwrap());

static SHORT_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").unwrap());

/// Building keywords whose value keeps the keyword (`หมู่บ้านสวนทอง`).
const NAMED_ESTATES: &[&str] = &["หมู่บ้าน", "วิลล่า", "คอนโด"];

/// How far a section value may run past its keyword.
#[derive(Debug, Clone, Copy)]
pub(super) struct Policy {
    pub max_tokens: usize,
    pub thai_continuation: bool,
    pub latin_continuation: bool,
    pub trailing_number: bool,
    /// The keyword itself must start a word.
    pub word_start: bool,
}

const SOI_POLICY: Policy = Policy {
    max_tokens: 2,
    thai_continuation: false,
    latin_continuation: false,
    trailing_number: true,
    word_start: false,
};

const ROAD_POLICY: Policy = Policy {
    max_tokens: 3,
    thai_continuation: false,
    latin_continuation: true,
    trailing_number: true,
    word_start: false,
};

const BUILDING_POLICY: Policy = Policy {
    max_tokens: 4,
    thai_continuation: true,
    latin_continuation: true,
    trailing_number: false,
    word_start: true,
};

/// A keyword plus the words collected after it.
#[derive(Debug, Clone)]
struct Section {
    keyword: String,
    words: Vec<String>,
    start: usize,
    end: usize,
}

pub(super) fn extract_sections(work: &mut WorkingText, out: &mut AddressComponents) {
    if let Some(room) = room(work.as_str()) {
        out.room_number = Some(room.value);
        work.excise(&room.span);
    }

    if let Some(village) = village(work.as_str()) {
        out.village = Some(village.value);
        work.excise(&village.span);
    }

    if let Some(soi) = find_section(work.as_str(), &SOI_KEYWORD, SOI_POLICY) {
        out.soi = Some(soi.words.join(" "));
        work.excise_range(soi.start, soi.end);
    }

    if let Some(road) = find_section(work.as_str(), &ROAD_KEYWORD, ROAD_POLICY) {
        out.road = Some(road.words.join(" "));
        work.excise_range(road.start, road.end);
    }

    if let Some(building) = find_section(work.as_str(), &BUILDING_KEYWORD, BUILDING_POLICY) {
        let value = if NAMED_ESTATES.contains(&building.keyword.as_str()) {
            collapse_whitespace(&work.as_str()[building.start..building.end])
        } else {
            building.words.join(" ")
        };
        out.building = Some(value);
        work.excise_range(building.start, building.end);
    } else if let Some(building) = english_building(work.as_str()) {
        out.building = Some(building.value);
        work.excise(&building.span);
    } else if let Some((building, floor)) = building_before_floor(work.as_str()) {
        out.building = Some(building.value);
        out.floor = Some(floor.value);
        work.excise(&building.span);
        work.excise(&floor.span);
    }

    if out.floor.is_none() {
        if let Some(floor) = floor(work.as_str()) {
            out.floor = Some(floor.value);
            work.excise(&floor.span);
        }
    }
}

pub(super) fn floor(text: &str) -> Option<Found> {
    FLOOR.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let number = caps.get(2)?;
        if next_char(text, whole.end()).is_some_and(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Found::new(number.as_str(), Span::from_match(whole)))
    })
}

fn room(text: &str) -> Option<Found> {
    ROOM.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let keyword = caps.get(1)?;
        let number = caps.get(2)?;
        let glued_to_word = prev_char(text, whole.start()).is_some_and(|c| c.is_ascii_alphabetic());
        if keyword.as_str().is_ascii() && glued_to_word {
            return None;
        }
        Some(Found::new(number.as_str(), Span::from_match(whole)))
    })
}

fn village(text: &str) -> Option<Found> {
    VILLAGE.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let keyword = caps.get(1)?;
        let number = caps.get(2)?;
        if !tokens::abbreviation_ok(text, whole.start(), keyword.as_str())
            || next_char(text, whole.end()).is_some_and(|c| c.is_ascii_digit() || c == '/')
        {
            return None;
        }
        Some(Found::new(number.as_str(), Span::from_match(whole)))
    })
}

fn find_section(text: &str, keyword: &Regex, policy: Policy) -> Option<Section> {
    keyword.find_iter(text).find_map(|kw| {
        if !tokens::abbreviation_ok(text, kw.start(), kw.as_str())
            || follows_subdistrict_marker(text, kw.start())
        {
            return None;
        }
        if policy.word_start && !tokens::has_left_boundary(text, kw.start()) {
            return None;
        }
        let (words, end) = take_value(text, kw.end(), policy)?;
        Some(Section {
            keyword: kw.as_str().to_string(),
            words: words.into_iter().map(str::to_string).collect(),
            start: kw.start(),
            end,
        })
    })
}

/// `แขวงถนนพญาไท` names a subdistrict, not a road.
fn follows_subdistrict_marker(text: &str, start: usize) -> bool {
    let before = text[..start].trim_end();
    ["แขวง", "ตำบล", "ต."].iter().any(|m| before.ends_with(m))
}

/// Collects the words following a keyword that ends at `from`.
///
/// The first word is always taken once trimmed at an embedded keyword;
/// further words are taken while `policy` allows. Returns the words and the
/// byte offset where the value ends.
pub(super) fn take_value(text: &str, from: usize, policy: Policy) -> Option<(Vec<&str>, usize)> {
    let first = TOKEN.find_at(text, from)?;
    let word = tokens::cut_at_embedded_keyword(first.as_str());
    if word.is_empty() || tokens::starts_with_keyword(word) {
        return None;
    }

    let mut words = vec![word];
    let mut end = first.start() + word.len();
    if word.len() < first.as_str().len() || tokens::is_numeric_token(word) {
        return Some((words, end));
    }

    let mut pos = first.end();
    while words.len() < policy.max_tokens {
        let Some(next) = TOKEN.find_at(text, pos) else {
            break;
        };
        let word = tokens::cut_at_embedded_keyword(next.as_str());
        if word.is_empty()
            || tokens::starts_with_keyword(word)
            || gazetteer::starts_with_locality(word)
            || word.contains('/')
        {
            break;
        }

        let after_latin = words.last().is_some_and(|w| tokens::is_latin_token(w));
        let accepted = if tokens::is_numeric_token(word) {
            policy.trailing_number && SHORT_NUMBER.is_match(word)
        } else if tokens::is_latin_token(word) {
            policy.latin_continuation || after_latin
        } else {
            policy.thai_continuation && tokens::is_thai_word(word)
        };
        if !accepted {
            break;
        }

        words.push(word);
        end = next.start() + word.len();
        if word.len() < next.as_str().len() || tokens::is_numeric_token(word) {
            break;
        }
        pos = next.end();
    }

    Some((words, end))
}

fn english_building(text: &str) -> Option<Found> {
    let m = ENGLISH_BUILDING.find(text)?;
    Some(Found::new(collapse_whitespace(m.as_str()), Span::from_match(m)))
}

/// `<name> ชั้น <n>`: the word in front of the floor is taken as the building.
fn building_before_floor(text: &str) -> Option<(Found, Found)> {
    let floor = floor(text)?;
    if !floor.span.text.starts_with("ชั้น") {
        return None;
    }
    let name = TOKEN.find_iter(&text[..floor.span.start]).last()?;
    let word = name.as_str();
    let plausible = (tokens::is_thai_word(word) || tokens::is_latin_token(word))
        && word.chars().count() >= 2
        && !tokens::starts_with_keyword(word)
        && !gazetteer::starts_with_locality(word);
    if !plausible {
        return None;
    }
    Some((Found::new(word, Span::from_match(name)), floor))
}

fn prev_char(text: &str, at: usize) -> Option<char> {
    text[..at].chars().next_back()
}

fn next_char(text: &str, at: usize) -> Option<char> {
    text[at..].chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(text: &str) -> (AddressComponents, String) {
        let mut work = WorkingText::new(text);
        let mut out = AddressComponents::default();
        extract_sections(&mut work, &mut out);
        (out, collapse_whitespace(work.as_str()))
    }

    #[test]
    fn test_soi_and_road() {
        let (out, rest) = sections("123/45 ซอยสุขุมวิท 21 ถนนสุขุมวิท แขวงคลองตัน");

        assert_eq!(out.soi.as_deref(), Some("สุขุมวิท 21"));
        assert_eq!(out.road.as_deref(), Some("สุขุมวิท"));
        assert_eq!(rest, "123/45 แขวงคลองตัน");
    }

    #[test]
    fn test_road_inside_subdistrict_name_is_skipped() {
        let (out, _) = sections("99 แขวงถนนพญาไท เขตราชเทวี");
        assert_eq!(out.road, None);
    }

    #[test]
    fn test_estate_keeps_keyword() {
        let (out, rest) = sections("99 หมู่บ้านสวนทอง ถนนพหลโยธิน เชียงใหม่");

        assert_eq!(out.building.as_deref(), Some("หมู่บ้านสวนทอง"));
        assert_eq!(out.road.as_deref(), Some("พหลโยธิน"));
        assert_eq!(rest, "99 เชียงใหม่");
    }

    #[test]
    fn test_building_floor_and_room() {
        let (out, rest) = sections("อาคาร CIT Tower ชั้น 12 ห้อง 1203");

        assert_eq!(out.building.as_deref(), Some("CIT Tower"));
        assert_eq!(out.floor.as_deref(), Some("12"));
        assert_eq!(out.room_number.as_deref(), Some("1203"));
        assert_eq!(rest, "");
    }

    #[test]
    fn test_english_building_suffix() {
        let (out, _) = sections("88 Lumpini Place ลาดพร้าว");
        assert_eq!(out.building.as_deref(), Some("Lumpini Place"));
    }

    #[test]
    fn test_building_named_before_floor() {
        let (out, _) = sections("เอ็มไพร์ ชั้น 5");

        assert_eq!(out.building.as_deref(), Some("เอ็มไพร์"));
        assert_eq!(out.floor.as_deref(), Some("5"));
    }

    #[test]
    fn test_village_number() {
        let (out, rest) = sections("99 หมู่ 4 ต.หนองป่าครั่ง");

        assert_eq!(out.village.as_deref(), Some("4"));
        assert_eq!(rest, "99 ต.หนองป่าครั่ง");
    }
}
