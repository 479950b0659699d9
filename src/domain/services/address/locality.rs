//! Province, district and subdistrict resolution.
//!
//! Works on what is left of the address once the line-one sections are cut
//! out. Each step only fills fields that are still empty, so an explicit
//! marker always beats the gazetteer, which beats the heuristics:
//!
//! 1. province: Bangkok gate, `จังหวัด`/`จ.` marker, then gazetteer search
//! 2. explicit `แขวง`/`ตำบล`/`ต.` and `เขต`/`อำเภอ`/`อ.` markers
//! 3. Bangkok district search, or the curated list outside Bangkok
//! 4. same-name collapse, then historical exceptions
//! 5. duplicate-token heuristic
//! 6. residual-token scan

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::AddressComponents;
use crate::domain::services::gazetteer::{self, BANGKOK};
use crate::domain::services::span::WorkingText;
use crate::domain::services::tokens::{self, TOKEN};

static BANGKOK_GATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)กรุงเทพ|กทม|bangkok").unwrap());

static PROVINCE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"จังหวัด|จ\.").unwrap());

static SUBDISTRICT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"แขวง|ตำบล|ต\.").unwrap());

static DISTRICT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"อำเภอ|เขต|อ\.").unwrap());

static SUBDISTRICT_THEN_DISTRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"แขวง\s*\S+?\s*เขต").unwrap());

/// Words that never name a place.
const NOISE_WORDS: &[&str] = &[
    "ที่อยู่", "ส่ง", "จัดส่ง", "ผู้รับ", "ประเทศไทย", "ไทย", "ใกล้", "ตรงข้าม", "ข้าง", "หน้า",
    "และ", "กับ", "ที่", "ค่ะ", "ครับ", "คะ", "นะ", "โทร",
];

const NOISE_PREFIXES: &[&str] = &["ใกล้", "ตรงข้าม"];

/// Which explicit markers the text carried.
#[derive(Debug, Default, Clone, Copy)]
struct Markers {
    subdistrict: bool,
    district: bool,
    /// `แขวง` or `เขต`, used only inside Bangkok.
    bangkok_style: bool,
}

pub(super) fn resolve(work: &mut WorkingText, out: &mut AddressComponents) {
    let scope = work.as_str().to_string();

    let mut bangkok = BANGKOK_GATE.is_match(&scope);
    if bangkok {
        out.province = Some(BANGKOK.to_string());
        excise_bangkok_names(work);
    } else if let Some(province) = take_marked_province(work) {
        out.province = Some(province);
    }

    let mut markers = Markers::default();
    if let Some((value, marker)) = take_marked(work, &SUBDISTRICT_MARKER) {
        markers.subdistrict = true;
        markers.bangkok_style |= marker == "แขวง";
        out.subdistrict = Some(value);
    }
    if let Some((value, marker)) = take_marked(work, &DISTRICT_MARKER) {
        markers.district = true;
        markers.bangkok_style |= marker == "เขต";
        out.district = Some(value);
    }

    if out.province.is_none() {
        out.province = search_province(work);
    }
    if out.province.is_none() {
        bangkok = infer_province(out, &markers);
    }
    expand_muang(out);

    if out.district.is_none() {
        if bangkok {
            let found = search_names(work.as_str(), gazetteer::bangkok_districts());
            if let Some((name, start)) = found {
                out.district = Some(name.to_string());
                work.excise_range(start, start + name.len());
            }
        } else if !markers.district {
            take_known_district(work, out);
        }
    }

    reconcile(out, &markers, bangkok);
    take_exception_subdistrict(work, out);
    apply_duplicate_tokens(&scope, out, &markers);
    scan_residual(work.as_str(), out, bangkok);
    reconcile(out, &markers, bangkok);

    tracing::debug!(
        "🗺️ locality: subdistrict={:?} district={:?} province={:?}",
        out.subdistrict,
        out.district,
        out.province
    );
}

/// Cuts every Bangkok surface form out of the working text, longest first.
fn excise_bangkok_names(work: &mut WorkingText) {
    let mut forms: Vec<&str> = gazetteer::province_surface_forms()
        .filter(|(_, canonical)| *canonical == BANGKOK)
        .map(|(surface, _)| surface)
        .collect();
    forms.sort_by_key(|form| std::cmp::Reverse(form.len()));

    for form in forms {
        // ASCII lowercasing keeps byte offsets intact
        while let Some(start) = work.as_str().to_ascii_lowercase().find(form) {
            work.excise_range(start, start + form.len());
        }
    }
}

fn take_marked_province(work: &mut WorkingText) -> Option<String> {
    let (start, end, province) = {
        let text = work.as_str();
        PROVINCE_MARKER.find_iter(text).find_map(|marker| {
            if !tokens::abbreviation_ok(text, marker.start(), marker.as_str()) {
                return None;
            }
            let token = TOKEN.find_at(text, marker.end())?;
            let value = tokens::cut_at_embedded_keyword(token.as_str());
            let province = gazetteer::canonical_province(value)
                .map(str::to_string)
                .or_else(|| tokens::is_thai_word(value).then(|| value.to_string()))?;
            Some((marker.start(), token.start() + value.len(), province))
        })?
    };
    work.excise_range(start, end);
    Some(province)
}

/// First marker from `pattern` with a usable name after it. Returns the name
/// and the marker it was written with.
fn take_marked(work: &mut WorkingText, pattern: &Regex) -> Option<(String, String)> {
    let (start, end, value, marker) = {
        let text = work.as_str();
        pattern.find_iter(text).find_map(|marker| {
            if !tokens::abbreviation_ok(text, marker.start(), marker.as_str()) {
                return None;
            }
            let token = TOKEN.find_at(text, marker.end())?;
            let value = tokens::cut_at_embedded_keyword(token.as_str());
            let usable = value.chars().any(tokens::is_thai_letter)
                && !value.chars().any(|c| c.is_ascii_digit())
                && !tokens::starts_with_keyword(value);
            if !usable {
                return None;
            }
            Some((
                marker.start(),
                token.start() + value.len(),
                value.to_string(),
                marker.as_str().to_string(),
            ))
        })?
    };
    work.excise_range(start, end);
    Some((value, marker))
}

/// Latest, then longest, province name standing on its own.
fn search_province(work: &mut WorkingText) -> Option<String> {
    let lowered = work.as_str().to_ascii_lowercase();
    let mut best: Option<(usize, usize, &'static str)> = None;

    for (surface, canonical) in gazetteer::province_surface_forms() {
        for (start, _) in lowered.match_indices(surface) {
            let end = start + surface.len();
            if !tokens::has_left_boundary(&lowered, start)
                || !tokens::has_right_boundary(&lowered, end)
            {
                continue;
            }
            let better = best.map_or(true, |(best_start, best_len, _)| {
                (start, surface.len()) > (best_start, best_len)
            });
            if better {
                best = Some((start, surface.len(), canonical));
            }
        }
    }

    let (start, len, canonical) = best?;
    work.excise_range(start, start + len);
    Some(canonical.to_string())
}

/// Latest, then longest, occurrence of one of `names` that stands on its own.
fn search_names<'a>(
    text: &str,
    names: impl IntoIterator<Item = &'a &'static str>,
) -> Option<(&'static str, usize)> {
    let mut best: Option<(usize, &'static str)> = None;

    for name in names {
        for (start, _) in text.match_indices(*name) {
            if !tokens::has_left_boundary(text, start)
                || !tokens::has_right_boundary(text, start + name.len())
            {
                continue;
            }
            let better = best.map_or(true, |(best_start, best_name)| {
                (start, name.len()) > (best_start, best_name.len())
            });
            if better {
                best = Some((start, *name));
            }
        }
    }

    best.map(|(start, name)| (name, start))
}

/// Fills a missing province from the district. Returns whether the address
/// turned out to be in Bangkok.
fn infer_province(out: &mut AddressComponents, markers: &Markers) -> bool {
    let district = out.district.as_deref();
    let subdistrict = out.subdistrict.as_deref();

    let bangkok = markers.bangkok_style
        && (district.is_some_and(gazetteer::is_bangkok_district)
            || subdistrict.and_then(gazetteer::exception_parent_district).is_some());
    if bangkok {
        out.province = Some(BANGKOK.to_string());
        return true;
    }

    let province = district.and_then(|d| {
        gazetteer::known_district_province(d)
            .or_else(|| d.strip_prefix("เมือง").and_then(gazetteer::canonical_province))
    });
    out.province = province.map(str::to_string);
    false
}

/// `อ.เมือง` is the seat district of whatever province the address is in.
fn expand_muang(out: &mut AddressComponents) {
    if out.district.as_deref() != Some("เมือง") {
        return;
    }
    if let Some(province) = out.province.as_deref().filter(|p| *p != BANGKOK) {
        out.district = Some(format!("เมือง{province}"));
    }
}

fn take_known_district(work: &mut WorkingText, out: &mut AddressComponents) {
    let names: Vec<&'static str> = gazetteer::known_non_bangkok_districts()
        .iter()
        .filter(|(_, province)| out.province.as_deref().map_or(true, |p| p == *province))
        .map(|(name, _)| *name)
        .collect();

    if let Some((name, start)) = search_names(work.as_str(), &names) {
        out.district = Some(name.to_string());
        if out.province.is_none() {
            out.province = gazetteer::known_district_province(name).map(str::to_string);
        }
        work.excise_range(start, start + name.len());
    }
}

/// Gazetteer facts that tie subdistrict and district together.
fn reconcile(out: &mut AddressComponents, markers: &Markers, bangkok: bool) {
    let in_bangkok = bangkok || out.province.as_deref() == Some(BANGKOK);

    if out.district.is_none() {
        if let Some(subdistrict) = out.subdistrict.as_deref() {
            let parent = gazetteer::exception_parent_district(subdistrict)
                .filter(|_| in_bangkok || out.province.is_none())
                .or_else(|| {
                    (in_bangkok && gazetteer::is_same_name_subdistrict(subdistrict))
                        .then_some(subdistrict)
                });
            if let Some(parent) = parent {
                out.district = Some(parent.to_string());
                if out.province.is_none() {
                    out.province = Some(BANGKOK.to_string());
                }
            }
        }
    }

    // Without a subdistrict marker a same-name district decides the
    // subdistrict, even over a heuristic guess.
    if !markers.subdistrict {
        let same_name = out
            .district
            .as_deref()
            .filter(|district| gazetteer::is_same_name_subdistrict(district))
            .map(str::to_string);
        if let Some(district) = same_name {
            if out.subdistrict.as_deref() != Some(district.as_str()) {
                tracing::trace!("same-name district {} collapses subdistrict", district);
                out.subdistrict = Some(district);
            }
        }
    }
}

/// A known district with an empty subdistrict: look for one of its
/// exceptions-table subdistricts in the remaining text.
fn take_exception_subdistrict(work: &mut WorkingText, out: &mut AddressComponents) {
    if out.subdistrict.is_some() {
        return;
    }
    let Some(district) = out.district.as_deref() else {
        return;
    };

    let names: Vec<&'static str> = gazetteer::exception_subdistricts_of(district).collect();
    if let Some((name, start)) = search_names(work.as_str(), &names) {
        out.subdistrict = Some(name.to_string());
        work.excise_range(start, start + name.len());
    }
}

/// A name written twice usually fills both levels (`ลาดพร้าว ลาดพร้าว`);
/// an explicit `แขวง … เขต` shape is trusted instead.
fn apply_duplicate_tokens(scope: &str, out: &mut AddressComponents, markers: &Markers) {
    if out.subdistrict.is_some() && out.district.is_some() {
        return;
    }
    if SUBDISTRICT_THEN_DISTRICT.is_match(scope) {
        return;
    }

    let words = candidate_words(scope);
    let occurrences = |word: &str| words.iter().filter(|w| **w == word).count();

    match (out.subdistrict.clone(), out.district.clone()) {
        (None, Some(district)) if !markers.subdistrict => {
            if occurrences(district.as_str()) >= 2 {
                out.subdistrict = Some(district);
            }
        }
        (Some(subdistrict), None) => {
            if occurrences(subdistrict.as_str()) >= 2 {
                out.district = Some(subdistrict);
            }
        }
        (None, None) => {
            let repeated = words.iter().copied().find(|word| {
                occurrences(*word) >= 2 && gazetteer::canonical_province(word).is_none()
            });
            if let Some(word) = repeated {
                out.subdistrict = Some(word.to_string());
                out.district = Some(word.to_string());
            }
        }
        _ => {}
    }
}

/// Last resort: leftover Thai words fill whichever level is still empty.
fn scan_residual(text: &str, out: &mut AddressComponents, bangkok: bool) {
    if out.subdistrict.is_some() && out.district.is_some() {
        return;
    }

    let province = out.province.clone();
    let words: Vec<&str> = candidate_words(text)
        .into_iter()
        .filter(|word| word.chars().count() >= 2)
        .filter(|word| Some(*word) != province.as_deref())
        .filter(|word| gazetteer::canonical_province(word).is_none())
        .collect();

    if bangkok || province.as_deref() == Some(BANGKOK) {
        scan_bangkok_residual(words, out);
        return;
    }

    match (out.subdistrict.is_some(), out.district.is_some()) {
        (false, true) => out.subdistrict = words.last().map(|w| w.to_string()),
        (true, false) => out.district = words.last().map(|w| w.to_string()),
        (false, false) => match words.as_slice() {
            [.., subdistrict, district] => {
                out.subdistrict = Some(subdistrict.to_string());
                out.district = Some(district.to_string());
            }
            [only] => out.district = Some(only.to_string()),
            [] => {}
        },
        (true, true) => {}
    }
}

/// Inside Bangkok the district comes only from the closed district list;
/// any other leftover word can at most be the subdistrict.
fn scan_bangkok_residual(mut words: Vec<&str>, out: &mut AddressComponents) {
    if out.district.is_none() {
        if let Some(pos) = words.iter().rposition(|w| gazetteer::is_bangkok_district(w)) {
            out.district = Some(words.remove(pos).to_string());
        }
    }
    if out.subdistrict.is_none() {
        out.subdistrict = words.last().map(|w| w.to_string());
    }
}

/// Thai words that could still be a place name.
fn candidate_words(text: &str) -> Vec<&str> {
    TOKEN
        .find_iter(text)
        .map(|m| strip_marker(m.as_str()))
        .map(tokens::cut_at_embedded_keyword)
        .filter(|word| {
            tokens::is_thai_word(word)
                && !tokens::starts_with_keyword(word)
                && !NOISE_WORDS.contains(word)
                && !NOISE_PREFIXES.iter().any(|prefix| word.starts_with(prefix))
        })
        .collect()
}

fn strip_marker(token: &str) -> &str {
    tokens::LOCALITY_MARKERS
        .iter()
        .find_map(|marker| token.strip_prefix(marker))
        .unwrap_or(token)
}
