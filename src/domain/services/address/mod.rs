//! Address extraction over the residual text left by the contact pass.

mod company;
mod house;
mod line;
mod locality;
mod sections;

use once_cell::sync::Lazy;
use regex::Regex;

use super::gazetteer::BANGKOK;
use super::span::{Found, Span, WorkingText};
use crate::domain::model::AddressComponents;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Markers of one well-known building that the general ladder mis-splits.
const CIT_TOWER_MARKERS: [&str; 3] = ["CIT Tower", "รัชดาภิเษก", "คลองเตย"];

/// Decomposes an address into its fields.
///
/// Never fails: anything that cannot be determined is left as `None`.
pub fn extract_address(text: &str) -> AddressComponents {
    let mut out = AddressComponents::default();
    if text.trim().is_empty() {
        return out;
    }
    let mut work = WorkingText::new(text);

    if CIT_TOWER_MARKERS.iter().all(|marker| text.contains(marker)) {
        tracing::debug!("🏢 CIT Tower record");
        return cit_tower(work);
    }

    if let Some(company) = company::find_company(text) {
        tracing::debug!("🏭 company in address: {}", company.value);
        out.customer_name = Some(company.value);
        work.excise(&company.span);
    }

    if let Some(zipcode) = find_zipcode(work.as_str()) {
        out.zipcode = Some(zipcode.value);
        work.excise(&zipcode.span);
    }

    sections::extract_sections(&mut work, &mut out);

    if let Some(house) = house::find_house_number(work.as_str()) {
        out.house_number = Some(house.value);
        work.excise(&house.span);
    }

    locality::resolve(&mut work, &mut out);
    line::assemble(&mut out);
    out
}

/// Fixed record for CIT Tower; only the floor and the house number are
/// read from the text.
fn cit_tower(mut work: WorkingText) -> AddressComponents {
    let mut out = AddressComponents {
        building: Some("CIT Tower".to_string()),
        road: Some("รัชดาภิเษก".to_string()),
        subdistrict: Some("คลองเตย".to_string()),
        district: Some("คลองเตย".to_string()),
        province: Some(BANGKOK.to_string()),
        zipcode: Some("10110".to_string()),
        ..Default::default()
    };

    if let Some(zipcode) = find_zipcode(work.as_str()) {
        work.excise(&zipcode.span);
    }
    if let Some(floor) = sections::floor(work.as_str()) {
        out.floor = Some(floor.value);
        work.excise(&floor.span);
    }
    if let Some(house) = house::find_house_number(work.as_str()) {
        out.house_number = Some(house.value);
    }

    line::assemble(&mut out);
    out
}

/// The last standalone five-digit number.
fn find_zipcode(text: &str) -> Option<Found> {
    DIGIT_RUN
        .find_iter(text)
        .filter(|m| m.as_str().len() == 5 && !m.as_str().starts_with('0'))
        .filter(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !matches!(before, Some('/' | '-')) && !matches!(after, Some('/' | '-'))
        })
        .last()
        .map(|m| Found::new(m.as_str(), Span::from_match(m)))
}
