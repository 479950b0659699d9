use crate::domain::model::AddressComponents;

const BUILDING_PREFIXES: &[&str] = &["อาคาร", "ตึก", "หมู่บ้าน", "วิลล่า", "คอนโด"];
const ROAD_PREFIXES: &[&str] = &["ถนน", "ถ."];
const SOI_PREFIXES: &[&str] = &["ซอย", "ซ."];

/// Folds house number, building, floor, road and soi into the single
/// "address line 1" stored in `house_number`. Each keyword appears once.
pub(super) fn assemble(out: &mut AddressComponents) {
    let mut parts: Vec<String> = Vec::new();

    if let Some(house) = out.house_number.as_deref() {
        parts.push(house.to_string());
    }
    if let Some(building) = out.building.as_deref() {
        parts.push(prefixed("อาคาร", building, BUILDING_PREFIXES));
    }
    if let Some(floor) = out.floor.as_deref() {
        parts.push(prefixed("ชั้น", floor, &["ชั้น"]));
    }
    if let Some(road) = out.road.as_deref() {
        parts.push(prefixed("ถนน", road, ROAD_PREFIXES));
    }
    if let Some(soi) = out.soi.as_deref() {
        parts.push(prefixed("ซอย", soi, SOI_PREFIXES));
    }

    if !parts.is_empty() {
        out.house_number = Some(parts.join(" "));
    }
}

fn prefixed(keyword: &str, value: &str, already: &[&str]) -> String {
    let value = value.trim();
    if already.iter().any(|prefix| value.starts_with(prefix)) {
        value.to_string()
    } else {
        format!("{keyword} {value}")
    }
}
