use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::services::gazetteer::BANGKOK;

/// Structured fields decomposed from a free-text contact/address block.
///
/// Every field is independently optional; `None` means the engine could not
/// determine it. `house_number` holds the composite first address line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdistrict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

/// Column names used by the tabular outputs, in output order.
pub const FIELD_NAMES: [&str; 14] = [
    "customerName",
    "customerPhone",
    "houseNumber",
    "village",
    "soi",
    "road",
    "subdistrict",
    "district",
    "province",
    "zipcode",
    "building",
    "floor",
    "roomNumber",
    "storeName",
];

impl AddressComponents {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|value| value.is_none())
    }

    /// Field values in [`FIELD_NAMES`] order.
    pub fn fields(&self) -> [Option<&str>; 14] {
        [
            self.customer_name.as_deref(),
            self.customer_phone.as_deref(),
            self.house_number.as_deref(),
            self.village.as_deref(),
            self.soi.as_deref(),
            self.road.as_deref(),
            self.subdistrict.as_deref(),
            self.district.as_deref(),
            self.province.as_deref(),
            self.zipcode.as_deref(),
            self.building.as_deref(),
            self.floor.as_deref(),
            self.room_number.as_deref(),
            self.store_name.as_deref(),
        ]
    }

    /// Shallow merge: every field set on `other` overwrites this one.
    pub fn merge(&mut self, other: &AddressComponents) {
        fn take(target: &mut Option<String>, source: &Option<String>) {
            if source.is_some() {
                target.clone_from(source);
            }
        }

        take(&mut self.customer_name, &other.customer_name);
        take(&mut self.customer_phone, &other.customer_phone);
        take(&mut self.house_number, &other.house_number);
        take(&mut self.village, &other.village);
        take(&mut self.soi, &other.soi);
        take(&mut self.road, &other.road);
        take(&mut self.subdistrict, &other.subdistrict);
        take(&mut self.district, &other.district);
        take(&mut self.province, &other.province);
        take(&mut self.zipcode, &other.zipcode);
        take(&mut self.building, &other.building);
        take(&mut self.floor, &other.floor);
        take(&mut self.room_number, &other.room_number);
        take(&mut self.store_name, &other.store_name);
    }

    /// Renders the record back into one canonical line of text that the
    /// parser reads back into the same components.
    pub fn to_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        match (&self.store_name, &self.customer_name) {
            (Some(store), Some(name)) if store != name => parts.push(format!("{store} ({name})")),
            (Some(store), _) => parts.push(store.clone()),
            (None, Some(name)) => parts.push(name.clone()),
            (None, None) => {}
        }
        if let Some(phone) = &self.customer_phone {
            parts.push(phone.clone());
        }
        if let Some(room) = &self.room_number {
            parts.push(format!("ห้อง {room}"));
        }
        if let Some(line) = &self.house_number {
            parts.push(line.clone());
        }
        if let Some(village) = &self.village {
            parts.push(format!("หมู่ {village}"));
        }

        let bangkok = self.province.as_deref() == Some(BANGKOK);
        let (sub_marker, district_marker) = if bangkok {
            ("แขวง", "เขต")
        } else {
            ("ตำบล", "อำเภอ")
        };
        if let Some(subdistrict) = &self.subdistrict {
            parts.push(format!("{sub_marker}{subdistrict}"));
        }
        if let Some(district) = &self.district {
            parts.push(format!("{district_marker}{district}"));
        }
        if let Some(province) = &self.province {
            if bangkok {
                parts.push(province.clone());
            } else {
                parts.push(format!("จังหวัด{province}"));
            }
        }
        if let Some(zipcode) = &self.zipcode {
            parts.push(zipcode.clone());
        }

        parts.join(" ")
    }
}

/// Layout of a batch input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Plain text, one pasted block per record, blocks separated by blank lines.
    #[default]
    Blocks,
    /// A CSV export; one column holds the raw text.
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub index: usize,
    pub source: String,
    pub components: AddressComponents,
}

#[derive(Debug, Clone)]
pub struct ParseBatch {
    pub records: Vec<ParsedRecord>,
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
    /// How many records had each field filled, keyed by column name.
    pub field_counts: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let components = AddressComponents::default();
        assert!(components.is_empty());
        assert_eq!(components.to_text(), "");
        assert_eq!(serde_json::to_string(&components).unwrap(), "{}");
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut contact = AddressComponents {
            customer_name: Some("คุณเอ".to_string()),
            customer_phone: Some("0812345678".to_string()),
            ..Default::default()
        };
        let address = AddressComponents {
            customer_name: Some("บจก. บีซี".to_string()),
            zipcode: Some("10110".to_string()),
            ..Default::default()
        };

        contact.merge(&address);

        assert_eq!(contact.customer_name.as_deref(), Some("บจก. บีซี"));
        assert_eq!(contact.customer_phone.as_deref(), Some("0812345678"));
        assert_eq!(contact.zipcode.as_deref(), Some("10110"));
    }

    #[test]
    fn test_camel_case_serialization() {
        let components = AddressComponents {
            customer_name: Some("คุณเอ".to_string()),
            room_number: Some("1203".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&components).unwrap();

        assert_eq!(json["customerName"], "คุณเอ");
        assert_eq!(json["roomNumber"], "1203");
        assert!(json.get("zipcode").is_none());
    }

    #[test]
    fn test_to_text_uses_regional_markers() {
        let bangkok = AddressComponents {
            subdistrict: Some("คลองตัน".to_string()),
            district: Some("คลองเตย".to_string()),
            province: Some(BANGKOK.to_string()),
            zipcode: Some("10110".to_string()),
            ..Default::default()
        };
        assert_eq!(bangkok.to_text(), "แขวงคลองตัน เขตคลองเตย กรุงเทพ 10110");

        let upcountry = AddressComponents {
            district: Some("บางละมุง".to_string()),
            province: Some("ชลบุรี".to_string()),
            ..Default::default()
        };
        assert_eq!(upcountry.to_text(), "อำเภอบางละมุง จังหวัดชลบุรี");
    }
}
