//! Static reference tables of Thai administrative names.
//!
//! Everything here is a `&'static` constant. Callers get lookup predicates
//! and read-only slice views; nothing in this module can be mutated.

/// Canonical province value used for every Bangkok spelling.
pub const BANGKOK: &str = "กรุงเทพ";

const BANGKOK_DISTRICTS: &[&str] = &[
    "พระนคร",
    "ดุสิต",
    "หนองจอก",
    "บางรัก",
    "บางเขน",
    "บางกะปิ",
    "ปทุมวัน",
    "ป้อมปราบศัตรูพ่าย",
    "พระโขนง",
    "มีนบุรี",
    "ลาดกระบัง",
    "ยานนาวา",
    "สัมพันธวงศ์",
    "พญาไท",
    "ธนบุรี",
    "บางกอกใหญ่",
    "ห้วยขวาง",
    "คลองสาน",
    "ตลิ่งชัน",
    "บางกอกน้อย",
    "บางขุนเทียน",
    "ภาษีเจริญ",
    "หนองแขม",
    "ราษฎร์บูรณะ",
    "บางพลัด",
    "ดินแดง",
    "บึงกุ่ม",
    "สาทร",
    "บางซื่อ",
    "จตุจักร",
    "บางคอแหลม",
    "ประเวศ",
    "คลองเตย",
    "สวนหลวง",
    "จอมทอง",
    "ดอนเมือง",
    "ราชเทวี",
    "ลาดพร้าว",
    "วัฒนา",
    "บางแค",
    "หลักสี่",
    "สายไหม",
    "คันนายาว",
    "สะพานสูง",
    "วังทองหลาง",
    "คลองสามวา",
    "บางนา",
    "ทวีวัฒนา",
    "ทุ่งครุ",
    "บางบอน",
];

/// Bangkok districts that contain a subdistrict of the same name.
const SAME_NAME_SUBDISTRICTS: &[&str] = &[
    "คลองเตย",
    "ดินแดง",
    "ลาดพร้าว",
    "บางรัก",
    "ห้วยขวาง",
    "จตุจักร",
    "บางซื่อ",
    "ดุสิต",
    "ปทุมวัน",
    "บางแค",
    "หนองจอก",
    "มีนบุรี",
    "ลาดกระบัง",
    "บางพลัด",
    "สวนหลวง",
    "จอมทอง",
    "ดอนเมือง",
    "สายไหม",
    "ทวีวัฒนา",
    "ทุ่งครุ",
    "คลองสาน",
    "ตลิ่งชัน",
    "สะพานสูง",
    "วังทองหลาง",
    "บางคอแหลม",
    "ประเวศ",
    "คันนายาว",
    "ราษฎร์บูรณะ",
];

/// Bangkok subdistricts whose parent district carries a different name.
const SUBDISTRICT_EXCEPTIONS: &[(&str, &str)] = &[
    ("คลองตัน", "คลองเตย"),
    ("พระโขนง", "คลองเตย"),
    ("พระโขนงเหนือ", "วัฒนา"),
    ("คลองตันเหนือ", "วัฒนา"),
    ("คลองเตยเหนือ", "วัฒนา"),
    ("ลุมพินี", "ปทุมวัน"),
    ("รองเมือง", "ปทุมวัน"),
    ("วังใหม่", "ปทุมวัน"),
    ("สีลม", "บางรัก"),
    ("สุริยวงศ์", "บางรัก"),
    ("มหาพฤฒาราม", "บางรัก"),
    ("สี่พระยา", "บางรัก"),
    ("ทุ่งมหาเมฆ", "สาทร"),
    ("ทุ่งวัดดอน", "สาทร"),
    ("ยานนาวา", "สาทร"),
    ("บางกะปิ", "ห้วยขวาง"),
    ("สามเสนนอก", "ห้วยขวาง"),
    ("จอมพล", "จตุจักร"),
    ("ลาดยาว", "จตุจักร"),
    ("จันทรเกษม", "จตุจักร"),
    ("เสนานิคม", "จตุจักร"),
    ("สามเสนใน", "พญาไท"),
    ("ทุ่งพญาไท", "ราชเทวี"),
    ("มักกะสัน", "ราชเทวี"),
    ("ถนนพญาไท", "ราชเทวี"),
    ("ถนนเพชรบุรี", "ราชเทวี"),
    ("บางจาก", "พระโขนง"),
    ("พระโขนงใต้", "พระโขนง"),
    ("บางนาเหนือ", "บางนา"),
    ("บางนาใต้", "บางนา"),
    ("คลองจั่น", "บางกะปิ"),
    ("หัวหมาก", "บางกะปิ"),
    ("จรเข้บัว", "ลาดพร้าว"),
    ("อนุสาวรีย์", "บางเขน"),
    ("ท่าแร้ง", "บางเขน"),
    ("ช่องนนทรี", "ยานนาวา"),
    ("บางโพงพาง", "ยานนาวา"),
    ("รัชดาภิเษก", "ดินแดง"),
    ("วงศ์สว่าง", "บางซื่อ"),
];

const PROVINCE_NAMES: &[&str] = &[
    BANGKOK,
    "กระบี่",
    "กาญจนบุรี",
    "กาฬสินธุ์",
    "กำแพงเพชร",
    "ขอนแก่น",
    "จันทบุรี",
    "ฉะเชิงเทรา",
    "ชลบุรี",
    "ชัยนาท",
    "ชัยภูมิ",
    "ชุมพร",
    "เชียงราย",
    "เชียงใหม่",
    "ตรัง",
    "ตราด",
    "ตาก",
    "นครนายก",
    "นครปฐม",
    "นครพนม",
    "นครราชสีมา",
    "นครศรีธรรมราช",
    "นครสวรรค์",
    "นนทบุรี",
    "นราธิวาส",
    "น่าน",
    "บึงกาฬ",
    "บุรีรัมย์",
    "ปทุมธานี",
    "ประจวบคีรีขันธ์",
    "ปราจีนบุรี",
    "ปัตตานี",
    "พระนครศรีอยุธยา",
    "พะเยา",
    "พังงา",
    "พัทลุง",
    "พิจิตร",
    "พิษณุโลก",
    "เพชรบุรี",
    "เพชรบูรณ์",
    "แพร่",
    "ภูเก็ต",
    "มหาสารคาม",
    "มุกดาหาร",
    "แม่ฮ่องสอน",
    "ยโสธร",
    "ยะลา",
    "ร้อยเอ็ด",
    "ระนอง",
    "ระยอง",
    "ราชบุรี",
    "ลพบุรี",
    "ลำปาง",
    "ลำพูน",
    "เลย",
    "ศรีสะเกษ",
    "สกลนคร",
    "สงขลา",
    "สตูล",
    "สมุทรปราการ",
    "สมุทรสงคราม",
    "สมุทรสาคร",
    "สระแก้ว",
    "สระบุรี",
    "สิงห์บุรี",
    "สุโขทัย",
    "สุพรรณบุรี",
    "สุราษฎร์ธานี",
    "สุรินทร์",
    "หนองคาย",
    "หนองบัวลำภู",
    "อ่างทอง",
    "อำนาจเจริญ",
    "อุดรธานี",
    "อุตรดิตถ์",
    "อุทัยธานี",
    "อุบลราชธานี",
];

/// Common spellings and abbreviations, mapped to the canonical name.
const PROVINCE_ALIASES: &[(&str, &str)] = &[
    ("กรุงเทพมหานคร", BANGKOK),
    ("กรุงเทพฯ", BANGKOK),
    ("กทม.", BANGKOK),
    ("กทม", BANGKOK),
    ("bangkok", BANGKOK),
    ("โคราช", "นครราชสีมา"),
    ("อยุธยา", "พระนครศรีอยุธยา"),
    ("สุราษฎร์", "สุราษฎร์ธานี"),
    ("อุบล", "อุบลราชธานี"),
    ("อุดร", "อุดรธานี"),
    ("นครศรีฯ", "นครศรีธรรมราช"),
];

/// Frequently seen districts outside Bangkok, with their province.
const KNOWN_NON_BANGKOK_DISTRICTS: &[(&str, &str)] = &[
    ("หัวหิน", "ประจวบคีรีขันธ์"),
    ("ชะอำ", "เพชรบุรี"),
    ("ปากช่อง", "นครราชสีมา"),
    ("บางละมุง", "ชลบุรี"),
    ("ศรีราชา", "ชลบุรี"),
    ("สัตหีบ", "ชลบุรี"),
    ("เกาะสมุย", "สุราษฎร์ธานี"),
    ("เกาะพะงัน", "สุราษฎร์ธานี"),
    ("เกาะช้าง", "ตราด"),
    ("เกาะลันตา", "กระบี่"),
    ("ปาย", "แม่ฮ่องสอน"),
    ("กะทู้", "ภูเก็ต"),
    ("ถลาง", "ภูเก็ต"),
    ("หาดใหญ่", "สงขลา"),
    ("แม่ริม", "เชียงใหม่"),
    ("หางดง", "เชียงใหม่"),
    ("สันทราย", "เชียงใหม่"),
    ("เชียงคาน", "เลย"),
    ("อัมพวา", "สมุทรสงคราม"),
    ("ปากเกร็ด", "นนทบุรี"),
    ("บางบัวทอง", "นนทบุรี"),
    ("บางพลี", "สมุทรปราการ"),
];

pub fn bangkok_districts() -> &'static [&'static str] {
    BANGKOK_DISTRICTS
}

pub fn province_names() -> &'static [&'static str] {
    PROVINCE_NAMES
}

pub fn known_non_bangkok_districts() -> &'static [(&'static str, &'static str)] {
    KNOWN_NON_BANGKOK_DISTRICTS
}

pub fn is_bangkok_district(name: &str) -> bool {
    BANGKOK_DISTRICTS.contains(&name)
}

pub fn is_same_name_subdistrict(district: &str) -> bool {
    SAME_NAME_SUBDISTRICTS.contains(&district)
}

/// Parent district of a Bangkok subdistrict listed in the exceptions table.
pub fn exception_parent_district(subdistrict: &str) -> Option<&'static str> {
    SUBDISTRICT_EXCEPTIONS
        .iter()
        .find(|(sub, _)| *sub == subdistrict)
        .map(|(_, district)| *district)
}

/// Subdistricts the exceptions table places under `district`.
pub fn exception_subdistricts_of(district: &str) -> impl Iterator<Item = &'static str> + '_ {
    SUBDISTRICT_EXCEPTIONS
        .iter()
        .filter(move |(_, parent)| *parent == district)
        .map(|(sub, _)| *sub)
}

/// Province of a district from the curated non-Bangkok list.
pub fn known_district_province(district: &str) -> Option<&'static str> {
    KNOWN_NON_BANGKOK_DISTRICTS
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, province)| *province)
}

/// Every surface form a province can be written as, paired with its
/// canonical name. Longer aliases come before the plain names.
pub fn province_surface_forms() -> impl Iterator<Item = (&'static str, &'static str)> {
    PROVINCE_ALIASES
        .iter()
        .copied()
        .chain(PROVINCE_NAMES.iter().map(|name| (*name, *name)))
}

/// Resolves a single token to a canonical province name.
///
/// Understands the `จังหวัด` / `จ.` prefixes and a trailing `ฯ`.
pub fn canonical_province(token: &str) -> Option<&'static str> {
    let token = token.trim();
    let token = token
        .strip_prefix("จังหวัด")
        .or_else(|| token.strip_prefix("จ."))
        .unwrap_or(token)
        .trim();
    if token.is_empty() {
        return None;
    }
    let lowered = token.to_lowercase();

    province_surface_forms()
        .find(|(surface, _)| *surface == lowered)
        .or_else(|| {
            let bare = lowered.trim_end_matches('ฯ');
            province_surface_forms().find(|(surface, _)| *surface == bare)
        })
        .map(|(_, canonical)| canonical)
}

/// True for any name the gazetteer knows as a place: province, alias,
/// Bangkok district, historical subdistrict or curated district.
pub fn is_locality_name(token: &str) -> bool {
    canonical_province(token).is_some()
        || is_bangkok_district(token)
        || exception_parent_district(token).is_some()
        || known_district_province(token).is_some()
}

/// True when `text` begins with a known place name.
pub fn starts_with_locality(text: &str) -> bool {
    let lowered = text.to_lowercase();
    province_surface_forms().any(|(surface, _)| lowered.starts_with(surface))
        || BANGKOK_DISTRICTS.iter().any(|name| text.starts_with(name))
        || SUBDISTRICT_EXCEPTIONS
            .iter()
            .any(|(name, _)| text.starts_with(name))
        || KNOWN_NON_BANGKOK_DISTRICTS
            .iter()
            .any(|(name, _)| text.starts_with(name))
        || text.starts_with("ประเทศไทย")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_province_table_is_complete() {
        assert_eq!(province_names().len(), 77);
        let mut unique = province_names().to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 77);
    }

    #[test]
    fn test_bangkok_district_table() {
        assert_eq!(bangkok_districts().len(), 50);
        assert!(is_bangkok_district("ลาดพร้าว"));
        assert!(!is_bangkok_district("หัวหิน"));
    }

    #[test]
    fn test_same_name_entries_are_bangkok_districts() {
        for name in SAME_NAME_SUBDISTRICTS {
            assert!(is_bangkok_district(name), "{name} is not a Bangkok district");
        }
        assert!(is_same_name_subdistrict("คลองเตย"));
        assert!(!is_same_name_subdistrict("สาทร"));
    }

    #[test]
    fn test_exception_parents_are_bangkok_districts() {
        for (_, district) in SUBDISTRICT_EXCEPTIONS {
            assert!(is_bangkok_district(district), "{district} is not a Bangkok district");
        }
        assert_eq!(exception_parent_district("คลองตัน"), Some("คลองเตย"));
        assert_eq!(exception_parent_district("พระโขนงเหนือ"), Some("วัฒนา"));
        assert_eq!(exception_parent_district("ลาดพร้าว"), None);
    }

    #[test]
    fn test_exception_subdistricts_of_district() {
        let under_watthana: Vec<_> = exception_subdistricts_of("วัฒนา").collect();
        assert!(under_watthana.contains(&"คลองตันเหนือ"));
        assert!(under_watthana.contains(&"พระโขนงเหนือ"));
        assert!(!under_watthana.contains(&"คลองตัน"));
        assert_eq!(exception_subdistricts_of("หัวหิน").count(), 0);
    }

    #[test]
    fn test_canonical_province() {
        assert_eq!(canonical_province("กทม"), Some(BANGKOK));
        assert_eq!(canonical_province("กรุงเทพฯ"), Some(BANGKOK));
        assert_eq!(canonical_province("Bangkok"), Some(BANGKOK));
        assert_eq!(canonical_province("จ.เชียงใหม่"), Some("เชียงใหม่"));
        assert_eq!(canonical_province("จังหวัดโคราช"), Some("นครราชสีมา"));
        assert_eq!(canonical_province("สุขุมวิท"), None);
        assert_eq!(canonical_province(""), None);
    }

    #[test]
    fn test_known_districts_point_at_real_provinces() {
        for (_, province) in known_non_bangkok_districts() {
            assert!(province_names().contains(province), "{province} unknown");
        }
        assert_eq!(known_district_province("หัวหิน"), Some("ประจวบคีรีขันธ์"));
    }

    #[test]
    fn test_locality_helpers() {
        assert!(is_locality_name("เชียงใหม่"));
        assert!(is_locality_name("สีลม"));
        assert!(!is_locality_name("พหลโยธิน"));
        assert!(starts_with_locality("กรุงเทพ 10110"));
        assert!(!starts_with_locality("สวนทอง"));
    }
}
