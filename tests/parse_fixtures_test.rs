use regex::Regex;
use thai_address_etl::domain::services::gazetteer::{self, BANGKOK};
use thai_address_etl::{
    parse_address_from_text, parse_customer_and_address_data, AddressComponents,
};

const SUKHUMVIT: &str = "คุณสมชาย ใจดี (0812345678) 123/45 ซอยสุขุมวิท 21 \
    ถนนสุขุมวิท แขวงคลองตัน เขตคลองเตย กรุงเทพ 10110";
const CIT_TOWER: &str = "เลขที่ 18/5 อาคาร CIT Tower ชั้น 12 ถนนรัชดาภิเษก คลองเตย";
const COMPANY: &str = "บริษัท ABC จำกัด 99 หมู่บ้านสวนทอง ถนนพหลโยธิน เชียงใหม่ 50000";
const LAT_PHRAO: &str = "นายเอ บีซี\nโทร 081-234-5678\n55 ลาดพร้าว กรุงเทพ 10230";

fn fixtures() -> Vec<AddressComponents> {
    [SUKHUMVIT, CIT_TOWER, COMPANY, LAT_PHRAO]
        .iter()
        .map(|text| parse_customer_and_address_data(text))
        .collect()
}

#[test]
fn test_named_contact_with_full_bangkok_address() {
    let out = parse_customer_and_address_data(SUKHUMVIT);

    assert_eq!(out.customer_name.as_deref(), Some("คุณสมชาย ใจดี"));
    assert_eq!(out.customer_phone.as_deref(), Some("0812345678"));
    assert_eq!(out.subdistrict.as_deref(), Some("คลองตัน"));
    assert_eq!(out.district.as_deref(), Some("คลองเตย"));
    assert_eq!(out.province.as_deref(), Some(BANGKOK));
    assert_eq!(out.zipcode.as_deref(), Some("10110"));
}

#[test]
fn test_cit_tower_record() {
    let out = parse_customer_and_address_data(CIT_TOWER);

    assert_eq!(out.building.as_deref(), Some("CIT Tower"));
    assert_eq!(out.road.as_deref(), Some("รัชดาภิเษก"));
    assert_eq!(out.district.as_deref(), Some("คลองเตย"));
    assert_eq!(out.subdistrict.as_deref(), Some("คลองเตย"));
    assert_eq!(out.province.as_deref(), Some(BANGKOK));
    assert_eq!(out.zipcode.as_deref(), Some("10110"));
    assert_eq!(out.floor.as_deref(), Some("12"));
    assert!(out.house_number.unwrap_or_default().contains("18/5"));
}

#[test]
fn test_company_with_upcountry_estate() {
    let out = parse_customer_and_address_data(COMPANY);

    assert!(out.customer_name.unwrap_or_default().contains("บริษัท ABC จำกัด"));
    assert_eq!(out.province.as_deref(), Some("เชียงใหม่"));
    assert_eq!(out.zipcode.as_deref(), Some("50000"));
    assert!(out.building.unwrap_or_default().contains("สวนทอง"));
}

#[test]
fn test_empty_input_is_empty_record() {
    assert!(parse_customer_and_address_data("").is_empty());
    assert!(parse_address_from_text("").is_empty());
}

#[test]
fn test_same_name_district_without_markers() {
    let out = parse_customer_and_address_data(LAT_PHRAO);

    assert_eq!(out.district.as_deref(), Some("ลาดพร้าว"));
    assert_eq!(out.subdistrict.as_deref(), Some("ลาดพร้าว"));
    assert_eq!(out.province.as_deref(), Some(BANGKOK));
}

#[test]
fn test_phone_and_zipcode_shapes() {
    let phone = Regex::new(r"^0[0-9]{8,9}$").unwrap();
    let zipcode = Regex::new(r"^[0-9]{5}$").unwrap();

    let extra = [
        "ร้านป้าแดง (คุณแดง) +66 81 234 5678\n12 ถนนนิมมานเหมินท์ ต.สุเทพ อ.เมือง จ.เชียงใหม่ 50200",
        "Tel: 02-123-4567 99/1 หมู่ 2 ต.บ้านใหม่ อ.ปากเกร็ด นนทบุรี 11120",
    ];
    let mut outputs = fixtures();
    outputs.extend(extra.iter().map(|text| parse_customer_and_address_data(text)));

    for out in &outputs {
        if let Some(value) = &out.customer_phone {
            assert!(phone.is_match(value), "bad phone {value}");
        }
        if let Some(value) = &out.zipcode {
            assert!(zipcode.is_match(value), "bad zipcode {value}");
        }
    }
}

#[test]
fn test_same_name_collapse_for_every_listed_district() {
    for district in ["บางรัก", "คลองเตย", "จตุจักร", "ลาดพร้าว"] {
        assert!(gazetteer::is_same_name_subdistrict(district));

        let out = parse_address_from_text(&format!("10 {district} กรุงเทพ"));
        assert_eq!(out.district.as_deref(), Some(district));
        assert_eq!(out.subdistrict, out.district, "for {district}");
    }
}

#[test]
fn test_composite_line_has_no_doubled_keywords() {
    for out in fixtures() {
        let line = out.house_number.unwrap_or_default();
        for keyword in ["อาคาร", "ชั้น", "ถนน", "ซอย"] {
            let doubled = format!("{keyword}{keyword}");
            let spaced = format!("{keyword} {keyword}");
            assert!(!line.contains(&doubled), "doubled {keyword} in {line}");
            assert!(!line.contains(&spaced), "doubled {keyword} in {line}");
        }
    }
}

#[test]
fn test_reparse_of_rendered_text_is_stable() {
    for text in [SUKHUMVIT, CIT_TOWER, COMPANY, LAT_PHRAO] {
        let first = parse_customer_and_address_data(text);
        let second = parse_customer_and_address_data(&first.to_text());

        assert_eq!(second, first, "{text}");
    }
}

#[test]
fn test_same_name_district_beats_leftover_words() {
    for text in ["99 สามแยก ดินแดง", "99 พหลโยธิน ลาดยาว จตุจักร 10900"] {
        let out = parse_address_from_text(text);
        assert!(out.district.is_some(), "{text}");
        assert_eq!(out.subdistrict, out.district, "{text}");
    }
}

#[test]
fn test_bangkok_district_is_never_a_stray_word() {
    let text = "สมชาย ใจดี 0812345678 ส่งได้เลย 55 ถนนสีลม กทม";
    let out = parse_customer_and_address_data(text);

    assert_eq!(out.province.as_deref(), Some(BANGKOK));
    assert_ne!(out.district.as_deref(), Some("ส่งได้เลย"));
    if let Some(district) = out.district.as_deref() {
        assert!(gazetteer::is_bangkok_district(district), "{district}");
    }
}

#[test]
fn test_exception_subdistrict_under_known_district() {
    let out = parse_address_from_text("99 คลองตันเหนือ วัฒนา กรุงเทพ บ้านสีฟ้า");

    assert_eq!(out.subdistrict.as_deref(), Some("คลองตันเหนือ"));
    assert_eq!(out.district.as_deref(), Some("วัฒนา"));
}

#[test]
fn test_parallel_calls_agree() {
    let expected = parse_customer_and_address_data(SUKHUMVIT);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| parse_customer_and_address_data(SUKHUMVIT)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
