use super::address::extract_address;
use super::contact::extract_contact;
use crate::domain::model::AddressComponents;

/// Splits a pasted contact block into name, phone and address fields.
///
/// The contact pass runs first; the address pass only sees what is left of
/// the text once the name and phone are cut out. Address fields are merged
/// over contact fields, so a company name found inside the address wins.
pub fn parse_customer_and_address_data(text: &str) -> AddressComponents {
    let text = normalize_digits(text);
    let contact = extract_contact(&text);
    tracing::trace!("residual address text: {}", contact.residual);

    let address = extract_address(&contact.residual);
    let mut result = contact.components;
    result.merge(&address);
    result
}

/// Address fields only, for text that carries no name or phone.
pub fn parse_address_from_text(text: &str) -> AddressComponents {
    extract_address(&normalize_digits(text))
}

/// Thai digits (๐-๙) become ASCII digits.
fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '๐'..='๙' => char::from(b'0' + (c as u32 - '๐' as u32) as u8),
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::gazetteer::BANGKOK;

    #[test]
    fn test_thai_digits_are_normalized() {
        assert_eq!(normalize_digits("๑๒๓/๔๕ ๑๐๑๑๐"), "123/45 10110");
    }

    #[test]
    fn test_contact_and_address_are_merged() {
        let out = parse_customer_and_address_data(
            "นายเอ บีซี\nโทร ๐๘๑-๒๓๔-๕๖๗๘\n55 ลาดพร้าว กรุงเทพ ๑๐๒๓๐",
        );

        assert_eq!(out.customer_name.as_deref(), Some("นายเอ บีซี"));
        assert_eq!(out.customer_phone.as_deref(), Some("0812345678"));
        assert_eq!(out.house_number.as_deref(), Some("55"));
        assert_eq!(out.district.as_deref(), Some("ลาดพร้าว"));
        assert_eq!(out.subdistrict.as_deref(), Some("ลาดพร้าว"));
        assert_eq!(out.province.as_deref(), Some(BANGKOK));
        assert_eq!(out.zipcode.as_deref(), Some("10230"));
    }

    #[test]
    fn test_address_company_overrides_contact_name() {
        let out = parse_customer_and_address_data(
            "คุณเอ 0812345678 บจก. สยามพาณิชย์ 99 ถนนสีลม เขตบางรัก กรุงเทพ",
        );
        assert_eq!(out.customer_name.as_deref(), Some("บจก. สยามพาณิชย์"));
    }

    #[test]
    fn test_address_only_parse_keeps_contact_fields_empty() {
        let out = parse_address_from_text("99/1 หมู่ 2 ต.บ้านใหม่ อ.ปากเกร็ด นนทบุรี 11120");

        assert_eq!(out.customer_name, None);
        assert_eq!(out.customer_phone, None);
        assert_eq!(out.subdistrict.as_deref(), Some("บ้านใหม่"));
        assert_eq!(out.district.as_deref(), Some("ปากเกร็ด"));
        assert_eq!(out.province.as_deref(), Some("นนทบุรี"));
    }
}
