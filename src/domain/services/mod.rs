// The decomposition engine. Everything here is synchronous and pure: the
// gazetteer is static data and every call works on its own copy of the text.

pub mod address;
pub mod contact;
pub mod gazetteer;
pub mod parser;

pub(crate) mod ladder;
pub(crate) mod span;
pub(crate) mod tokens;

pub use address::extract_address;
pub use contact::{extract_contact, ContactExtraction};
pub use parser::{parse_address_from_text, parse_customer_and_address_data};
