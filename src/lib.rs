pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::BatchPipeline};
pub use domain::model::{AddressComponents, InputFormat};
pub use domain::services::{parse_address_from_text, parse_customer_and_address_data};
pub use utils::error::{EtlError, Result};
