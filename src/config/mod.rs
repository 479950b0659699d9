pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::domain::model::InputFormat;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::{EtlError, Result};
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "thai-address-etl")]
    #[command(about = "Decompose pasted Thai contact/address text into structured fields")]
    pub struct CliConfig {
        /// Parse a single text and print the result as JSON (`-` reads stdin)
        #[arg(long, conflicts_with = "input")]
        pub text: Option<String>,

        /// Batch input file
        #[arg(long)]
        pub input: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_enum, default_value_t = InputFormat::Blocks)]
        pub format: InputFormat,

        /// CSV column holding the text (first column if omitted)
        #[arg(long)]
        pub column: Option<String>,

        #[arg(long, value_delimiter = ',', default_value = "csv,tsv,json")]
        pub formats: Vec<String>,

        #[arg(long, help = "Bundle all outputs into one zip archive")]
        pub zip: bool,

        #[arg(long)]
        pub max_records: Option<usize>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log system stats per batch phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            self.input.as_deref().unwrap_or_default()
        }

        fn input_format(&self) -> InputFormat {
            self.format
        }

        fn text_column(&self) -> Option<&str> {
            self.column.as_deref()
        }

        fn max_records(&self) -> Option<usize> {
            self.max_records
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn compress(&self) -> bool {
            self.zip
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if self.text.is_some() {
                return Ok(());
            }

            let input = self.input.as_deref().ok_or_else(|| EtlError::MissingConfigError {
                field: "--text or --input".to_string(),
            })?;
            validation::validate_path("--input", input)?;
            validation::validate_path("--output-path", &self.output_path)?;
            validation::validate_output_formats("--formats", &self.formats)?;

            if let Some(column) = &self.column {
                validation::validate_non_empty_string("--column", column)?;
            }
            if let Some(max) = self.max_records {
                validation::validate_positive_number("--max-records", max, 1)?;
            }
            Ok(())
        }
    }

}
