use crate::domain::model::{InputFormat, InputRecord, ParseBatch};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn input_format(&self) -> InputFormat;
    /// Header of the CSV column holding the raw text; first column if unset.
    fn text_column(&self) -> Option<&str>;
    fn max_records(&self) -> Option<usize>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn compress(&self) -> bool;

    fn output_filename(&self, format: &str) -> String {
        format!("addresses.{}", format)
    }

    fn archive_filename(&self) -> String {
        "addresses.zip".to_string()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputRecord>>;
    async fn transform(&self, records: Vec<InputRecord>) -> Result<ParseBatch>;
    async fn load(&self, batch: ParseBatch) -> Result<String>;
}
