use crate::domain::model::{
    InputFormat, InputRecord, ParseBatch, ParsedRecord, FIELD_NAMES,
};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::domain::services::parse_customer_and_address_data;
use crate::utils::error::{EtlError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

const SUMMARY_FILENAME: &str = "summary.json";

/// Reads pasted contact blocks, decomposes each one and writes the tables.
pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSummary<'a> {
    generated_at: String,
    records: usize,
    field_counts: &'a BTreeMap<String, usize>,
    files: Vec<String>,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn split_blocks(content: &str) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line.trim_end());
            }
        }
        if !current.is_empty() {
            blocks.push(current.join("\n"));
        }

        blocks
    }

    fn read_csv_column(&self, content: &str) -> Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let column = match self.config.text_column() {
            Some(name) => {
                let headers = reader.headers()?;
                headers
                    .iter()
                    .position(|header| header.trim() == name)
                    .ok_or_else(|| EtlError::InputError {
                        message: format!("CSV column '{}' not found", name),
                    })?
            }
            None => 0,
        };
        tracing::debug!("Reading CSV column #{}", column);

        let mut texts = Vec::new();
        for row in reader.records() {
            let row = row?;
            if let Some(cell) = row.get(column) {
                if !cell.trim().is_empty() {
                    texts.push(cell.to_string());
                }
            }
        }
        Ok(texts)
    }

    fn write_table(records: &[ParsedRecord], delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        let mut header = vec!["index"];
        header.extend(FIELD_NAMES);
        header.push("source");
        writer.write_record(&header)?;

        for record in records {
            let index = record.index.to_string();
            let mut row = vec![index.as_str()];
            row.extend(record.components.fields().map(|value| value.unwrap_or("")));
            row.push(record.source.as_str());
            writer.write_record(&row)?;
        }

        let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
            message: format!("Failed to flush table: {}", e),
        })?;
        String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
            message: format!("Table is not valid UTF-8: {}", e),
        })
    }

    fn count_fields(records: &[ParsedRecord]) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = FIELD_NAMES
            .iter()
            .map(|name| (name.to_string(), 0))
            .collect();

        for record in records {
            for (name, value) in FIELD_NAMES.iter().zip(record.components.fields()) {
                if value.is_some() {
                    *counts.entry(name.to_string()).or_default() += 1;
                }
            }
        }
        counts
    }

    fn rendered_outputs(&self, batch: &ParseBatch) -> Vec<(String, String)> {
        self.config
            .output_formats()
            .iter()
            .filter_map(|format| {
                let body = match format.as_str() {
                    "csv" => batch.csv_output.clone(),
                    "tsv" => batch.tsv_output.clone(),
                    "json" => batch.json_output.clone(),
                    other => {
                        tracing::warn!("⚠️ Skipping unknown output format: {}", other);
                        return None;
                    }
                };
                Some((self.config.output_filename(format), body))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputRecord>> {
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        let content = String::from_utf8(bytes).map_err(|e| EtlError::InputError {
            message: format!("{} is not valid UTF-8: {}", self.config.input_path(), e),
        })?;
        let content = content.trim_start_matches('\u{feff}');

        let texts = match self.config.input_format() {
            InputFormat::Blocks => Self::split_blocks(content),
            InputFormat::Csv => self.read_csv_column(content)?,
        };

        let limit = self.config.max_records().unwrap_or(usize::MAX);
        if texts.len() > limit {
            tracing::info!("✂️ Limiting batch to {} of {} records", limit, texts.len());
        }

        Ok(texts
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, text)| InputRecord { index: i + 1, text })
            .collect())
    }

    async fn transform(&self, records: Vec<InputRecord>) -> Result<ParseBatch> {
        let parsed: Vec<ParsedRecord> = records
            .into_iter()
            .map(|record| {
                let components = parse_customer_and_address_data(&record.text);
                if components.is_empty() {
                    tracing::debug!("Record #{} produced no fields", record.index);
                }
                ParsedRecord {
                    index: record.index,
                    source: record.text,
                    components,
                }
            })
            .collect();

        // 產生各格式輸出
        let csv_output = Self::write_table(&parsed, b',')?;
        let tsv_output = Self::write_table(&parsed, b'\t')?;
        let json_output = serde_json::to_string_pretty(&parsed)?;
        let field_counts = Self::count_fields(&parsed);

        Ok(ParseBatch {
            records: parsed,
            csv_output,
            tsv_output,
            json_output,
            field_counts,
        })
    }

    async fn load(&self, batch: ParseBatch) -> Result<String> {
        let mut files = self.rendered_outputs(&batch);

        let summary = BatchSummary {
            generated_at: chrono::Utc::now().to_rfc3339(),
            records: batch.records.len(),
            field_counts: &batch.field_counts,
            files: files.iter().map(|(name, _)| name.clone()).collect(),
        };
        files.push((
            SUMMARY_FILENAME.to_string(),
            serde_json::to_string_pretty(&summary)?,
        ));

        if !self.config.compress() {
            for (name, body) in &files {
                self.storage.write_file(name, body.as_bytes()).await?;
            }
            tracing::debug!("Wrote {} files", files.len());
            return Ok(self.config.output_path().to_string());
        }

        let archive = self.config.archive_filename();
        tracing::debug!("Creating ZIP file with {} files", files.len());

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, body) in &files {
                zip.start_file(name.as_str(), SimpleFileOptions::default())?;
                zip.write_all(body.as_bytes())?;
            }
            zip.finish()?.into_inner()
        };

        self.storage.write_file(&archive, &zip_data).await?;
        Ok(format!("{}/{}", self.config.output_path(), archive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), content.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        format: InputFormat,
        column: Option<String>,
        max_records: Option<usize>,
        formats: Vec<String>,
        compress: bool,
    }

    impl MockConfig {
        fn new(format: InputFormat) -> Self {
            Self {
                format,
                column: None,
                max_records: None,
                formats: vec!["csv".to_string(), "tsv".to_string(), "json".to_string()],
                compress: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "input"
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
            "out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn compress(&self) -> bool {
            self.compress
        }
    }

    const BLOCKS: &str = "\u{feff}คุณเอ บีซี\n0812345678\n55 ลาดพร้าว กรุงเทพ 10230\n\n\n\
                          นายดี อีเอฟ 0898765432\n9 ปากเกร็ด นนทบุรี 11120\n";

    #[tokio::test]
    async fn test_extract_blocks_split_on_blank_lines() {
        let storage = MockStorage::with_file("input", BLOCKS);
        let pipeline = BatchPipeline::new(storage, MockConfig::new(InputFormat::Blocks));

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 1);
        assert!(records[0].text.starts_with("คุณเอ บีซี\n0812345678"));
        assert_eq!(records[1].index, 2);
    }

    #[tokio::test]
    async fn test_extract_respects_max_records() {
        let storage = MockStorage::with_file("input", BLOCKS);
        let mut config = MockConfig::new(InputFormat::Blocks);
        config.max_records = Some(1);
        let pipeline = BatchPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_csv_column_by_name() {
        let csv = "order,address\nA1,\"คุณเอ 0812345678\n55 ลาดพร้าว กรุงเทพ 10230\"\nA2,\nA3,9 ปากเกร็ด นนทบุรี 11120\n";
        let storage = MockStorage::with_file("input", csv);
        let mut config = MockConfig::new(InputFormat::Csv);
        config.column = Some("address".to_string());
        let pipeline = BatchPipeline::new(storage, config);

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].text.contains('\n'));
        assert_eq!(records[1].text, "9 ปากเกร็ด นนทบุรี 11120");
    }

    #[tokio::test]
    async fn test_extract_csv_missing_column() {
        let storage = MockStorage::with_file("input", "order,text\nA1,x\n");
        let mut config = MockConfig::new(InputFormat::Csv);
        config.column = Some("address".to_string());
        let pipeline = BatchPipeline::new(storage, config);

        let result = pipeline.extract().await;
        assert!(matches!(result, Err(EtlError::InputError { .. })));
    }

    #[tokio::test]
    async fn test_transform_builds_tables_and_counts() {
        let storage = MockStorage::with_file("input", BLOCKS);
        let pipeline = BatchPipeline::new(storage, MockConfig::new(InputFormat::Blocks));

        let records = pipeline.extract().await.unwrap();
        let batch = pipeline.transform(records).await.unwrap();

        assert_eq!(batch.records.len(), 2);
        assert_eq!(
            batch.records[0].components.customer_phone.as_deref(),
            Some("0812345678")
        );

        let header = batch.csv_output.lines().next().unwrap();
        assert!(header.starts_with("index,customerName,customerPhone,houseNumber"));
        assert!(header.ends_with("storeName,source"));
        assert!(batch.tsv_output.starts_with("index\tcustomerName\t"));

        assert_eq!(batch.field_counts["customerPhone"], 2);
        assert_eq!(batch.field_counts["zipcode"], 2);
        assert_eq!(batch.field_counts.len(), FIELD_NAMES.len());

        let json: serde_json::Value = serde_json::from_str(&batch.json_output).unwrap();
        assert_eq!(json[1]["components"]["province"], "นนทบุรี");
    }

    #[tokio::test]
    async fn test_transform_with_empty_input() {
        let storage = MockStorage::with_file("input", "");
        let pipeline = BatchPipeline::new(storage, MockConfig::new(InputFormat::Blocks));

        let batch = pipeline.transform(Vec::new()).await.unwrap();

        assert!(batch.records.is_empty());
        assert_eq!(batch.csv_output.lines().count(), 1);
        assert_eq!(batch.json_output, "[]");
    }

    #[tokio::test]
    async fn test_load_writes_each_format_and_summary() {
        let storage = MockStorage::with_file("input", BLOCKS);
        let mut config = MockConfig::new(InputFormat::Blocks);
        config.formats = vec!["csv".to_string(), "json".to_string()];
        let pipeline = BatchPipeline::new(storage.clone(), config);

        let records = pipeline.extract().await.unwrap();
        let batch = pipeline.transform(records).await.unwrap();
        let output = pipeline.load(batch).await.unwrap();

        assert_eq!(output, "out");
        assert!(storage.get_file("addresses.csv").await.is_some());
        assert!(storage.get_file("addresses.json").await.is_some());
        assert!(storage.get_file("addresses.tsv").await.is_none());

        let summary = storage.get_file(SUMMARY_FILENAME).await.unwrap();
        let summary: serde_json::Value = serde_json::from_slice(&summary).unwrap();
        assert_eq!(summary["records"], 2);
        assert_eq!(summary["files"][0], "addresses.csv");
    }

    #[tokio::test]
    async fn test_load_compressed_archive() {
        let storage = MockStorage::with_file("input", BLOCKS);
        let mut config = MockConfig::new(InputFormat::Blocks);
        config.compress = true;
        let pipeline = BatchPipeline::new(storage.clone(), config);

        let records = pipeline.extract().await.unwrap();
        let batch = pipeline.transform(records).await.unwrap();
        let output = pipeline.load(batch).await.unwrap();

        assert_eq!(output, "out/addresses.zip");
        assert!(storage.get_file("addresses.csv").await.is_none());

        let zip_data = storage.get_file("addresses.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["addresses.csv", "addresses.json", "addresses.tsv", "summary.json"]
        );
        assert!(archive.by_name("summary.json").is_ok());
    }
}
