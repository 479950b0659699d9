use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting address batch");
        self.monitor.log_stats("Start");

        // Extract
        tracing::info!("📥 Reading input records...");
        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} records", records.len());
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("🔄 Parsing records...");
        let batch = self.pipeline.transform(records).await?;
        tracing::info!("🔄 Parsed {} records", batch.records.len());
        self.monitor.log_stats("Transform");
        self.monitor.log_throughput(batch.records.len());

        // Load
        tracing::info!("💾 Writing outputs...");
        let output_path = self.pipeline.load(batch).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{InputRecord, ParseBatch};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPipeline {
        loaded: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for CountingPipeline {
        async fn extract(&self) -> Result<Vec<InputRecord>> {
            Ok(vec![InputRecord {
                index: 1,
                text: "คุณเอ 0812345678".to_string(),
            }])
        }

        async fn transform(&self, records: Vec<InputRecord>) -> Result<ParseBatch> {
            Ok(ParseBatch {
                records: records
                    .into_iter()
                    .map(|record| crate::domain::model::ParsedRecord {
                        index: record.index,
                        components: crate::parse_customer_and_address_data(&record.text),
                        source: record.text,
                    })
                    .collect(),
                csv_output: String::new(),
                tsv_output: String::new(),
                json_output: String::new(),
                field_counts: BTreeMap::new(),
            })
        }

        async fn load(&self, batch: ParseBatch) -> Result<String> {
            self.loaded.store(batch.records.len(), Ordering::SeqCst);
            Ok("memory".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_chains_phases() {
        let engine = EtlEngine::new(CountingPipeline::default());
        let output = engine.run().await.unwrap();

        assert_eq!(output, "memory");
        assert_eq!(engine.pipeline.loaded.load(Ordering::SeqCst), 1);
    }
}
