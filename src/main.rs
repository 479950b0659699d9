use clap::Parser;
use std::io::Read;
use thai_address_etl::utils::error::EtlError;
use thai_address_etl::utils::{logger, validation::Validate};
use thai_address_etl::{
    parse_customer_and_address_data, BatchPipeline, CliConfig, EtlEngine, LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    if let Some(text) = &config.text {
        match parse_one(text) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&e),
        }
        return Ok(());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = BatchPipeline::new(storage, config);

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Batch completed successfully!");
            println!("✅ Batch completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

/// One-shot parse; `-` reads the text from stdin.
fn parse_one(text: &str) -> Result<String, EtlError> {
    let text = if text == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        text.to_string()
    };

    let components = parse_customer_and_address_data(&text);
    Ok(serde_json::to_string_pretty(&components)?)
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.exit_code().max(1))
}
