use audience_etl::utils::{logger, validation::Validate};
use audience_etl::{
    CliConfig, ExportEngine, ExportJobConfig, FileExportPipeline, LocalStorage,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting audience-etl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let output_path = match cli.config.clone() {
        Some(config_path) => {
            let job = ExportJobConfig::from_file(&config_path)?;
            job.validate()?;
            tracing::info!("Running job '{}'", job.job.name);

            let storage = LocalStorage::new(".");
            let pipeline = FileExportPipeline::new(storage, job);
            ExportEngine::new(pipeline).run().await
        }
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }

            let storage = LocalStorage::new(".");
            let pipeline = FileExportPipeline::new(storage, cli);
            ExportEngine::new(pipeline).run().await
        }
    };

    match output_path {
        Ok(path) => {
            tracing::info!("Export completed successfully");
            println!("✅ Export completed successfully!");
            println!("📁 Output saved to: {}", path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
