use clap::Parser;
use distributed_wordcount::config::{Cli, PipelineConfig, StoreKind};
use distributed_wordcount::pipeline::run_pipeline;
use distributed_wordcount::storage::format::FINAL_FILE_NAME;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::try_from(&cli)?;
    tracing::debug!("Configuration: {:?}", config);

    let store = config.build_store();
    let summary = run_pipeline(&config, store.clone()).await?;

    match config.store {
        StoreKind::Fs => {
            tracing::info!(
                "Final report written to {}",
                config.final_dir.join(FINAL_FILE_NAME).display()
            );
        }
        StoreKind::Memory if !cli.summary => {
            print!("{}", store.read_report().await?);
        }
        StoreKind::Memory => {}
    }

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
