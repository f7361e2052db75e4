//! Preprocess command - writes the processed dataset

use std::path::PathBuf;

use clap::Args;

use crate::infrastructure::services::TrainingService;

/// Arguments for the preprocess command
#[derive(Args, Clone)]
pub struct PreprocessArgs {
    /// Directory to write processed.csv into (overrides config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

pub async fn run(args: PreprocessArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let output_dir = args.output_dir.unwrap_or(config.training.output_dir);
    let service = TrainingService::new(config.training.seed, config.training.test_fraction);
    service.materialize_dataset(&output_dir)?;

    Ok(())
}
