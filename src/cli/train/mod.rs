//! Train command - fits the random forest and writes the model artifact

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::infrastructure::services::TrainingService;

/// Arguments for the train command
#[derive(Args, Clone)]
pub struct TrainArgs {
    /// Training CSV (overrides config)
    #[arg(long)]
    pub input_path: Option<PathBuf>,

    /// Directory `model.json` is written to (overrides config). The artifact is
    /// a JSON-serialized forest, not a joblib pickle, so SageMaker serving
    /// code must load it with this crate rather than scikit-learn.
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// Number of trees in the forest (overrides config)
    #[arg(long)]
    pub n_estimators: Option<usize>,
}

pub async fn run(args: TrainArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let training = config.training;

    let input_path = args.input_path.unwrap_or(training.input_path);
    let model_path = args.model_path.unwrap_or(training.model_path);
    let n_estimators = args.n_estimators.unwrap_or(training.n_estimators);

    let service = TrainingService::new(training.seed, training.test_fraction);
    let outcome = service.train(&input_path, &model_path, n_estimators)?;

    info!(
        train_rows = outcome.train_rows,
        test_rows = outcome.test_rows,
        accuracy = outcome.accuracy,
        model_file = %outcome.model_file.display(),
        "Training job finished"
    );

    Ok(())
}
