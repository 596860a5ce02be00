use anyhow::{anyhow, Context};
use tracing::info;

use recsys_challenge::config::AppConfig;
use recsys_challenge::io;
use recsys_challenge::logging::init_tracing;
use recsys_challenge::metrics::evaluate;

fn main() -> anyhow::Result<()> {
    // This tool scores a submission file against labeled validation rows.
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(&config_path)?;
    init_tracing(&config.log);

    let predictions_path = config
        .data
        .predictions_path
        .ok_or_else(|| anyhow!("data.predictions_path (or PREDICTIONS) must be set"))?;

    let test_sessions = io::read_validation_sessions(&config.data.labeled_data_path)
        .with_context(|| format!("reading labeled rows from {}", config.data.labeled_data_path))?;
    let predicted_sessions = io::read_submission(&predictions_path)
        .with_context(|| format!("reading submission from {}", predictions_path))?;
    info!(
        qty_truth = test_sessions.len(),
        qty_predicted = predicted_sessions.len(),
        "loaded sessions"
    );

    let measure = evaluate(&predicted_sessions, &test_sessions)?;

    println!("{}", measure.get_name());
    println!("{}", measure.result());
    Ok(())
}
