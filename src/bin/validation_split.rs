use anyhow::Context;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::path::Path;
use tracing::info;

use recsys_challenge::config::AppConfig;
use recsys_challenge::io;
use recsys_challenge::logging::init_tracing;
use recsys_challenge::validation::validation_dataset;

const VALIDATION_ROWS_FILE: &str = "validation_rows.csv";
const VALIDATION_TRUTH_FILE: &str = "validation_truth.dat";

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_default();
    let config = AppConfig::new(&config_path)?;
    init_tracing(&config.log);

    let labeled_rows = io::read_labeled_rows(&config.data.labeled_data_path)
        .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
        .with_context(|| format!("reading labeled rows from {}", config.data.labeled_data_path))?;

    let mut rng = match config.validation.seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    };
    let (validation_rows, validation_sessions) =
        validation_dataset(&labeled_rows, config.validation.sample_size, &mut rng);

    let output_directory = Path::new(&config.data.output_directory);
    let rows_path = output_directory.join(VALIDATION_ROWS_FILE);
    let truth_path = output_directory.join(VALIDATION_TRUTH_FILE);
    io::write_labeled_rows(&rows_path, &validation_rows)
        .with_context(|| format!("writing {}", rows_path.display()))?;
    io::write_submission(&truth_path, &validation_sessions)
        .with_context(|| format!("writing {}", truth_path.display()))?;

    info!(
        qty_rows = validation_rows.len(),
        qty_sessions = validation_sessions.len(),
        rows = %rows_path.display(),
        truth = %truth_path.display(),
        "validation split written"
    );
    Ok(())
}
