pub mod buying_ratio;
pub mod evaluation_reporter;
pub mod hitmiss;
pub mod jaccard;

pub use buying_ratio::buying_session_ratio;
pub use evaluation_reporter::{evaluate, EvaluationMeasure};
pub use hitmiss::prediction_hits_misses;
pub use jaccard::{jaccard_score, sum_jaccard_scores};
