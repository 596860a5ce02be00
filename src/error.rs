/// Failure modes of grouping, scoring and the file tools around them.
///
/// Errors propagate to the immediate caller. Nothing inside the crate retries,
/// and no partial `EvaluationMeasure` is ever returned next to an error.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// The buying session ratio (and therefore the total score) needs at least one truth session.
    #[error("Truth session collection is empty. The validation split must contain at least one session.")]
    EmptyTruth,

    /// Both the predicted and the truth item set of a matched session are empty.
    #[error("Jaccard score undefined for session {session_id}: predicted and truth item sets are both empty.")]
    DegenerateJaccard {
        /// Textual form of the offending session id.
        session_id: String,
    },

    /// A row lacks an identifier or cannot be split into its fields.
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
