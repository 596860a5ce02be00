use hashbrown::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::{Result, ScoringError};
use crate::sessions::Session;

/// Returns the Jaccard score of a predicted session against its truth session.
/// The score is the size of the intersection of both item sets divided by the
/// size of their union.
///
/// # Arguments
///
/// * `predicted_session` - the session with the predicted bought items.
/// * `test_session` - the truth session with the same id.
///
/// # Errors
///
/// `ScoringError::DegenerateJaccard` when both item sets are empty.
pub fn jaccard_score<S, I>(
    predicted_session: &Session<S, I>,
    test_session: &Session<S, I>,
) -> Result<f64>
where
    S: Display,
    I: Eq + Hash,
{
    let predicted_items = predicted_session.item_ids();
    let test_items = test_session.item_ids();

    let union = predicted_items.union(test_items).count();
    if union == 0 {
        return Err(ScoringError::DegenerateJaccard {
            session_id: predicted_session.id().to_string(),
        });
    }
    let intersection = predicted_items.intersection(test_items).count();
    Ok(intersection as f64 / union as f64)
}

/// Sums the Jaccard scores of all predicted sessions whose id also occurs in the truth.
pub fn sum_jaccard_scores<S, I>(
    predicted_sessions: &[Session<S, I>],
    test_sessions: &[Session<S, I>],
) -> Result<f64>
where
    S: Eq + Hash + Display,
    I: Eq + Hash,
{
    let test_sessions_by_id: HashMap<&S, &Session<S, I>> = test_sessions
        .iter()
        .map(|session| (session.id(), session))
        .collect();

    predicted_sessions
        .iter()
        .filter_map(|predicted| {
            test_sessions_by_id
                .get(predicted.id())
                .map(|test_session| jaccard_score(predicted, test_session))
        })
        .sum()
}
