use hashbrown::HashSet;
use std::hash::Hash;

use crate::sessions::Session;

/// Returns `(hits, misses)` for the predicted session ids.
///
/// A predicted session is a hit when the truth contains a session with the same
/// id that bought something, and a miss otherwise. Buying truth sessions that
/// were not predicted are not counted at all.
pub fn prediction_hits_misses<S, I>(
    predicted_sessions: &[Session<S, I>],
    test_sessions: &[Session<S, I>],
) -> (usize, usize)
where
    S: Eq + Hash,
{
    let predicted_ids: HashSet<&S> = predicted_sessions.iter().map(Session::id).collect();
    let buying_ids: HashSet<&S> = test_sessions
        .iter()
        .filter(|session| session.has_bought())
        .map(Session::id)
        .collect();

    let hits = predicted_ids.intersection(&buying_ids).count();
    let misses = predicted_ids.difference(&buying_ids).count();
    (hits, misses)
}
