use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;
use std::convert::Infallible;
use std::hash::Hash;
use tracing::debug;

use crate::sessions::Session;

type ItemIdsBySession<S, I> = HashMap<S, HashSet<I>>;

/// Groups `(session_id, item_id)` rows into one session per distinct session id.
///
/// The order of the returned sessions is unspecified.
pub fn group_sessions<S, I, R>(rows: R) -> Vec<Session<S, I>>
where
    S: Eq + Hash,
    I: Eq + Hash,
    R: IntoIterator<Item = (S, I)>,
{
    match try_group_sessions(rows.into_iter().map(Ok::<_, Infallible>)) {
        Ok(sessions) => sessions,
        Err(never) => match never {},
    }
}

/// Like [`group_sessions`], but stops at the first failed row and returns its error.
pub fn try_group_sessions<S, I, E, R>(rows: R) -> Result<Vec<Session<S, I>>, E>
where
    S: Eq + Hash,
    I: Eq + Hash,
    R: IntoIterator<Item = Result<(S, I), E>>,
{
    let mut item_ids_by_session: ItemIdsBySession<S, I> = HashMap::new();
    let mut qty_rows = 0_usize;
    for row in rows {
        let (session_id, item_id) = row?;
        item_ids_by_session
            .entry(session_id)
            .or_insert_with(HashSet::new)
            .insert(item_id);
        qty_rows += 1;
    }
    debug!(qty_rows, qty_sessions = item_ids_by_session.len(), "grouped click rows");
    Ok(into_sessions(item_ids_by_session))
}

/// Groups `(session_id, item_id, n_buys)` rows of a labeled split.
///
/// Every session id seen produces a session, even when none of its rows were
/// bought. Only rows with `n_buys > 0` contribute their item.
pub fn group_validation_sessions<S, I, R>(rows: R) -> Vec<Session<S, I>>
where
    S: Eq + Hash,
    I: Eq + Hash,
    R: IntoIterator<Item = (S, I, u32)>,
{
    match try_group_validation_sessions(rows.into_iter().map(Ok::<_, Infallible>)) {
        Ok(sessions) => sessions,
        Err(never) => match never {},
    }
}

pub fn try_group_validation_sessions<S, I, E, R>(rows: R) -> Result<Vec<Session<S, I>>, E>
where
    S: Eq + Hash,
    I: Eq + Hash,
    R: IntoIterator<Item = Result<(S, I, u32), E>>,
{
    let mut item_ids_by_session: ItemIdsBySession<S, I> = HashMap::new();
    let mut qty_bought_rows = 0_usize;
    for row in rows {
        let (session_id, item_id, n_buys) = row?;
        let bought_items = item_ids_by_session
            .entry(session_id)
            .or_insert_with(HashSet::new);
        if n_buys > 0 {
            bought_items.insert(item_id);
            qty_bought_rows += 1;
        }
    }
    debug!(
        qty_bought_rows,
        qty_sessions = item_ids_by_session.len(),
        "grouped labeled rows"
    );
    Ok(into_sessions(item_ids_by_session))
}

/// Parallel [`group_sessions`] for large row sets.
///
/// Each rayon shard builds a partial grouping; partials are merged by taking
/// the union of item ids per session, so the outcome does not depend on how
/// the rows were split.
pub fn par_group_sessions<S, I>(rows: &[(S, I)]) -> Vec<Session<S, I>>
where
    S: Eq + Hash + Clone + Send + Sync,
    I: Eq + Hash + Clone + Send + Sync,
{
    let item_ids_by_session = rows
        .par_iter()
        .fold(
            HashMap::new,
            |mut partial: ItemIdsBySession<S, I>, (session_id, item_id)| {
                partial
                    .entry(session_id.clone())
                    .or_insert_with(HashSet::new)
                    .insert(item_id.clone());
                partial
            },
        )
        .reduce(HashMap::new, merge_partial_groupings);
    debug!(
        qty_rows = rows.len(),
        qty_sessions = item_ids_by_session.len(),
        "grouped click rows in parallel"
    );
    into_sessions(item_ids_by_session)
}

fn merge_partial_groupings<S, I>(
    left: ItemIdsBySession<S, I>,
    right: ItemIdsBySession<S, I>,
) -> ItemIdsBySession<S, I>
where
    S: Eq + Hash,
    I: Eq + Hash,
{
    // drain the smaller map into the larger one
    let (mut larger, smaller) = if left.len() >= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    for (session_id, item_ids) in smaller {
        larger
            .entry(session_id)
            .or_insert_with(HashSet::new)
            .extend(item_ids);
    }
    larger
}

fn into_sessions<S, I>(item_ids_by_session: ItemIdsBySession<S, I>) -> Vec<Session<S, I>> {
    item_ids_by_session
        .into_iter()
        .map(|(session_id, item_ids)| Session::new(session_id, item_ids))
        .collect()
}
