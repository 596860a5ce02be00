use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp;
use std::hash::Hash;
use tracing::info;

use crate::sessions::{group_validation_sessions, Session};

/// Number of rows held out when no size is configured.
pub const DEFAULT_VALIDATION_SIZE: usize = 1_000_000;

/// One collapsed click row of the labeled data, with the number of times the
/// item was bought in that session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRow<S, I> {
    pub session_id: S,
    pub item_id: I,
    pub n_buys: u32,
}

/// Draws `min(size, rows.len())` rows uniformly without replacement and groups
/// them into truth sessions.
///
/// Sampling is per row, not per session: a session can end up with only part
/// of its rows, so its truth item set may be smaller than the full one. This
/// adds noise to validation scores.
pub fn validation_dataset<S, I, R>(
    rows: &[LabeledRow<S, I>],
    size: usize,
    rng: &mut R,
) -> (Vec<LabeledRow<S, I>>, Vec<Session<S, I>>)
where
    S: Eq + Hash + Clone,
    I: Eq + Hash + Clone,
    R: Rng + ?Sized,
{
    let amount = cmp::min(size, rows.len());
    let sampled_rows: Vec<LabeledRow<S, I>> = index::sample(rng, rows.len(), amount)
        .into_iter()
        .map(|position| rows[position].clone())
        .collect();

    let validation_sessions = group_validation_sessions(
        sampled_rows
            .iter()
            .map(|row| (row.session_id.clone(), row.item_id.clone(), row.n_buys)),
    );
    info!(
        qty_rows = rows.len(),
        qty_sampled = sampled_rows.len(),
        qty_sessions = validation_sessions.len(),
        "drew validation split"
    );
    (sampled_rows, validation_sessions)
}

#[cfg(test)]
mod validation_test {
    use super::*;
    use hashbrown::HashSet;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn labeled_rows(qty: u64) -> Vec<LabeledRow<u64, u64>> {
        (0..qty)
            .map(|position| LabeledRow {
                session_id: position / 4,
                item_id: position,
                n_buys: (position % 3 == 0) as u32,
            })
            .collect()
    }

    #[test]
    fn should_sample_requested_number_of_distinct_rows() {
        let rows = labeled_rows(100);
        let mut rng = Pcg64::seed_from_u64(7);
        let (sampled, _sessions) = validation_dataset(&rows, 30, &mut rng);
        assert_eq!(30, sampled.len());
        let distinct: HashSet<u64> = sampled.iter().map(|row| row.item_id).collect();
        assert_eq!(30, distinct.len());
        assert!(sampled.iter().all(|row| rows.contains(row)));
    }

    #[test]
    fn should_take_every_row_when_size_exceeds_rows() {
        let rows = labeled_rows(10);
        let mut rng = Pcg64::seed_from_u64(1);
        let (sampled, sessions) = validation_dataset(&rows, 1_000, &mut rng);
        assert_eq!(10, sampled.len());
        // rows 0..10 belong to sessions 0, 1 and 2
        assert_eq!(3, sessions.len());
    }

    #[test]
    fn should_return_nothing_for_zero_size() {
        let rows = labeled_rows(10);
        let mut rng = Pcg64::seed_from_u64(1);
        let (sampled, sessions) = validation_dataset(&rows, 0, &mut rng);
        assert!(sampled.is_empty());
        assert!(sessions.is_empty());
    }

    #[test]
    fn should_reproduce_split_for_same_seed() {
        let rows = labeled_rows(500);
        let (first, _) = validation_dataset(&rows, 50, &mut Pcg64::seed_from_u64(42));
        let (second, _) = validation_dataset(&rows, 50, &mut Pcg64::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn should_group_sampled_rows_into_truth_sessions() {
        let rows = labeled_rows(200);
        let mut rng = Pcg64::seed_from_u64(3);
        let (sampled, sessions) = validation_dataset(&rows, 60, &mut rng);

        let sampled_session_ids: HashSet<u64> = sampled.iter().map(|row| row.session_id).collect();
        let session_ids: HashSet<u64> = sessions.iter().map(|session| *session.id()).collect();
        assert_eq!(sampled_session_ids, session_ids);

        for session in &sessions {
            for item_id in session.item_ids() {
                let row = sampled
                    .iter()
                    .find(|row| row.item_id == *item_id)
                    .unwrap();
                assert_eq!(*session.id(), row.session_id);
                assert!(row.n_buys > 0);
            }
        }
    }
}
