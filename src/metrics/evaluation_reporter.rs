use itertools::Itertools;
use serde::Serialize;
use std::fmt::Display;
use std::hash::Hash;
use tracing::{debug, info};

use crate::error::Result;
use crate::metrics::buying_ratio::buying_session_ratio;
use crate::metrics::hitmiss::prediction_hits_misses;
use crate::metrics::jaccard::sum_jaccard_scores;
use crate::sessions::Session;

/// Outcome of scoring one set of predicted sessions against the truth.
///
/// `total` follows the challenge rule: Jaccard sum plus the buying session
/// ratio times `(hits - misses)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationMeasure {
    pub n_predicted_sessions: usize,
    pub n_predicted_items: usize,
    pub n_ever_predicted_items: usize,
    pub n_hits: usize,
    pub n_misses: usize,
    pub sum_jaccard_scores: f64,
    pub buying_session_ratio: f64,
    pub total: f64,
}

impl EvaluationMeasure {
    pub fn get_name(&self) -> String {
        [
            "n_predicted_sessions",
            "n_predicted_items",
            "n_ever_predicted_items",
            "n_hits",
            "n_misses",
            "sum_jaccard_scores",
            "buying_session_ratio",
            "total",
        ]
        .join(",")
    }

    pub fn result(&self) -> String {
        format!(
            "{},{},{},{},{},{:.4},{:.4},{:.4}",
            self.n_predicted_sessions,
            self.n_predicted_items,
            self.n_ever_predicted_items,
            self.n_hits,
            self.n_misses,
            self.sum_jaccard_scores,
            self.buying_session_ratio,
            self.total
        )
    }
}

/// Scores `predicted_sessions` against `test_sessions`.
///
/// Session ids are expected to be unique within each collection. Fails when the
/// truth is empty or a matched pair has two empty item sets.
pub fn evaluate<S, I>(
    predicted_sessions: &[Session<S, I>],
    test_sessions: &[Session<S, I>],
) -> Result<EvaluationMeasure>
where
    S: Eq + Hash + Display,
    I: Eq + Hash,
{
    let buying_session_ratio = buying_session_ratio(test_sessions)?;
    let (n_hits, n_misses) = prediction_hits_misses(predicted_sessions, test_sessions);
    let sum_jaccard_scores = sum_jaccard_scores(predicted_sessions, test_sessions)?;
    debug!(n_hits, n_misses, sum_jaccard_scores, buying_session_ratio, "scored predictions");

    let n_predicted_items = predicted_sessions
        .iter()
        .map(|session| session.item_ids().len())
        .sum();
    let n_ever_predicted_items = predicted_sessions
        .iter()
        .flat_map(|session| session.item_ids().iter())
        .unique()
        .count();

    let total = sum_jaccard_scores + buying_session_ratio * (n_hits as f64 - n_misses as f64);
    info!(total, qty_predicted = predicted_sessions.len(), qty_truth = test_sessions.len(), "evaluation finished");

    Ok(EvaluationMeasure {
        n_predicted_sessions: predicted_sessions.len(),
        n_predicted_items,
        n_ever_predicted_items,
        n_hits,
        n_misses,
        sum_jaccard_scores,
        buying_session_ratio,
        total,
    })
}

#[cfg(test)]
mod evaluation_reporter_test {
    use super::*;
    use crate::error::ScoringError;
    use crate::sessions::{group_sessions, group_validation_sessions};
    use float_cmp::approx_eq;

    fn session(id: u64, item_ids: &[u64]) -> Session<u64, u64> {
        Session::new(id, item_ids.iter().copied().collect())
    }

    #[test]
    fn should_happyflow_evaluate() {
        let predicted = vec![session(1, &[10, 11]), session(2, &[10]), session(3, &[12])];
        let truth = vec![
            session(1, &[10]),
            session(2, &[]),
            session(4, &[13]),
            session(5, &[]),
        ];
        let measure = evaluate(&predicted, &truth).unwrap();

        assert_eq!(3, measure.n_predicted_sessions);
        assert_eq!(4, measure.n_predicted_items);
        assert_eq!(3, measure.n_ever_predicted_items);
        assert_eq!(1, measure.n_hits);
        assert_eq!(2, measure.n_misses);
        // session 1 scores 1/2, session 2 scores 0/1, session 3 is not in the truth
        assert!(approx_eq!(f64, 0.5, measure.sum_jaccard_scores, ulps = 2));
        assert!(approx_eq!(f64, 0.5, measure.buying_session_ratio, ulps = 2));
        assert!(approx_eq!(f64, 0.0, measure.total, ulps = 2));
    }

    #[test]
    fn should_score_perfect_prediction_above_its_jaccard_sum() {
        let truth = vec![session(1, &[1]), session(2, &[2, 3]), session(3, &[])];
        let predicted = vec![session(1, &[1]), session(2, &[2, 3])];
        let measure = evaluate(&predicted, &truth).unwrap();
        assert_eq!((2, 0), (measure.n_hits, measure.n_misses));
        assert!(approx_eq!(f64, 2.0, measure.sum_jaccard_scores, ulps = 2));
        assert!(approx_eq!(f64, 2.0 + 2.0 * (2.0 / 3.0), measure.total, ulps = 4));
    }

    #[test]
    fn should_fail_without_truth_sessions() {
        let predicted = vec![session(1, &[1])];
        assert!(matches!(evaluate(&predicted, &[]), Err(ScoringError::EmptyTruth)));
    }

    #[test]
    fn should_be_deterministic_for_repeated_calls() {
        let predicted = group_sessions(vec![(1_u64, 1_u64), (1, 2), (2, 3), (3, 4)]);
        let truth = group_validation_sessions(vec![(1_u64, 1_u64, 1), (1, 5, 1), (2, 3, 0), (3, 4, 2)]);
        let first = evaluate(&predicted, &truth).unwrap();
        let second = evaluate(&predicted, &truth).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn should_report_header_and_values() {
        let measure = EvaluationMeasure {
            n_predicted_sessions: 2,
            n_predicted_items: 3,
            n_ever_predicted_items: 3,
            n_hits: 1,
            n_misses: 1,
            sum_jaccard_scores: 0.5,
            buying_session_ratio: 0.25,
            total: 0.5,
        };
        assert_eq!(
            "n_predicted_sessions,n_predicted_items,n_ever_predicted_items,n_hits,n_misses,sum_jaccard_scores,buying_session_ratio,total",
            measure.get_name()
        );
        assert_eq!("2,3,3,1,1,0.5000,0.2500,0.5000", measure.result());
    }
}
