use crate::error::{Result, ScoringError};
use crate::sessions::Session;

/// Fraction of truth sessions with at least one purchase.
pub fn buying_session_ratio<S, I>(test_sessions: &[Session<S, I>]) -> Result<f64> {
    if test_sessions.is_empty() {
        return Err(ScoringError::EmptyTruth);
    }
    let qty_buying = test_sessions
        .iter()
        .filter(|session| session.has_bought())
        .count();
    Ok(qty_buying as f64 / test_sessions.len() as f64)
}

#[cfg(test)]
mod buying_ratio_test {
    use super::*;
    use float_cmp::approx_eq;

    fn session(id: u64, item_ids: &[&'static str]) -> Session<u64, &'static str> {
        Session::new(id, item_ids.iter().copied().collect())
    }

    #[test]
    fn should_calculate_buying_session_ratio() {
        let truth = vec![
            session(1, &[]),
            session(2, &["ITEM_BOUGHT"]),
            session(3, &[]),
            session(4, &[]),
        ];
        let ratio = buying_session_ratio(&truth).unwrap();
        assert!(approx_eq!(f64, 0.25, ratio, ulps = 2));
    }

    #[test]
    fn should_be_zero_without_buys_and_one_with_only_buys() {
        let no_buys = vec![session(1, &[]), session(2, &[])];
        assert!((0.0 - buying_session_ratio(&no_buys).unwrap()).abs() < f64::EPSILON);

        let only_buys = vec![session(1, &["A"]), session(2, &["B"])];
        assert!((1.0 - buying_session_ratio(&only_buys).unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn should_fail_on_empty_truth() {
        let truth: Vec<Session<u64, u64>> = Vec::new();
        assert!(matches!(
            buying_session_ratio(&truth),
            Err(ScoringError::EmptyTruth)
        ));
    }
}
