use beacon::domain::models::DataProvenance;
use beacon::services::{TrustBand, TrustScorer, UNVERIFIED_PENALTY};
use proptest::prelude::*;

fn provenance_strategy() -> impl Strategy<Value = Vec<(f64, bool)>> {
    prop::collection::vec((0.0f64..=1.0, any::<bool>()), 1..32)
}

fn records(entries: &[(f64, bool)]) -> Vec<DataProvenance> {
    entries
        .iter()
        .map(|&(confidence, verified)| DataProvenance::new("database", confidence, verified))
        .collect()
}

fn mean(entries: &[(f64, bool)]) -> f64 {
    entries.iter().map(|(c, _)| c).sum::<f64>() / entries.len() as f64
}

proptest! {
    /// Property: trust score always lies in [0, 1]
    #[test]
    fn prop_score_is_bounded(entries in provenance_strategy()) {
        let score = TrustScorer::new().score(&records(&entries));
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    /// Property: the score stays in [0, 1] even for NaN or out-of-range
    /// confidences built directly in code
    #[test]
    fn prop_score_is_bounded_for_any_confidence(
        entries in prop::collection::vec((any::<f64>(), any::<bool>()), 1..32),
    ) {
        let score = TrustScorer::new().score(&records(&entries));
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    /// Property: fully verified provenance scores exactly the mean confidence
    #[test]
    fn prop_all_verified_is_mean(confidences in prop::collection::vec(0.0f64..=1.0, 1..32)) {
        let entries: Vec<(f64, bool)> = confidences.iter().map(|&c| (c, true)).collect();
        let score = TrustScorer::new().score(&records(&entries));
        prop_assert_eq!(score, mean(&entries));
    }

    /// Property: a single unverified record applies the penalty to the whole mean
    #[test]
    fn prop_any_unverified_applies_penalty(
        mut entries in provenance_strategy(),
        index in any::<prop::sample::Index>(),
    ) {
        let i = index.index(entries.len());
        entries[i].1 = false;
        let score = TrustScorer::new().score(&records(&entries));
        prop_assert_eq!(score, mean(&entries) * UNVERIFIED_PENALTY);
    }

    /// Property: marking a record unverified never raises the score
    #[test]
    fn prop_unverifying_never_raises_score(
        entries in provenance_strategy(),
        index in any::<prop::sample::Index>(),
    ) {
        let scorer = TrustScorer::new();
        let before = scorer.score(&records(&entries));
        let mut degraded = entries.clone();
        degraded[index.index(entries.len())].1 = false;
        prop_assert!(scorer.score(&records(&degraded)) <= before);
    }

    /// Property: score is independent of record order
    #[test]
    fn prop_score_is_order_independent(entries in provenance_strategy()) {
        let scorer = TrustScorer::new();
        let mut reversed = entries.clone();
        reversed.reverse();
        let a = scorer.score(&records(&entries));
        let b = scorer.score(&records(&reversed));
        prop_assert!((a - b).abs() < 1e-12);
    }

    /// Property: bands partition the score range at 0.5 and 0.8
    #[test]
    fn prop_band_thresholds(score in 0.0f64..=1.0) {
        let expected = if score >= 0.8 {
            TrustBand::High
        } else if score >= 0.5 {
            TrustBand::Moderate
        } else {
            TrustBand::Low
        };
        prop_assert_eq!(TrustBand::from_score(score), expected);
    }
}

#[test]
fn test_empty_provenance_scores_zero() {
    assert_eq!(TrustScorer::new().score(&[]), 0.0);
}
