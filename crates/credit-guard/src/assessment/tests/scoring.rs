use super::common::*;
use crate::assessment::alignment::align_columns;
use crate::assessment::domain::{Recommendation, RiskBand};
use crate::assessment::features::engineer_features;
use crate::assessment::intake::IntakeGuard;
use crate::assessment::model::ModelError;
use crate::assessment::policy::DecisionPolicy;
use crate::assessment::scoring::{score_features, score_from_probability, ScoringError};

fn aligned_defaults() -> crate::assessment::AlignedFeatures {
    let input = IntakeGuard.validate(submission()).expect("valid");
    let (vector, _) = engineer_features(&input);
    align_columns(&vector, &canonical_columns())
}

#[test]
fn high_probability_is_rejected() {
    let artifacts = fixed_artifacts(canonical_columns(), 0.80);

    let card = score_features(&aligned_defaults(), &artifacts).expect("scores");
    let band = DecisionPolicy::default().band_for(card.score);

    assert_eq!(card.score.value(), 80);
    assert_eq!(band, RiskBand::High);
    assert_eq!(band.recommendation().label(), "REJECTED");
}

#[test]
fn low_probability_is_approved() {
    let artifacts = fixed_artifacts(canonical_columns(), 0.10);

    let card = score_features(&aligned_defaults(), &artifacts).expect("scores");
    let band = DecisionPolicy::default().band_for(card.score);

    assert_eq!(card.score.value(), 10);
    assert_eq!(band, RiskBand::Low);
    assert_eq!(band.recommendation(), Recommendation::Approved);
}

#[test]
fn score_truncates_toward_zero() {
    assert_eq!(score_from_probability(0.999).expect("valid").value(), 99);
    assert_eq!(score_from_probability(0.0).expect("valid").value(), 0);
    assert_eq!(score_from_probability(1.0).expect("valid").value(), 100);
}

#[test]
fn out_of_range_probabilities_are_errors() {
    for probability in [-0.1, 1.5, f64::NAN] {
        assert!(matches!(
            score_from_probability(probability),
            Err(ScoringError::ProbabilityOutOfRange(_))
        ));
    }
}

#[test]
fn column_count_mismatch_is_a_model_error() {
    let artifacts = fixed_artifacts(canonical_columns(), 0.5);
    let input = IntakeGuard.validate(submission()).expect("valid");
    let (vector, _) = engineer_features(&input);
    let short = align_columns(&vector, &canonical_columns()[..4]);

    let err = score_features(&short, &artifacts).expect_err("mismatch detected");

    assert_eq!(
        err,
        ScoringError::Model(ModelError::DimensionMismatch {
            expected: 9,
            found: 4
        })
    );
}
