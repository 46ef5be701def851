use super::common::*;
use crate::assessment::domain::FeatureName;
use crate::assessment::features::{engineer_features, engineer_ratios};
use crate::assessment::intake::{ApplicationSubmission, IntakeGuard};

fn validated(submission: ApplicationSubmission) -> crate::assessment::ApplicantInput {
    IntakeGuard.validate(submission).expect("valid submission")
}

#[test]
fn form_defaults_produce_documented_ratios() {
    let ratios = engineer_ratios(&validated(submission()));

    assert!((ratios.dti_ratio - 0.2500).abs() < 1e-4);
    assert!((ratios.lti_ratio - 0.5000).abs() < 1e-4);
    assert!((ratios.utilization_risk - 0.0583).abs() < 1e-4);
}

#[test]
fn zero_income_and_accounts_stay_finite() {
    let ratios = engineer_ratios(&validated(ApplicationSubmission {
        income: 0.0,
        loan_amount: 250_000.0,
        sanction_amount: 90_000.0,
        bank_balance: 0.0,
        utilization_ratio: 1.0,
        open_accounts: 0,
    }));

    assert_eq!(ratios.dti_ratio, 90_000.0);
    assert_eq!(ratios.lti_ratio, 250_000.0);
    assert_eq!(ratios.utilization_risk, 1.0);
}

#[test]
fn ratios_stay_within_bounds_across_input_grid() {
    let amounts = [0.0, 1.0, 999.5, 40_000.0, 1_000_000.0, 1.0e12];
    let utilizations = [0.0, 0.01, 0.35, 0.5, 0.99, 1.0];
    let accounts = [0_u32, 1, 5, 40, u32::MAX];

    for income in amounts {
        for sanction in amounts {
            for utilization in utilizations {
                for open_accounts in accounts {
                    let ratios = engineer_ratios(&validated(ApplicationSubmission {
                        income,
                        loan_amount: sanction,
                        sanction_amount: sanction,
                        bank_balance: 0.0,
                        utilization_ratio: utilization,
                        open_accounts,
                    }));

                    assert!(ratios.dti_ratio.is_finite() && ratios.dti_ratio >= 0.0);
                    assert!(ratios.lti_ratio.is_finite() && ratios.lti_ratio >= 0.0);
                    assert!((0.0..=1.0).contains(&ratios.utilization_risk));
                }
            }
        }
    }
}

#[test]
fn feature_vector_lists_all_nine_features_in_schema_order() {
    let (vector, ratios) = engineer_features(&validated(submission()));

    let names: Vec<&str> = vector.names().collect();
    let expected: Vec<&str> = FeatureName::ALL.iter().map(|name| name.as_str()).collect();
    assert_eq!(names, expected);

    assert_eq!(vector.get("income"), Some(800_000.0));
    assert_eq!(vector.get("bank_balance_at_application"), Some(100_000.0));
    assert_eq!(vector.get("credit_utilization_ratio"), Some(0.35));
    assert_eq!(vector.get("number_of_open_accounts"), Some(5.0));
    assert_eq!(vector.get("dti_ratio"), Some(ratios.dti_ratio));
    assert_eq!(vector.get("utilization_risk"), Some(ratios.utilization_risk));
}

#[test]
fn feature_names_round_trip_through_parse() {
    for name in FeatureName::ALL {
        assert_eq!(FeatureName::parse(name.as_str()), Some(name));
    }
    assert_eq!(FeatureName::parse("employment_type"), None);
}
