use super::domain::{EngineeredRatios, FeatureName, FeatureVector};
use super::intake::ApplicantInput;

/// Offset added to every ratio denominator so a zero income or zero open accounts stays
/// well defined.
const DENOMINATOR_OFFSET: f64 = 1.0;

pub fn engineer_ratios(input: &ApplicantInput) -> EngineeredRatios {
    let income_base = input.income() + DENOMINATOR_OFFSET;
    let account_base = f64::from(input.open_accounts()) + DENOMINATOR_OFFSET;

    EngineeredRatios {
        dti_ratio: input.sanction_amount() / income_base,
        lti_ratio: input.loan_amount() / income_base,
        utilization_risk: input.utilization_ratio() / account_base,
    }
}

/// Expand validated input into the nine named model features.
pub fn engineer_features(input: &ApplicantInput) -> (FeatureVector, EngineeredRatios) {
    let ratios = engineer_ratios(input);
    let mut vector = FeatureVector::new();

    for name in FeatureName::ALL {
        let value = match name {
            FeatureName::Income => input.income(),
            FeatureName::LoanAmount => input.loan_amount(),
            FeatureName::SanctionAmount => input.sanction_amount(),
            FeatureName::BankBalanceAtApplication => input.bank_balance(),
            FeatureName::CreditUtilizationRatio => input.utilization_ratio(),
            FeatureName::NumberOfOpenAccounts => f64::from(input.open_accounts()),
            FeatureName::DtiRatio => ratios.dti_ratio,
            FeatureName::LtiRatio => ratios.lti_ratio,
            FeatureName::UtilizationRisk => ratios.utilization_risk,
        };
        vector.insert(name.as_str(), value);
    }

    (vector, ratios)
}
