use serde::{Deserialize, Serialize};

/// Raw applicant figures as submitted by a form, API call, or CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub income: f64,
    pub loan_amount: f64,
    pub sanction_amount: f64,
    pub bank_balance: f64,
    pub utilization_ratio: f64,
    pub open_accounts: u32,
}

/// Validated applicant figures; only obtainable through [`IntakeGuard::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplicantInput {
    income: f64,
    loan_amount: f64,
    sanction_amount: f64,
    bank_balance: f64,
    utilization_ratio: f64,
    open_accounts: u32,
}

impl ApplicantInput {
    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn sanction_amount(&self) -> f64 {
        self.sanction_amount
    }

    pub fn bank_balance(&self) -> f64 {
        self.bank_balance
    }

    pub fn utilization_ratio(&self) -> f64 {
        self.utilization_ratio
    }

    pub fn open_accounts(&self) -> u32 {
        self.open_accounts
    }
}

impl TryFrom<ApplicationSubmission> for ApplicantInput {
    type Error = ValidationError;

    fn try_from(submission: ApplicationSubmission) -> Result<Self, Self::Error> {
        IntakeGuard.validate(submission)
    }
}

/// Validation errors raised before any feature engineering happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("utilization_ratio must be between 0 and 1 (found {0})")]
    UtilizationOutOfRange(f64),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotFinite { field } | ValidationError::Negative { field, .. } => {
                field
            }
            ValidationError::UtilizationOutOfRange(_) => "utilization_ratio",
        }
    }
}

/// Guard that rejects malformed submissions instead of clamping them.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn validate(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicantInput, ValidationError> {
        let ApplicationSubmission {
            income,
            loan_amount,
            sanction_amount,
            bank_balance,
            utilization_ratio,
            open_accounts,
        } = submission;

        non_negative("income", income)?;
        non_negative("loan_amount", loan_amount)?;
        non_negative("sanction_amount", sanction_amount)?;
        non_negative("bank_balance", bank_balance)?;

        if !utilization_ratio.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "utilization_ratio",
            });
        }
        if !(0.0..=1.0).contains(&utilization_ratio) {
            return Err(ValidationError::UtilizationOutOfRange(utilization_ratio));
        }

        Ok(ApplicantInput {
            income,
            loan_amount,
            sanction_amount,
            bank_balance,
            utilization_ratio,
            open_accounts,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}
