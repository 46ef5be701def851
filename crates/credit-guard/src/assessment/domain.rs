use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Features produced for every applicant, in the order the reference model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    Income,
    LoanAmount,
    SanctionAmount,
    BankBalanceAtApplication,
    CreditUtilizationRatio,
    NumberOfOpenAccounts,
    DtiRatio,
    LtiRatio,
    UtilizationRisk,
}

impl FeatureName {
    pub const ALL: [FeatureName; 9] = [
        FeatureName::Income,
        FeatureName::LoanAmount,
        FeatureName::SanctionAmount,
        FeatureName::BankBalanceAtApplication,
        FeatureName::CreditUtilizationRatio,
        FeatureName::NumberOfOpenAccounts,
        FeatureName::DtiRatio,
        FeatureName::LtiRatio,
        FeatureName::UtilizationRisk,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FeatureName::Income => "income",
            FeatureName::LoanAmount => "loan_amount",
            FeatureName::SanctionAmount => "sanction_amount",
            FeatureName::BankBalanceAtApplication => "bank_balance_at_application",
            FeatureName::CreditUtilizationRatio => "credit_utilization_ratio",
            FeatureName::NumberOfOpenAccounts => "number_of_open_accounts",
            FeatureName::DtiRatio => "dti_ratio",
            FeatureName::LtiRatio => "lti_ratio",
            FeatureName::UtilizationRisk => "utilization_risk",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == raw)
    }
}

/// Ordered name -> value mapping handed to the column aligner.
///
/// Keys are free-form strings so models trained on extra columns (one-hot categories and
/// the like) can still be served; lookups for unknown names fall back to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub const MISSING_VALUE: f64 = 0.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value, keeping the original position on overwrite.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut vector = FeatureVector::new();
        for (name, value) in iter {
            vector.insert(name, value);
        }
        vector
    }
}

/// The three engineered ratios surfaced alongside every score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRatios {
    pub dti_ratio: f64,
    pub lti_ratio: f64,
    pub utilization_risk: f64,
}

impl EngineeredRatios {
    /// Labelled drivers in display order.
    pub fn drivers(&self) -> Vec<RiskDriver> {
        vec![
            RiskDriver {
                label: "Debt Burden",
                feature: FeatureName::DtiRatio,
                value: self.dti_ratio,
            },
            RiskDriver {
                label: "Loan Exposure",
                feature: FeatureName::LtiRatio,
                value: self.lti_ratio,
            },
            RiskDriver {
                label: "Utilization Risk",
                feature: FeatureName::UtilizationRisk,
                value: self.utilization_risk,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDriver {
    pub label: &'static str,
    pub feature: FeatureName,
    pub value: f64,
}

/// Integer risk score on the 0..=100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MAX: u8 = 100;

    /// Returns `None` above 100.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub const fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Moderate => "MODERATE",
            RiskBand::High => "HIGH",
        }
    }

    pub const fn recommendation(self) -> Recommendation {
        match self {
            RiskBand::Low => Recommendation::Approved,
            RiskBand::Moderate => Recommendation::ManualReview,
            RiskBand::High => Recommendation::Rejected,
        }
    }
}

/// Action suggested to the credit officer for a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approved,
    ManualReview,
    Rejected,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Approved => "APPROVED",
            Recommendation::ManualReview => "MANUAL REVIEW",
            Recommendation::Rejected => "REJECTED",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Recommendation::Approved => "Applicant meets safety criteria.",
            Recommendation::ManualReview => "Moderate risk factors detected.",
            Recommendation::Rejected => "High probability of default.",
        }
    }

    pub fn summary(self) -> String {
        format!("{}: {}", self.label(), self.message())
    }
}

/// Scored applicant with the figures needed to explain the decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: RiskScore,
    pub band: RiskBand,
    pub recommendation: Recommendation,
    pub probability: f64,
    pub ratios: EngineeredRatios,
    pub drivers: Vec<RiskDriver>,
    pub defaulted_features: Vec<String>,
}

impl RiskAssessment {
    /// Public representation returned by the HTTP and CLI surfaces.
    pub fn view(&self, assessed_at: DateTime<Utc>) -> AssessmentView {
        AssessmentView {
            score: self.score.value(),
            band: self.band,
            recommendation: self.recommendation.label(),
            message: self.recommendation.message(),
            probability: self.probability,
            ratios: self.ratios,
            drivers: self.drivers.clone(),
            defaulted_features: self.defaulted_features.clone(),
            assessed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub score: u8,
    pub band: RiskBand,
    pub recommendation: &'static str,
    pub message: &'static str,
    pub probability: f64,
    pub ratios: EngineeredRatios,
    pub drivers: Vec<RiskDriver>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defaulted_features: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}
