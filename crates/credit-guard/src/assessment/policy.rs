use serde::{Deserialize, Serialize};

use super::domain::{RiskBand, RiskScore};

/// Fixed score thresholds splitting `0..=100` into three bands.
///
/// Scores below `review_from` are low risk, scores from `reject_from` upward are high risk,
/// everything in between goes to manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy")]
pub struct DecisionPolicy {
    review_from: u8,
    reject_from: u8,
}

impl DecisionPolicy {
    pub const DEFAULT_REVIEW_FROM: u8 = 35;
    pub const DEFAULT_REJECT_FROM: u8 = 70;

    pub fn new(review_from: u8, reject_from: u8) -> Result<Self, PolicyError> {
        if review_from == 0 || review_from >= reject_from || reject_from > RiskScore::MAX {
            return Err(PolicyError::InvalidThresholds {
                review_from,
                reject_from,
            });
        }

        Ok(Self {
            review_from,
            reject_from,
        })
    }

    pub fn review_from(&self) -> u8 {
        self.review_from
    }

    pub fn reject_from(&self) -> u8 {
        self.reject_from
    }

    pub fn band_for(&self, score: RiskScore) -> RiskBand {
        let value = score.value();
        if value < self.review_from {
            RiskBand::Low
        } else if value < self.reject_from {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }

    /// Inclusive score range covered by each band, lowest band first.
    pub fn band_ranges(&self) -> [BandRange; 3] {
        [
            BandRange {
                band: RiskBand::Low,
                min: 0,
                max: self.review_from - 1,
            },
            BandRange {
                band: RiskBand::Moderate,
                min: self.review_from,
                max: self.reject_from - 1,
            },
            BandRange {
                band: RiskBand::High,
                min: self.reject_from,
                max: RiskScore::MAX,
            },
        ]
    }
}

/// Unchecked wire form; deserialization goes through [`DecisionPolicy::new`].
#[derive(Deserialize)]
struct RawPolicy {
    review_from: u8,
    reject_from: u8,
}

impl TryFrom<RawPolicy> for DecisionPolicy {
    type Error = PolicyError;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.review_from, raw.reject_from)
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            review_from: Self::DEFAULT_REVIEW_FROM,
            reject_from: Self::DEFAULT_REJECT_FROM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandRange {
    pub band: RiskBand,
    pub min: u8,
    pub max: u8,
}

impl BandRange {
    pub fn contains(&self, score: RiskScore) -> bool {
        (self.min..=self.max).contains(&score.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error(
        "thresholds must satisfy 0 < review ({review_from}) < reject ({reject_from}) <= 100"
    )]
    InvalidThresholds { review_from: u8, reject_from: u8 },
}
