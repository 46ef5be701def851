use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::domain::RiskAssessment;
use super::intake::ApplicationSubmission;
use super::service::{AssessmentError, RiskAssessmentService};

/// Outcome for one CSV data row; `row` counts from 1, excluding the header.
#[derive(Debug)]
pub struct BatchEntry {
    pub row: usize,
    pub outcome: Result<RiskAssessment, BatchRowError>,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchRowError {
    #[error("unreadable row: {0}")]
    Parse(#[from] csv::Error),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

/// Failures that stop a batch before any row is scored.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to open applicant CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV header: {0}")]
    Header(#[source] csv::Error),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

pub fn assess_csv_path<P: AsRef<Path>>(
    service: &RiskAssessmentService,
    path: P,
) -> Result<Vec<BatchEntry>, BatchError> {
    let file = std::fs::File::open(path)?;
    assess_csv(service, file)
}

/// Score every row of a CSV whose headers are the six submission field names.
///
/// Bad rows are reported in place; only unusable headers or unavailable artifacts abort.
pub fn assess_csv<R: Read>(
    service: &RiskAssessmentService,
    reader: R,
) -> Result<Vec<BatchEntry>, BatchError> {
    service.ensure_ready()?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.headers().map_err(BatchError::Header)?;

    let mut entries = Vec::new();
    for (index, record) in csv_reader.deserialize::<ApplicationSubmission>().enumerate() {
        let row = index + 1;
        let outcome = match record {
            Ok(submission) => service.assess(submission).map_err(BatchRowError::from),
            Err(err) => Err(BatchRowError::from(err)),
        };

        if let Err(err) = &outcome {
            warn!(row, error = %err, "batch row not scored");
        }
        entries.push(BatchEntry { row, outcome });
    }

    let scored = entries.iter().filter(|entry| entry.outcome.is_ok()).count();
    info!(rows = entries.len(), scored, "batch assessment finished");

    Ok(entries)
}
