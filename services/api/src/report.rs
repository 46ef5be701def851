use crate::infra::build_service;
use chrono::Utc;
use clap::Args;
use credit_guard::assessment::{
    assess_csv_path, ApplicationSubmission, BatchEntry, DecisionPolicy, RiskAssessment,
};
use credit_guard::config::AppConfig;
use credit_guard::error::AppError;
use credit_guard::telemetry;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Annual income
    #[arg(long, default_value_t = 800_000.0)]
    pub(crate) income: f64,
    /// Current bank balance
    #[arg(long, default_value_t = 100_000.0)]
    pub(crate) bank_balance: f64,
    /// Requested loan amount
    #[arg(long, default_value_t = 400_000.0)]
    pub(crate) loan_amount: f64,
    /// Amount already sanctioned on existing loans
    #[arg(long, default_value_t = 200_000.0)]
    pub(crate) sanction_amount: f64,
    /// Credit utilization as a whole percentage
    #[arg(long, default_value_t = 35, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) utilization_pct: u8,
    #[arg(long, default_value_t = 5)]
    pub(crate) open_accounts: u32,
    /// Override the directory holding the model artifacts
    #[arg(long)]
    pub(crate) artifacts: Option<PathBuf>,
    /// Print the assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn submission(&self) -> ApplicationSubmission {
        ApplicationSubmission {
            income: self.income,
            loan_amount: self.loan_amount,
            sanction_amount: self.sanction_amount,
            bank_balance: self.bank_balance,
            utilization_ratio: f64::from(self.utilization_pct) / 100.0,
            open_accounts: self.open_accounts,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one applicant per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Override the directory holding the model artifacts
    #[arg(long)]
    pub(crate) artifacts: Option<PathBuf>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;
    let service = build_service(&config, args.artifacts.clone());
    let assessment = service.assess(args.submission())?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&assessment.view(Utc::now()))
            .map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        print!("{}", render_assessment(&assessment, service.policy()));
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;
    let service = build_service(&config, args.artifacts);
    let entries = assess_csv_path(&service, &args.csv)?;
    print!("{}", render_batch(&entries));
    Ok(())
}

fn render_assessment(assessment: &RiskAssessment, policy: &DecisionPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Risk score:     {} / 100", assessment.score.value());
    let _ = writeln!(out, "Risk band:      {}", assessment.band.label());
    let _ = writeln!(out, "Decision:       {}", assessment.recommendation.summary());
    let _ = writeln!(out);
    let _ = writeln!(out, "DTI Ratio:      {:.2}", assessment.ratios.dti_ratio);
    let _ = writeln!(out, "LTI Ratio:      {:.2}", assessment.ratios.lti_ratio);
    let _ = writeln!(out, "Util. Risk:     {:.2}", assessment.ratios.utilization_risk);
    let _ = writeln!(out);
    let _ = writeln!(out, "Risk drivers:");
    for driver in &assessment.drivers {
        let _ = writeln!(out, "  {:<18}{:.4}", driver.label, driver.value);
    }
    if !assessment.defaulted_features.is_empty() {
        let _ = writeln!(
            out,
            "Defaulted to 0: {}",
            assessment.defaulted_features.join(", ")
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Score bands:");
    for range in policy.band_ranges() {
        let _ = writeln!(
            out,
            "  {:<10}{:>3} - {:<3}",
            range.band.label(),
            range.min,
            range.max
        );
    }
    out
}

fn render_batch(entries: &[BatchEntry]) -> String {
    let mut out = String::new();
    let mut scored = 0usize;
    for entry in entries {
        match &entry.outcome {
            Ok(assessment) => {
                scored += 1;
                let _ = writeln!(
                    out,
                    "row {:>4}: score {:>3}  {:<8}  {}",
                    entry.row,
                    assessment.score.value(),
                    assessment.band.label(),
                    assessment.recommendation.label()
                );
            }
            Err(err) => {
                let _ = writeln!(out, "row {:>4}: error  {err}", entry.row);
            }
        }
    }
    let _ = writeln!(
        out,
        "{} rows, {} scored, {} failed",
        entries.len(),
        scored,
        entries.len() - scored
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_guard::assessment::{BatchRowError, EngineeredRatios, RiskBand, RiskScore};
    use credit_guard::assessment::{AssessmentError, ValidationError};

    fn approved() -> RiskAssessment {
        let ratios = EngineeredRatios {
            dti_ratio: 0.25,
            lti_ratio: 0.5,
            utilization_risk: 0.0583,
        };
        RiskAssessment {
            score: RiskScore::new(8).expect("in range"),
            band: RiskBand::Low,
            recommendation: RiskBand::Low.recommendation(),
            probability: 0.081,
            ratios,
            drivers: ratios.drivers(),
            defaulted_features: Vec::new(),
        }
    }

    #[test]
    fn utilization_percentage_becomes_a_ratio() {
        let args = AssessArgs {
            income: 1.0,
            bank_balance: 1.0,
            loan_amount: 1.0,
            sanction_amount: 1.0,
            utilization_pct: 35,
            open_accounts: 1,
            artifacts: None,
            json: false,
        };
        assert!((args.submission().utilization_ratio - 0.35).abs() < 1e-12);
    }

    #[test]
    fn report_lists_ratios_drivers_and_bands() {
        let report = render_assessment(&approved(), &DecisionPolicy::default());

        assert!(report.contains("Risk score:     8 / 100"));
        assert!(report.contains("APPROVED: Applicant meets safety criteria."));
        assert!(report.contains("DTI Ratio:      0.25"));
        assert!(report.contains("Util. Risk:     0.06"));
        assert!(report.contains("Debt Burden"));
        assert!(report.contains("MODERATE   35 - 69"));
        assert!(!report.contains("Defaulted"));
    }

    #[test]
    fn batch_summary_counts_failures() {
        let entries = vec![
            BatchEntry {
                row: 1,
                outcome: Ok(approved()),
            },
            BatchEntry {
                row: 2,
                outcome: Err(BatchRowError::Assessment(AssessmentError::Validation(
                    ValidationError::UtilizationOutOfRange(1.5),
                ))),
            },
        ];

        let report = render_batch(&entries);
        assert!(report.contains("row    1: score   8  LOW       APPROVED"));
        assert!(report.contains("row    2: error"));
        assert!(report.contains("2 rows, 1 scored, 1 failed"));
    }
}
