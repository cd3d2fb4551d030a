use clap::Args;
use credit_scoring::config::AppConfig;
use credit_scoring::error::AppError;
use credit_scoring::scoring::{
    validate, ScoreOutcome, ScoreRequest, ScoringEngine, ScoringThresholds, BASE_SCORE,
};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Applicant JSON document to score (reads stdin when omitted)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Print each factor contribution and the unclamped total
    #[arg(long)]
    pub(crate) breakdown: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let output = match &args.input {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            score_document(reader, config.scoring, args.breakdown)?
        }
        None => score_document(io::stdin().lock(), config.scoring, args.breakdown)?,
    };

    print!("{output}");
    Ok(())
}

fn score_document<R: Read>(
    reader: R,
    thresholds: ScoringThresholds,
    breakdown: bool,
) -> Result<String, AppError> {
    let request: ScoreRequest = serde_json::from_reader(reader)
        .map_err(|err| AppError::MalformedBody(err.to_string()))?;
    let profile = validate(request)?;
    let outcome = ScoringEngine::new(thresholds).evaluate(&profile);

    let mut output = serde_json::to_string_pretty(&outcome.result)
        .map_err(|err| AppError::Io(err.into()))?;
    output.push('\n');

    if breakdown {
        output.push_str(&render_breakdown(&outcome));
    }

    Ok(output)
}

fn render_breakdown(outcome: &ScoreOutcome) -> String {
    let mut rendered = String::from("\nScore breakdown\n");
    let _ = writeln!(rendered, "  {:<16}{:>6}", "base", BASE_SCORE);
    for (kind, points) in outcome.factors.components() {
        let _ = writeln!(rendered, "  {:<16}{:>+6}", kind.label(), points);
    }
    let _ = writeln!(rendered, "  {:<16}{:>6}", "raw total", outcome.raw_total);
    let _ = writeln!(rendered, "  {:<16}{:>6}", "final score", outcome.result.score);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOR_APPLICANT: &str = r#"{
        "age": 20,
        "income": 20000,
        "credit_history_years": 0,
        "existing_loans": 6,
        "debt_to_income_ratio": 0.8,
        "savings": 0,
        "employment_status": "Unemployed",
        "employment_years": 0
    }"#;

    #[test]
    fn scores_document_as_pretty_json() {
        let output = score_document(POOR_APPLICANT.as_bytes(), ScoringThresholds::default(), false)
            .expect("document scores");

        let value: serde_json::Value = serde_json::from_str(&output).expect("json output");
        assert_eq!(value["score"], 380);
        assert_eq!(value["decision"], "rejected");
        assert_eq!(value["risk_level"], "high");
        assert!(!output.contains("Score breakdown"));
    }

    #[test]
    fn breakdown_lists_every_factor() {
        let output = score_document(POOR_APPLICANT.as_bytes(), ScoringThresholds::default(), true)
            .expect("document scores");

        assert!(output.contains("Score breakdown"));
        assert!(output.contains("  base               600"));
        assert!(output.contains("  loans_penalty      -60"));
        assert!(output.contains("  employment         -40"));
        assert!(output.contains("  raw total          380"));
    }

    #[test]
    fn invalid_documents_are_rejected() {
        let err = score_document(&b"{\"age\": 20"[..], ScoringThresholds::default(), false)
            .expect_err("truncated json rejected");
        assert!(matches!(err, AppError::MalformedBody(_)));

        let out_of_range = POOR_APPLICANT.replace("\"age\": 20", "\"age\": 12");
        let err = score_document(out_of_range.as_bytes(), ScoringThresholds::default(), false)
            .expect_err("underage applicant rejected");
        assert!(matches!(err, AppError::Validation(_)));
    }
}
