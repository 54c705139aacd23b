//! Report rendering to text or JSON, on stdout or to a file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use fairscore_core::{Report, Verdict};

/// Emit a report according to the output argument: a format name (`text`,
/// `json`) prints to stdout; anything else is treated as an output file path
/// whose extension selects the format.
pub fn emit(report: &Report, output: &str) -> Result<()> {
    match output {
        "text" => {
            print!("{}", to_text(report));
            Ok(())
        }
        "json" => {
            println!("{}", to_json(report)?);
            Ok(())
        }
        path => {
            let rendered = match Path::new(path).extension().and_then(|e| e.to_str()) {
                Some("json") => format!("{}\n", to_json(report)?),
                _ => to_text(report),
            };
            fs::write(path, rendered).with_context(|| format!("failed to write {path}"))?;
            tracing::info!(path, "report written");
            Ok(())
        }
    }
}

fn to_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "pass",
        Verdict::PartialPass => "partial",
        Verdict::Fail => "fail",
        Verdict::NotApplicable => "n/a",
        Verdict::Indeterminate => "indeterminate",
    }
}

fn to_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} score for {}\n", report.scheme, report.subject));
    out.push_str(&format!(
        "total: {:.2} / {:.2}\n",
        report.total_score, report.total_max
    ));

    for principle in &report.principles {
        out.push_str(&format!(
            "\n{} ({}): {:.2} / {:.2}\n",
            principle.principle.name(),
            principle.principle.code(),
            principle.score,
            principle.max_score
        ));
        for criterion in &principle.criteria {
            out.push_str(&format!(
                "  [{:>13}] {:8} {}\n",
                verdict_label(criterion.verdict),
                criterion.criterion_id,
                criterion.explanation
            ));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str("\nwarnings:\n");
        for warning in &report.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairscore_core::{compute_score, MetadataRecord, OfflineResolver, Scheme};

    fn sample_report() -> Report {
        let record = MetadataRecord::from_json(
            r#"{"identifier": "https://doi.org/10.1/x", "title": "T", "description": "D"}"#,
        )
        .unwrap();
        compute_score(Scheme::Fair, &record, &OfflineResolver).unwrap()
    }

    #[test]
    fn test_text_rendering_includes_totals_and_criteria() {
        let report = sample_report();
        let text = to_text(&report);
        assert!(text.contains("FAIR score for https://doi.org/10.1/x"));
        assert!(text.contains("total:"));
        assert!(text.contains("F1"));
    }

    #[test]
    fn test_json_rendering_round_trips() {
        let report = sample_report();
        let json = to_json(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
