//! fairscore: score DCAT-style dataset metadata against FAIR, CARE and LC
//! label criteria.
//!
//! The CLI loads a normalized metadata document (JSON or YAML) from a file
//! path or URL, optionally validates it against the record schema, runs the
//! scoring engine with or without catalogue lookups, and renders the Report
//! as text or JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::time::Duration;

use fairscore_core::{compute_score, MetadataRecord, OfflineResolver, Scheme};
use fairscore_runtime::{HttpCatalogue, RuntimeConfig, ScoreOrchestrator, CATALOGUE_TOKEN_ENV};

mod render;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeArg {
    Fair,
    Care,
    Lc,
}

impl From<SchemeArg> for Scheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Fair => Scheme::Fair,
            SchemeArg::Care => Scheme::Care,
            SchemeArg::Lc => Scheme::Lc,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "fairscore",
    version,
    about = "Score DCAT-style dataset metadata against FAIR, CARE and LC label criteria"
)]
struct Cli {
    /// Scoring scheme to apply.
    #[arg(value_enum)]
    scheme: SchemeArg,

    /// Path or URL of a normalized metadata document (JSON or YAML).
    input: String,

    /// Output format (text, json), or an output file path whose extension
    /// selects the format.
    #[arg(short, long, default_value = "text")]
    output: String,

    /// Validate the document against the record schema before scoring.
    #[arg(long)]
    validate: bool,

    /// Skip catalogue lookups; agent indigeneity resolves to Unknown.
    #[arg(long)]
    offline: bool,

    /// Base URL of the indigeneity catalogue.
    #[arg(long, default_value = "https://catalogue.idnau.org/api")]
    catalogue_url: String,

    /// Timeout for a single catalogue lookup.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "5s")]
    lookup_timeout: Duration,

    /// Overall deadline for agent resolution.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "30s")]
    run_timeout: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let document = load_document(&cli.input).await?;
    let record = parse_record(&cli.input, &document, cli.validate)?;

    let scheme = Scheme::from(cli.scheme);
    let report = if cli.offline {
        compute_score(scheme, &record, &OfflineResolver)?
    } else {
        let mut catalogue =
            HttpCatalogue::new(cli.catalogue_url.trim_end_matches('/')).with_timeout(cli.lookup_timeout);
        if let Ok(token) = std::env::var(CATALOGUE_TOKEN_ENV) {
            catalogue = catalogue.with_token(token);
        }
        let config = RuntimeConfig {
            lookup_timeout: cli.lookup_timeout,
            run_timeout: cli.run_timeout,
            ..Default::default()
        };
        ScoreOrchestrator::new(catalogue, config)
            .compute(scheme, &record)
            .await?
    };

    for warning in &report.warnings {
        tracing::warn!(%warning, "degraded operation");
    }

    render::emit(&report, &cli.output)
}

/// Load the raw document from a file path or URL.
async fn load_document(input: &str) -> Result<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        let response = reqwest::get(input)
            .await
            .with_context(|| format!("failed to fetch {input}"))?;
        if !response.status().is_success() {
            bail!("fetching {input} returned status {}", response.status());
        }
        Ok(response.text().await?)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

fn is_yaml(input: &str) -> bool {
    input.ends_with(".yaml") || input.ends_with(".yml")
}

/// Parse (and optionally schema-validate) the document into a record.
fn parse_record(input: &str, document: &str, validate: bool) -> Result<MetadataRecord> {
    let yaml = is_yaml(input);

    if validate {
        let value: serde_json::Value = if yaml {
            let parsed: serde_yaml::Value =
                serde_yaml::from_str(document).context("document is not valid YAML")?;
            serde_json::to_value(parsed).context("document cannot be represented as JSON")?
        } else {
            serde_json::from_str(document).context("document is not valid JSON")?
        };
        fairscore_core::record::schema::validate_document(&value)
            .context("document failed schema validation")?;
    }

    let record = if yaml {
        MetadataRecord::from_yaml(document)?
    } else {
        MetadataRecord::from_json(document)?
    };
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_detection_by_extension() {
        assert!(is_yaml("dataset.yaml"));
        assert!(is_yaml("https://example.org/dataset.yml"));
        assert!(!is_yaml("dataset.json"));
    }

    #[test]
    fn test_parse_record_validates_on_request() {
        let bad = r#"{"themes": "not-an-array"}"#;
        let err = parse_record("d.json", bad, true).unwrap_err();
        assert!(err.to_string().contains("schema"));

        let good = r#"{"identifier": "x:1", "themes": ["health"]}"#;
        assert!(parse_record("d.json", good, true).is_ok());
    }
}
