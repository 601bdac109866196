//! `beacon inspect`: trust metrics for a saved API response.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::DataProvenance;
use crate::services::{TraceIngestor, TrustBand, TrustMetrics, TrustScorer};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Response JSON carrying `execution_trace` and `data_provenance`; `-` reads stdin
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub metrics: TrustMetrics,
    pub provenance: Vec<DataProvenance>,
}

impl CommandOutput for InspectOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        if let Some(ref id) = self.request_id {
            lines.push(format!("Request:      {id}"));
        }
        lines.push(format!(
            "Trust score:  {:.2} ({})",
            self.metrics.trust_score,
            self.metrics.band.as_str()
        ));

        if let Some(ref summary) = self.metrics.summary {
            lines.push(format!("Duration:     {:.1} ms", summary.duration_ms));
            lines.push(format!(
                "Path:         {}",
                if summary.components_visited.is_empty() {
                    "-".to_string()
                } else {
                    summary.components_visited.join(" -> ")
                }
            ));
            lines.push(format!("DB queries:   {}", summary.database_queries));
            lines.push(format!(
                "All verified: {}",
                if summary.all_verified { "yes" } else { "no" }
            ));
        } else {
            lines.push("No execution trace.".to_string());
        }

        if self.provenance.is_empty() {
            lines.push("No data provenance.".to_string());
        } else {
            lines.push(String::new());
            lines.push(provenance_table(&self.provenance).to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn provenance_table(records: &[DataProvenance]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Verified").add_attribute(Attribute::Bold),
            Cell::new("Timestamp").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        let verified = if record.verified {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&record.source_type),
            Cell::new(truncate(record.source_id.as_deref().unwrap_or("-"), 24)),
            Cell::new(format!("{:.2}", record.confidence))
                .set_alignment(CellAlignment::Right)
                .fg(band_color(TrustBand::from_score(record.confidence))),
            verified,
            Cell::new(&record.timestamp),
        ]);
    }
    table
}

fn band_color(band: TrustBand) -> Color {
    match band {
        TrustBand::High => Color::Green,
        TrustBand::Moderate => Color::Yellow,
        TrustBand::Low => Color::Red,
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read response from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))
    }
}

/// Score a raw response document.
pub fn inspect_value(raw: &Value) -> InspectOutput {
    let observability = TraceIngestor::new().ingest_response(raw);
    let metrics = TrustScorer::new().metrics(&observability);
    InspectOutput {
        request_id: observability
            .trace
            .as_ref()
            .map(|t| t.request_id.clone())
            .filter(|id| !id.is_empty()),
        metrics,
        provenance: observability.provenance,
    }
}

pub async fn execute(args: InspectArgs, json_mode: bool) -> Result<()> {
    let text = read_input(&args.file)?;
    let raw: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    let report = inspect_value(&raw);
    tracing::debug!(
        trust_score = report.metrics.trust_score,
        provenance = report.provenance.len(),
        "inspected response"
    );
    output(&report, json_mode);
    Ok(())
}
