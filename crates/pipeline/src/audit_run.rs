//! Performance audit over analytics CSV files on disk.

use std::path::{Path, PathBuf};

use tubelens_core::audit::{build_audit_report, parse_chart_data, parse_totals, AuditReport};
use tubelens_core::recommendation::{synthesize, Recommendation};

use crate::error::PipelineError;

/// File-name fragment identifying a totals export.
const TOTALS_MARKER: &str = "totals";
/// File-name fragment identifying a chart data export.
const CHART_MARKER: &str = "chart";

/// Paths of the two analytics exports; either may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditInputs {
    pub totals: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

impl AuditInputs {
    /// Build inputs from user-entered paths. Surrounding whitespace and
    /// quote characters are stripped; empty entries count as absent.
    pub fn from_user_paths(totals: &str, chart: &str) -> Self {
        Self {
            totals: clean_path(totals),
            chart: clean_path(chart),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_none() && self.chart.is_none()
    }
}

fn clean_path(raw: &str) -> Option<PathBuf> {
    let cleaned = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    (!cleaned.is_empty()).then(|| PathBuf::from(cleaned))
}

/// An audit and the recommendations derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub recommendations: Vec<Recommendation>,
}

/// Load whichever exports are given and run the audit.
///
/// A path that is given but does not exist is an error; an absent path
/// skips the analyses that need it. At least one path is required.
pub async fn run_audit(inputs: &AuditInputs) -> Result<AuditOutcome, PipelineError> {
    if inputs.is_empty() {
        return Err(PipelineError::MissingInput(
            "Provide a totals export, a chart data export, or both".to_string(),
        ));
    }

    let totals = match &inputs.totals {
        Some(path) => {
            let rows = parse_totals(&read_export(path).await?)?;
            tracing::info!(days = rows.len(), path = %path.display(), "Loaded totals export");
            Some(rows)
        }
        None => {
            tracing::warn!("No totals export provided");
            None
        }
    };

    let chart = match &inputs.chart {
        Some(path) => {
            let rows = parse_chart_data(&read_export(path).await?)?;
            tracing::info!(rows = rows.len(), path = %path.display(), "Loaded chart data export");
            Some(rows)
        }
        None => {
            tracing::warn!("No chart data export provided");
            None
        }
    };

    let report = build_audit_report(totals.as_deref(), chart.as_deref());
    let recommendations = synthesize(&report);
    tracing::info!(
        videos = report.videos.len(),
        recommendations = recommendations.len(),
        "Audit complete"
    );

    Ok(AuditOutcome {
        report,
        recommendations,
    })
}

async fn read_export(path: &Path) -> Result<String, PipelineError> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        PipelineError::MissingInput(format!("cannot read {}: {e}", path.display()))
    })
}

/// Find analytics exports in `dir`: `.csv` files whose names contain
/// `totals` or `chart` (case-insensitive). A name containing both is a
/// totals export. When several match, the alphabetically first is used.
pub async fn discover_exports(dir: &Path) -> Result<AuditInputs, PipelineError> {
    let mut csv_files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && entry.file_type().await?.is_file() {
            csv_files.push(path);
        }
    }
    csv_files.sort();

    let names_contain = |path: &Path, marker: &str| {
        path.file_name()
            .map(|n| n.to_string_lossy().to_lowercase().contains(marker))
            .unwrap_or(false)
    };

    // A file naming both kinds counts as a totals export only.
    let inputs = AuditInputs {
        totals: csv_files
            .iter()
            .find(|p| names_contain(p.as_path(), TOTALS_MARKER))
            .cloned(),
        chart: csv_files
            .iter()
            .find(|p| {
                names_contain(p.as_path(), CHART_MARKER)
                    && !names_contain(p.as_path(), TOTALS_MARKER)
            })
            .cloned(),
    };
    tracing::info!(
        dir = %dir.display(),
        csv_files = csv_files.len(),
        totals = ?inputs.totals,
        chart = ?inputs.chart,
        "Scanned for analytics exports"
    );
    Ok(inputs)
}
