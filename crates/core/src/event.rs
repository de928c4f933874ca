//! Structured events emitted while a channel analysis runs.
//!
//! Consumers (the CLI printer, the SSE endpoint) receive these instead of
//! parsing console text. The JSON shape is the wire format of the SSE
//! stream.

use serde::Serialize;

use crate::format::format_count;
use crate::metrics::ChannelSummary;

/// A progress event is emitted every this many processed entries.
pub const PROGRESS_INTERVAL: usize = 20;

/// Headline figures sent with a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub video_count: usize,
    /// Human-readable total, e.g. `1.2M`.
    pub total_views: String,
}

impl From<&ChannelSummary> for CompletionStats {
    fn from(summary: &ChannelSummary) -> Self {
        Self {
            video_count: summary.video_count,
            total_views: format_count(summary.total_views),
        }
    }
}

/// One step of a channel analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Free-form status line.
    Log { message: String },

    /// Extraction progress (0-100).
    Progress { percent: u8 },

    /// The run finished and every document was written.
    #[serde(rename_all = "camelCase")]
    Complete {
        output_path: String,
        stats: CompletionStats,
    },

    /// The run stopped; nothing further follows.
    Error { message: String },
}

impl PipelineEvent {
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::Error { .. })
    }
}

/// Progress percentage to report after `processed` of `total` entries, if
/// this step is a reporting step.
///
/// Reporting steps are every [`PROGRESS_INTERVAL`] entries and the final
/// entry. The percentage is rounded and capped at 100.
pub fn progress_step(processed: usize, total: usize) -> Option<u8> {
    if total == 0 || processed == 0 {
        return None;
    }
    if processed % PROGRESS_INTERVAL != 0 && processed != total {
        return None;
    }
    let percent = (processed as f64 / total as f64 * 100.0).round().min(100.0);
    Some(percent as u8)
}
