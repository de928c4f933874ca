//! A complete channel analysis: extract, derive, render, write.

use std::path::{Path, PathBuf};

use tubelens_core::channel::{extract_channel_name, normalize_channel_url};
use tubelens_core::event::{progress_step, CompletionStats, PipelineEvent};
use tubelens_core::metrics::summarize;
use tubelens_core::report::{render_channel_documents, ReportContext};
use tubelens_core::types::Timestamp;
use tubelens_core::video::{RawVideo, VideoRecord};

use crate::error::PipelineError;
use crate::events::EventSink;
use crate::extractor::{ChannelListing, VideoSource};

/// Identity and destination of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRun {
    /// Normalised channel URL passed to the extractor.
    pub channel_url: String,
    /// Filesystem-safe channel name.
    pub channel_name: String,
    /// `<output_root>/<channel_name>/<YYYYMMDD_HHMMSS>`.
    pub output_dir: PathBuf,
    pub started_at: Timestamp,
}

impl ChannelRun {
    /// Prepare a run for the channel at `input`. Blank input is rejected.
    pub fn new(input: &str, output_root: &Path, started_at: Timestamp) -> Result<Self, PipelineError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PipelineError::MissingInput(
                "No channel URL provided".to_string(),
            ));
        }

        let channel_url = normalize_channel_url(input);
        let channel_name = extract_channel_name(&channel_url);
        let output_dir = output_root
            .join(&channel_name)
            .join(started_at.format("%Y%m%d_%H%M%S").to_string());

        Ok(Self {
            channel_url,
            channel_name,
            output_dir,
            started_at,
        })
    }

    fn report_context(&self) -> ReportContext {
        ReportContext {
            channel_name: self.channel_name.clone(),
            channel_url: self.channel_url.clone(),
            generated_at: self.started_at,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub output_dir: PathBuf,
    pub stats: CompletionStats,
    /// Paths of every written file, in write order.
    pub files: Vec<PathBuf>,
}

/// Decode listing entries into records, skipping `null` and malformed
/// entries. Indexes are 1-based listing positions, so skipped entries leave
/// gaps.
pub fn decode_entries(listing: ChannelListing, events: &EventSink) -> Vec<VideoRecord> {
    let total = listing.available();
    let mut processed = 0;
    let mut records = Vec::with_capacity(total);

    for (i, entry) in listing.entries.into_iter().enumerate() {
        let index = i + 1;
        if entry.is_null() {
            tracing::warn!(index, "Skipping unavailable video");
            continue;
        }

        processed += 1;
        match serde_json::from_value::<RawVideo>(entry) {
            Ok(raw) => records.push(VideoRecord::from_raw(index, raw)),
            Err(e) => tracing::warn!(index, error = %e, "Skipping video with unreadable metadata"),
        }

        if let Some(percent) = progress_step(processed, total) {
            events.emit(PipelineEvent::Progress { percent });
        }
    }

    records
}

/// Run a full channel analysis and emit its events, ending with exactly one
/// `Complete` or `Error` event.
pub async fn run_channel_analysis(
    source: &dyn VideoSource,
    run: &ChannelRun,
    events: &EventSink,
) -> Result<RunOutcome, PipelineError> {
    match execute(source, run, events).await {
        Ok(outcome) => {
            events.emit(PipelineEvent::Complete {
                output_path: outcome.output_dir.display().to_string(),
                stats: outcome.stats.clone(),
            });
            Ok(outcome)
        }
        Err(e) => {
            events.emit(PipelineEvent::error(e.to_string()));
            Err(e)
        }
    }
}

async fn execute(
    source: &dyn VideoSource,
    run: &ChannelRun,
    events: &EventSink,
) -> Result<RunOutcome, PipelineError> {
    events.log(format!(
        "Extracting video metadata for {} from {}",
        run.channel_name, run.channel_url
    ));

    let listing = source.fetch_listing(&run.channel_url).await?;
    events.log(format!("Found {} videos", listing.available()));

    let records = decode_entries(listing, events);
    if records.is_empty() {
        return Err(PipelineError::NoVideos(run.channel_url.clone()));
    }
    events.log(format!("Extracted metadata for {} videos", records.len()));

    let summary = summarize(&records)?;
    let docs = render_channel_documents(&run.report_context(), &records)?;

    events.log("Writing reports".to_string());
    tokio::fs::create_dir_all(&run.output_dir).await?;
    let mut files = Vec::with_capacity(docs.len());
    for doc in docs {
        let path = run.output_dir.join(&doc.relative_path);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, doc.contents).await?;
        tracing::debug!(path = %path.display(), "Wrote document");
        files.push(path);
    }

    events.log(format!(
        "All files saved to: {}",
        run.output_dir.display()
    ));

    Ok(RunOutcome {
        output_dir: run.output_dir.clone(),
        stats: CompletionStats::from(&summary),
        files,
    })
}
