//! Text documents rendered from analysis results.
//!
//! Renderers are pure: they take the records and aggregates by reference,
//! never mutate them, and never fail. The generation timestamp comes from
//! [`ReportContext`] so output is reproducible.

pub mod audit_text;
pub mod channel;
pub mod export;
pub mod prompts;

use crate::error::CoreError;
use crate::metrics::summarize;
use crate::types::Timestamp;
use crate::video::VideoRecord;

// ---------------------------------------------------------------------------
// File names
// ---------------------------------------------------------------------------

pub const MASTER_SUMMARY_FILE: &str = "00_MASTER_SUMMARY.md";
pub const STATISTICS_FILE: &str = "01_channel_statistics.md";
pub const SUCCESS_METRICS_FILE: &str = "02_success_metrics.md";
pub const CONTENT_THEMES_FILE: &str = "03_content_themes.md";
pub const RANKINGS_FILE: &str = "04_performance_rankings.md";
pub const VIDEO_CSV_FILE: &str = "detailed_video_data.csv";
pub const URL_LIST_FILE: &str = "video_urls_for_notebooklm.txt";
pub const PROMPTS_DIR: &str = "notebooklm_prompts";

/// Placeholder shown when a channel has no tags at all.
pub const NO_TAGS: &str = "(no tags)";

/// Category shown when the top video has none.
pub const DEFAULT_CATEGORY: &str = "General";

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Identity of the run a document belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub channel_name: String,
    pub channel_url: String,
    pub generated_at: Timestamp,
}

impl ReportContext {
    /// `YYYY-MM-DD HH:MM:SS` form of the generation time.
    pub fn generated_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// A rendered document and its path relative to the run's output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// `/`-separated relative path, e.g. `notebooklm_prompts/x_prompt.md`.
    pub relative_path: String,
    pub contents: String,
}

impl RenderedDocument {
    fn new(relative_path: impl Into<String>, contents: String) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents,
        }
    }
}

/// Render every channel document in write order: the four analysis
/// reports, the CSV export, the URL list, the prompts, and finally the
/// master summary.
///
/// Fails only when `records` is empty.
pub fn render_channel_documents(
    ctx: &ReportContext,
    records: &[VideoRecord],
) -> Result<Vec<RenderedDocument>, CoreError> {
    let summary = summarize(records)?;

    let mut docs = vec![
        RenderedDocument::new(
            STATISTICS_FILE,
            channel::channel_statistics(ctx, records, &summary),
        ),
        RenderedDocument::new(SUCCESS_METRICS_FILE, channel::success_metrics(ctx, records)),
        RenderedDocument::new(CONTENT_THEMES_FILE, channel::content_themes(ctx, records)),
        RenderedDocument::new(RANKINGS_FILE, channel::performance_rankings(ctx, records)),
        RenderedDocument::new(VIDEO_CSV_FILE, export::video_csv(records)),
        RenderedDocument::new(URL_LIST_FILE, export::url_list(ctx, records)),
    ];

    for kind in prompts::PromptKind::ALL {
        docs.push(RenderedDocument::new(
            format!("{PROMPTS_DIR}/{}", kind.file_name()),
            prompts::prompt_document(ctx, kind, records, &summary),
        ));
    }

    docs.push(RenderedDocument::new(
        MASTER_SUMMARY_FILE,
        channel::master_summary(ctx, records, &summary),
    ));

    Ok(docs)
}

/// Escape a value for use inside a Markdown table cell.
pub(crate) fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Join labels with `, `, or return `fallback` when there are none.
pub(crate) fn join_or(labels: &[&str], fallback: &str) -> String {
    if labels.is_empty() {
        fallback.to_string()
    } else {
        labels.join(", ")
    }
}

/// Shared fixtures for renderer tests.
#[cfg(test)]
pub(crate) mod test_helpers {
    use chrono::TimeZone;

    use super::ReportContext;
    use crate::video::{RawVideo, VideoRecord};

    pub fn context() -> ReportContext {
        ReportContext {
            channel_name: "rustacean".to_string(),
            channel_url: "https://www.youtube.com/@rustacean/videos".to_string(),
            generated_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        }
    }

    pub fn video(index: usize, title: &str, views: u64, likes: u64, tags: &[&str]) -> VideoRecord {
        VideoRecord::from_raw(
            index,
            RawVideo {
                title: Some(title.to_string()),
                webpage_url: Some(format!("https://www.youtube.com/watch?v=v{index}")),
                id: Some(format!("v{index}")),
                upload_date: Some("20240115".to_string()),
                duration: Some(300.0 * index as f64),
                view_count: Some(views),
                like_count: Some(likes),
                comment_count: Some(0),
                tags: Some(tags.iter().map(|t| t.to_string()).collect()),
                categories: Some(vec!["Education".to_string()]),
                ..Default::default()
            },
        )
    }

    /// Three videos: 100/10, 50/5, 10/1 views/likes.
    pub fn sample_records() -> Vec<VideoRecord> {
        vec![
            video(1, "Ownership explained simply", 100, 10, &["rust", "ownership"]),
            video(2, "Async runtimes compared", 50, 5, &["rust", "async"]),
            video(3, "Macros | a tour", 10, 1, &["macros"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::test_helpers::{context, sample_records};
    use super::*;

    #[test]
    fn renders_every_document() {
        let docs = render_channel_documents(&context(), &sample_records()).unwrap();
        let paths: Vec<&str> = docs.iter().map(|d| d.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                STATISTICS_FILE,
                SUCCESS_METRICS_FILE,
                CONTENT_THEMES_FILE,
                RANKINGS_FILE,
                VIDEO_CSV_FILE,
                URL_LIST_FILE,
                "notebooklm_prompts/success_analysis_prompt.md",
                "notebooklm_prompts/content_strategy_prompt.md",
                "notebooklm_prompts/monetization_analysis_prompt.md",
                "notebooklm_prompts/competitor_analysis_prompt.md",
                "notebooklm_prompts/viral_content_analysis_prompt.md",
                MASTER_SUMMARY_FILE,
            ]
        );
    }

    #[test]
    fn empty_channel_is_rejected() {
        assert_matches!(
            render_channel_documents(&context(), &[]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_channel_documents(&context(), &sample_records()).unwrap();
        let b = render_channel_documents(&context(), &sample_records()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn table_cells_escape_pipes_and_newlines() {
        assert_eq!(table_cell("a | b\nc"), "a \\| b c");
    }
}
