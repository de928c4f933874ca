//! Per-video records for the channel analyzer.
//!
//! [`RawVideo`] mirrors the subset of an extractor entry we read;
//! [`VideoRecord`] is the raw data plus every derived display field,
//! computed once in [`VideoRecord::from_raw`].

use serde::{Deserialize, Serialize};

use crate::format::{format_count, format_duration, format_rate, format_upload_date, round2};
use crate::types::VideoId;

/// Fallback title for entries the extractor returned without one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Column order of the detailed CSV export. Matches the field order of
/// [`VideoRecord`].
pub const VIDEO_CSV_COLUMNS: &[&str] = &[
    "index",
    "title",
    "url",
    "video_id",
    "description",
    "upload_date",
    "uploader",
    "duration",
    "view_count",
    "like_count",
    "comment_count",
    "tags",
    "categories",
    "thumbnail",
    "duration_formatted",
    "upload_date_formatted",
    "view_count_formatted",
    "like_count_formatted",
    "comment_count_formatted",
    "engagement_rate",
    "like_rate",
    "comment_rate",
];

/// Separator used when a list field is flattened into one CSV cell.
pub const LIST_SEPARATOR: &str = ";";

// ---------------------------------------------------------------------------
// Raw entry
// ---------------------------------------------------------------------------

/// One channel entry as produced by the extractor. Any field may be absent
/// or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVideo {
    pub title: Option<String>,
    pub webpage_url: Option<String>,
    pub url: Option<String>,
    pub id: Option<String>,
    pub description: Option<String>,
    pub upload_date: Option<String>,
    pub uploader: Option<String>,
    /// Seconds; some extractors report fractional durations.
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub thumbnail: Option<String>,
}

// ---------------------------------------------------------------------------
// Derived record
// ---------------------------------------------------------------------------

/// A video with its derived fields.
///
/// Derived fields are pure functions of the raw fields and are never
/// updated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRecord {
    /// 1-based position in the channel listing.
    pub index: usize,
    pub title: String,
    pub url: String,
    pub video_id: VideoId,
    pub description: String,
    /// Raw `YYYYMMDD` text as reported by the extractor (may be empty).
    pub upload_date: String,
    pub uploader: String,
    pub duration: Option<u64>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub thumbnail: String,

    pub duration_formatted: String,
    pub upload_date_formatted: String,
    pub view_count_formatted: String,
    pub like_count_formatted: String,
    pub comment_count_formatted: String,
    /// `(likes + comments) / views * 100`, rounded to 2 places; 0 with no views.
    pub engagement_rate: f64,
    pub like_rate: f64,
    pub comment_rate: f64,
}

impl VideoRecord {
    /// Build a record from an extractor entry, computing every derived field.
    pub fn from_raw(index: usize, raw: RawVideo) -> Self {
        let view_count = raw.view_count.unwrap_or(0);
        let like_count = raw.like_count.unwrap_or(0);
        let comment_count = raw.comment_count.unwrap_or(0);
        let duration = raw
            .duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d.trunc() as u64);
        let upload_date = raw.upload_date.unwrap_or_default();

        let url = raw
            .webpage_url
            .filter(|u| !u.is_empty())
            .or(raw.url)
            .unwrap_or_default();

        Self {
            index,
            title: raw.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            url,
            video_id: raw.id.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            uploader: raw.uploader.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
            categories: raw.categories.unwrap_or_default(),
            thumbnail: raw.thumbnail.unwrap_or_default(),

            duration_formatted: format_duration(duration),
            upload_date_formatted: format_upload_date(&upload_date),
            view_count_formatted: format_count(view_count),
            like_count_formatted: format_count(like_count),
            comment_count_formatted: format_count(comment_count),
            engagement_rate: percentage(like_count + comment_count, view_count),
            like_rate: percentage(like_count, view_count),
            comment_rate: percentage(comment_count, view_count),

            upload_date,
            duration,
            view_count,
            like_count,
            comment_count,
        }
    }

    /// Duration in seconds, treating an absent duration as zero.
    pub fn duration_secs(&self) -> u64 {
        self.duration.unwrap_or(0)
    }

    /// Cell values in [`VIDEO_CSV_COLUMNS`] order.
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.title.clone(),
            self.url.clone(),
            self.video_id.clone(),
            self.description.clone(),
            self.upload_date.clone(),
            self.uploader.clone(),
            self.duration.map(|d| d.to_string()).unwrap_or_default(),
            self.view_count.to_string(),
            self.like_count.to_string(),
            self.comment_count.to_string(),
            self.tags.join(LIST_SEPARATOR),
            self.categories.join(LIST_SEPARATOR),
            self.thumbnail.clone(),
            self.duration_formatted.clone(),
            self.upload_date_formatted.clone(),
            self.view_count_formatted.clone(),
            self.like_count_formatted.clone(),
            self.comment_count_formatted.clone(),
            format_rate(self.engagement_rate),
            format_rate(self.like_rate),
            format_rate(self.comment_rate),
        ]
    }
}

/// `part / whole * 100` rounded to 2 places; 0 when `whole` is 0.
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
