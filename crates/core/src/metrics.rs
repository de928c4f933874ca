//! Collection-level aggregates over derived video records.

use serde::Serialize;

use crate::error::CoreError;
use crate::video::VideoRecord;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean; 0 for an empty input.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Median; the mean of the two middle values for even-length input and
/// 0 for an empty input.
pub fn median<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().collect();
    if sorted.is_empty() {
        return 0.0;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

// ---------------------------------------------------------------------------
// Channel summary
// ---------------------------------------------------------------------------

/// Aggregate figures for a whole channel listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSummary {
    pub video_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_duration_secs: u64,
    pub avg_views: f64,
    pub median_views: f64,
    pub avg_engagement: f64,
    pub avg_duration_secs: f64,
}

/// Summarise a non-empty record collection.
///
/// Totals are exact integer sums; only the means are floating point.
pub fn summarize(records: &[VideoRecord]) -> Result<ChannelSummary, CoreError> {
    if records.is_empty() {
        return Err(CoreError::Validation(
            "Cannot summarise an empty video collection".to_string(),
        ));
    }

    let video_count = records.len();
    let total_views: u64 = records.iter().map(|r| r.view_count).sum();
    let total_likes: u64 = records.iter().map(|r| r.like_count).sum();
    let total_comments: u64 = records.iter().map(|r| r.comment_count).sum();
    let total_duration_secs: u64 = records.iter().map(VideoRecord::duration_secs).sum();

    Ok(ChannelSummary {
        video_count,
        total_views,
        total_likes,
        total_comments,
        total_duration_secs,
        avg_views: total_views as f64 / video_count as f64,
        median_views: median(records.iter().map(|r| r.view_count as f64)),
        avg_engagement: mean(records.iter().map(|r| r.engagement_rate)),
        avg_duration_secs: total_duration_secs as f64 / video_count as f64,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
