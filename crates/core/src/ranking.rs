//! Stable descending rankings and top/bottom windows.
//!
//! Every ranking uses a stable sort: records with equal keys keep their
//! input order, so fixtures rank reproducibly.

use serde::{Deserialize, Serialize};

use crate::metrics::{mean, median};
use crate::video::VideoRecord;

/// Numeric key a video collection can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Views,
    Engagement,
    Likes,
    Comments,
    Duration,
}

impl SortKey {
    /// All keys, in report order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Views,
        SortKey::Engagement,
        SortKey::Likes,
        SortKey::Comments,
        SortKey::Duration,
    ];

    /// Extract this key's value from a record.
    pub fn value(self, record: &VideoRecord) -> f64 {
        match self {
            Self::Views => record.view_count as f64,
            Self::Engagement => record.engagement_rate,
            Self::Likes => record.like_count as f64,
            Self::Comments => record.comment_count as f64,
            Self::Duration => record.duration_secs() as f64,
        }
    }

    /// Human-readable label for report headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Views => "Views",
            Self::Engagement => "Engagement Rate",
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Duration => "Duration",
        }
    }
}

/// Sort `items` in place by descending `key`, keeping the input order of
/// equal keys.
pub fn sort_desc_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

/// Records in descending `key` order.
pub fn rank_by(records: &[VideoRecord], key: SortKey) -> Vec<&VideoRecord> {
    let mut ranked: Vec<&VideoRecord> = records.iter().collect();
    sort_desc_by(&mut ranked, |r| key.value(r));
    ranked
}

/// The first `n` ranked items, or all of them when `n` exceeds the length.
pub fn top_n<T>(ranked: &[T], n: usize) -> &[T] {
    &ranked[..n.min(ranked.len())]
}

/// The last `n` ranked items, or all of them when `n` exceeds the length.
pub fn bottom_n<T>(ranked: &[T], n: usize) -> &[T] {
    &ranked[ranked.len().saturating_sub(n)..]
}

/// The first `floor(len * fraction)` ranked items.
pub fn top_fraction<T>(ranked: &[T], fraction: f64) -> &[T] {
    let n = (ranked.len() as f64 * fraction).floor() as usize;
    top_n(ranked, n)
}

/// Records whose `key` is strictly above the collection mean, in input order.
pub fn high_performers(records: &[VideoRecord], key: SortKey) -> Vec<&VideoRecord> {
    let threshold = mean(records.iter().map(|r| key.value(r)));
    records
        .iter()
        .filter(|r| key.value(r) > threshold)
        .collect()
}

/// Records whose `key` is strictly below the collection median, in input order.
pub fn below_median(records: &[VideoRecord], key: SortKey) -> Vec<&VideoRecord> {
    let threshold = median(records.iter().map(|r| key.value(r)));
    records
        .iter()
        .filter(|r| key.value(r) < threshold)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::RawVideo;

    fn record(index: usize, views: u64, likes: u64) -> VideoRecord {
        VideoRecord::from_raw(
            index,
            RawVideo {
                title: Some(format!("Video {index}")),
                view_count: Some(views),
                like_count: Some(likes),
                ..Default::default()
            },
        )
    }

    fn indexes(ranked: &[&VideoRecord]) -> Vec<usize> {
        ranked.iter().map(|r| r.index).collect()
    }

    #[test]
    fn ranks_by_views_descending() {
        let records = vec![record(1, 10, 1), record(2, 100, 10), record(3, 50, 5)];
        let ranked = rank_by(&records, SortKey::Views);
        assert_eq!(indexes(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn ranking_is_stable_for_equal_keys() {
        let records = vec![
            record(1, 100, 10),
            record(2, 50, 5),
            record(3, 10, 1),
        ];
        // All three have a 10% engagement rate.
        let ranked = rank_by(&records, SortKey::Engagement);
        assert_eq!(indexes(&ranked), vec![1, 2, 3]);

        let records = vec![record(1, 5, 0), record(2, 9, 0), record(3, 5, 0), record(4, 9, 0)];
        let ranked = rank_by(&records, SortKey::Views);
        assert_eq!(indexes(&ranked), vec![2, 4, 1, 3]);
    }

    #[test]
    fn windows_clamp_to_length() {
        let items = [5, 4, 3];
        assert_eq!(top_n(&items, 2), &[5, 4]);
        assert_eq!(top_n(&items, 10), &[5, 4, 3]);
        assert_eq!(bottom_n(&items, 2), &[4, 3]);
        assert_eq!(bottom_n(&items, 10), &[5, 4, 3]);
        assert!(top_n::<i32>(&[], 3).is_empty());
    }

    #[test]
    fn top_fraction_floors() {
        let items: Vec<i32> = (0..9).collect();
        assert_eq!(top_fraction(&items, 0.2).len(), 1);
        assert_eq!(top_fraction(&items[..4], 0.2).len(), 0);
    }

    #[test]
    fn high_performers_are_strictly_above_mean() {
        // Mean is 50: the 50-view record is not a high performer.
        let records = vec![record(1, 90, 0), record(2, 50, 0), record(3, 10, 0)];
        let high = high_performers(&records, SortKey::Views);
        assert_eq!(indexes(&high), vec![1]);
    }

    #[test]
    fn below_median_is_strict() {
        let records = vec![record(1, 90, 0), record(2, 50, 0), record(3, 10, 0)];
        let low = below_median(&records, SortKey::Views);
        assert_eq!(indexes(&low), vec![3]);
    }

    #[test]
    fn duration_key_treats_absent_as_zero() {
        let long = VideoRecord::from_raw(
            1,
            RawVideo {
                duration: Some(600.0),
                ..Default::default()
            },
        );
        let records = vec![record(2, 0, 0), long];
        let ranked = rank_by(&records, SortKey::Duration);
        assert_eq!(indexes(&ranked), vec![1, 2]);
    }
}
