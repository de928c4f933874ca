//! Machine-readable exports: the per-video CSV and the URL list.

use std::fmt::Write;

use super::ReportContext;
use crate::csv::build_csv;
use crate::video::{VideoRecord, VIDEO_CSV_COLUMNS};

/// Every record with every field, one row per video in listing order.
pub fn video_csv(records: &[VideoRecord]) -> String {
    build_csv(VIDEO_CSV_COLUMNS, records.iter().map(VideoRecord::csv_row))
}

/// Three `#` header lines, a blank line, then one URL per record.
pub fn url_list(ctx: &ReportContext, records: &[VideoRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {} - Video URLs for NotebookLM Analysis",
        ctx.channel_name
    );
    let _ = writeln!(out, "# Total videos: {}", records.len());
    let _ = writeln!(out, "# Generated: {}", ctx.generated_label());
    out.push('\n');
    for record in records {
        let _ = writeln!(out, "{}", record.url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv;
    use crate::report::test_helpers::{context, sample_records, video};

    #[test]
    fn csv_has_one_row_per_video() {
        let csv = video_csv(&sample_records());
        let table = parse_csv(&csv).unwrap();
        assert_eq!(table.headers.len(), VIDEO_CSV_COLUMNS.len());
        assert_eq!(table.rows.len(), 3);

        let tags = table.column("tags").unwrap();
        assert_eq!(table.rows[0].1[tags], "rust;ownership");
        let rate = table.column("engagement_rate").unwrap();
        assert_eq!(table.rows[0].1[rate], "10.0");
    }

    #[test]
    fn csv_quotes_titles_with_commas() {
        let csv = video_csv(&[video(1, "Hello, world", 1, 0, &[])]);
        assert!(csv.contains(",\"Hello, world\","));
    }

    #[test]
    fn url_list_layout() {
        let list = url_list(&context(), &sample_records());
        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines[0], "# rustacean - Video URLs for NotebookLM Analysis");
        assert_eq!(lines[1], "# Total videos: 3");
        assert_eq!(lines[2], "# Generated: 2024-05-01 12:30:00");
        assert_eq!(lines[3], "");
        assert_eq!(&lines[4..], &[
            "https://www.youtube.com/watch?v=v1",
            "https://www.youtube.com/watch?v=v2",
            "https://www.youtube.com/watch?v=v3",
        ]);
    }
}
