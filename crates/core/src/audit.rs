//! Performance audit over YouTube Analytics CSV exports.
//!
//! Two exports are read: a *totals* file (one row per day) and a *chart
//! data* file (one row per video per day). All analyses are read-only
//! views over the parsed rows.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

use crate::csv::{cell, parse_csv};
use crate::error::CoreError;
use crate::metrics::{mean, median};
use crate::ranking::sort_desc_by;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const TOTALS_SOURCE: &str = "totals export";
pub const CHART_SOURCE: &str = "chart data export";

pub const COL_DATE: &str = "Date";
pub const COL_VIEWS: &str = "Views";
pub const COL_TITLE: &str = "Video title";
pub const COL_CONTENT: &str = "Content";
pub const COL_DURATION: &str = "Duration";

/// Date layouts accepted in analytics exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y"];

/// Date-time layouts accepted in analytics exports; only the date is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One day of channel totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub views: u64,
    /// Remaining numeric columns, keyed by header.
    pub other: BTreeMap<String, f64>,
}

/// One video's figures for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub date: NaiveDate,
    pub title: String,
    /// Video id column of the export.
    pub content: String,
    pub duration_secs: u64,
    pub views: u64,
}

/// Parse an analytics date cell.
pub fn parse_analytics_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a count cell. Empty cells count as 0; fractional values are
/// rounded; `,` separators are ignored.
fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Some(0);
    }
    cleaned.parse::<u64>().ok().or_else(|| {
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

fn date_cell(row: &[String], index: usize, line: usize) -> Result<NaiveDate, CoreError> {
    let raw = cell(row, index);
    parse_analytics_date(raw).ok_or_else(|| CoreError::Parse {
        line,
        message: format!("invalid date '{raw}'"),
    })
}

fn count_cell(row: &[String], index: usize, line: usize, column: &str) -> Result<u64, CoreError> {
    let raw = cell(row, index);
    parse_count(raw).ok_or_else(|| CoreError::Parse {
        line,
        message: format!("invalid {column} value '{raw}'"),
    })
}

/// Parse a totals export. Requires `Date` and `Views` columns.
pub fn parse_totals(text: &str) -> Result<Vec<DailyTotal>, CoreError> {
    let table = parse_csv(text)?;
    let date_idx = table.require_column(TOTALS_SOURCE, COL_DATE)?;
    let views_idx = table.require_column(TOTALS_SOURCE, COL_VIEWS)?;

    table
        .rows
        .iter()
        .map(|(line, row)| {
            let other = table
                .headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != date_idx && *i != views_idx)
                .filter_map(|(i, header)| {
                    cell(row, i)
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .map(|v| (header.clone(), v))
                })
                .collect();

            Ok(DailyTotal {
                date: date_cell(row, date_idx, *line)?,
                views: count_cell(row, views_idx, *line, COL_VIEWS)?,
                other,
            })
        })
        .collect()
}

/// Parse a chart data export. Requires `Date`, `Video title`, `Content`,
/// `Duration`, and `Views` columns.
pub fn parse_chart_data(text: &str) -> Result<Vec<ChartRow>, CoreError> {
    let table = parse_csv(text)?;
    let date_idx = table.require_column(CHART_SOURCE, COL_DATE)?;
    let title_idx = table.require_column(CHART_SOURCE, COL_TITLE)?;
    let content_idx = table.require_column(CHART_SOURCE, COL_CONTENT)?;
    let duration_idx = table.require_column(CHART_SOURCE, COL_DURATION)?;
    let views_idx = table.require_column(CHART_SOURCE, COL_VIEWS)?;

    table
        .rows
        .iter()
        .map(|(line, row)| {
            Ok(ChartRow {
                date: date_cell(row, date_idx, *line)?,
                title: cell(row, title_idx).to_string(),
                content: cell(row, content_idx).to_string(),
                duration_secs: count_cell(row, duration_idx, *line, COL_DURATION)?,
                views: count_cell(row, views_idx, *line, COL_VIEWS)?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Overall performance
// ---------------------------------------------------------------------------

/// Channel-wide figures from the totals export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallPerformance {
    pub total_views: u64,
    pub total_days: usize,
    /// Days with at least one view.
    pub days_active: usize,
    pub avg_daily_views: f64,
    pub peak_day_views: u64,
    pub peak_date: NaiveDate,
    /// Second half vs first half of the period, in percent.
    pub growth_rate: f64,
}

/// Growth of the second half of `views` over the first half, in percent.
///
/// The first half is the first `len / 2` entries. A first half with no
/// views yields 0.
pub fn growth_rate(views: &[u64]) -> f64 {
    let split = views.len() / 2;
    let first_half: u64 = views[..split].iter().sum();
    let second_half: u64 = views[split..].iter().sum();
    if first_half == 0 {
        return 0.0;
    }
    (second_half as f64 - first_half as f64) / (first_half.max(1) as f64) * 100.0
}

/// Analyse the totals export; `None` when it has no rows.
pub fn analyze_overall(totals: &[DailyTotal]) -> Option<OverallPerformance> {
    // First row with the maximum view count.
    let peak = totals
        .iter()
        .reduce(|best, t| if t.views > best.views { t } else { best })?;
    let views: Vec<u64> = totals.iter().map(|t| t.views).collect();

    Some(OverallPerformance {
        total_views: views.iter().sum(),
        total_days: totals.len(),
        days_active: views.iter().filter(|v| **v > 0).count(),
        avg_daily_views: mean(views.iter().map(|v| *v as f64)),
        peak_day_views: peak.views,
        peak_date: peak.date,
        growth_rate: growth_rate(&views),
    })
}

// ---------------------------------------------------------------------------
// Per-video statistics
// ---------------------------------------------------------------------------

/// Chart rows of one video, aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoStats {
    pub title: String,
    pub content: String,
    pub duration_secs: u64,
    pub total_views: u64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Inclusive span between first and last date.
    pub days_active: i64,
    pub avg_daily_views: f64,
    pub duration_minutes: f64,
}

impl VideoStats {
    /// Title length in characters.
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }
}

/// Group chart rows by (title, content, duration) and rank the groups by
/// total views, descending. Groups with equal views keep the order in which
/// they first appear in `rows`.
pub fn video_stats(rows: &[ChartRow]) -> Vec<VideoStats> {
    let mut groups: Vec<VideoStats> = Vec::new();
    let mut positions: HashMap<(&str, &str, u64), usize> = HashMap::new();

    for row in rows {
        let key = (row.title.as_str(), row.content.as_str(), row.duration_secs);
        match positions.get(&key) {
            Some(&pos) => {
                let group = &mut groups[pos];
                group.total_views += row.views;
                group.first_date = group.first_date.min(row.date);
                group.last_date = group.last_date.max(row.date);
            }
            None => {
                positions.insert(key, groups.len());
                groups.push(VideoStats {
                    title: row.title.clone(),
                    content: row.content.clone(),
                    duration_secs: row.duration_secs,
                    total_views: row.views,
                    first_date: row.date,
                    last_date: row.date,
                    days_active: 0,
                    avg_daily_views: 0.0,
                    duration_minutes: 0.0,
                });
            }
        }
    }

    for group in &mut groups {
        group.days_active = (group.last_date - group.first_date).num_days() + 1;
        group.avg_daily_views = group.total_views as f64 / group.days_active as f64;
        group.duration_minutes = group.duration_secs as f64 / 60.0;
    }

    sort_desc_by(&mut groups, |g| g.total_views as f64);
    groups
}

/// Videos with total views strictly below the median, in ranked order.
pub fn underperformers(stats: &[VideoStats]) -> Vec<&VideoStats> {
    let threshold = median(stats.iter().map(|s| s.total_views as f64));
    stats
        .iter()
        .filter(|s| (s.total_views as f64) < threshold)
        .collect()
}

// ---------------------------------------------------------------------------
// Success patterns
// ---------------------------------------------------------------------------

/// Title and duration figures of the top video compared with the average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessPatterns {
    pub top_title: String,
    pub top_views: u64,
    pub avg_title_length: f64,
    pub top_title_length: usize,
    pub avg_duration_minutes: f64,
    pub top_duration_minutes: f64,
}

impl SuccessPatterns {
    /// Whether the top video is shorter than the average video.
    pub fn shorter_wins(&self) -> bool {
        self.top_duration_minutes < self.avg_duration_minutes
    }
}

/// Compare the top-ranked video with the averages; `None` without videos.
///
/// `stats` must already be ranked (see [`video_stats`]).
pub fn success_patterns(stats: &[VideoStats]) -> Option<SuccessPatterns> {
    let top = stats.first()?;
    Some(SuccessPatterns {
        top_title: top.title.clone(),
        top_views: top.total_views,
        avg_title_length: mean(stats.iter().map(|s| s.title_length() as f64)),
        top_title_length: top.title_length(),
        avg_duration_minutes: mean(stats.iter().map(|s| s.duration_minutes)),
        top_duration_minutes: top.duration_minutes,
    })
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Summed views for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekdayViews {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub views: u64,
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Views summed per weekday across all chart rows, highest first. Ties keep
/// the order in which weekdays first appear in `rows`.
pub fn weekday_views(rows: &[ChartRow]) -> Vec<WeekdayViews> {
    use chrono::Datelike;

    let mut days: Vec<WeekdayViews> = Vec::new();
    for row in rows {
        let weekday = row.date.weekday();
        match days.iter_mut().find(|d| d.weekday == weekday) {
            Some(day) => day.views += row.views,
            None => days.push(WeekdayViews {
                weekday,
                views: row.views,
            }),
        }
    }
    sort_desc_by(&mut days, |d| d.views as f64);
    days
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything the audit derives from the two exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// `None` when no totals export was provided (or it was empty).
    pub overall: Option<OverallPerformance>,
    /// Ranked per-video statistics; empty without chart data.
    pub videos: Vec<VideoStats>,
    pub patterns: Option<SuccessPatterns>,
    /// Ranked weekdays; empty without chart data.
    pub timing: Vec<WeekdayViews>,
}

/// Run every analysis over whichever exports are available.
pub fn build_audit_report(
    totals: Option<&[DailyTotal]>,
    chart: Option<&[ChartRow]>,
) -> AuditReport {
    let overall = totals.and_then(analyze_overall);
    let videos = chart.map(video_stats).unwrap_or_default();
    let patterns = success_patterns(&videos);
    let timing = chart.map(weekday_views).unwrap_or_default();

    AuditReport {
        overall,
        videos,
        patterns,
        timing,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn chart_row(day: &str, title: &str, duration: u64, views: u64) -> ChartRow {
        ChartRow {
            date: date(day),
            title: title.to_string(),
            content: format!("id-{title}"),
            duration_secs: duration,
            views,
        }
    }

    // -- parsing --

    #[test]
    fn parses_supported_date_layouts() {
        let expected = date("2024-03-05");
        assert_eq!(parse_analytics_date("2024-03-05"), Some(expected));
        assert_eq!(parse_analytics_date("2024/03/05"), Some(expected));
        assert_eq!(parse_analytics_date("03/05/2024"), Some(expected));
        assert_eq!(parse_analytics_date("Mar 5, 2024"), Some(expected));
        assert_eq!(parse_analytics_date("2024-03-05 10:30:00"), Some(expected));
        assert_eq!(parse_analytics_date("Total"), None);
    }

    #[test]
    fn parses_totals_export() {
        let text = "Date,Views,Watch time (hours)\n2024-01-01,10,0.5\n2024-01-02,,\n";
        let totals = parse_totals(text).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].views, 10);
        assert_eq!(totals[0].other.get("Watch time (hours)"), Some(&0.5));
        assert_eq!(totals[1].views, 0);
        assert!(totals[1].other.is_empty());
    }

    #[test]
    fn totals_missing_views_column() {
        assert_matches!(
            parse_totals("Date,Impressions\n2024-01-01,5\n"),
            Err(CoreError::MissingColumn { column: "Views", .. })
        );
    }

    #[test]
    fn totals_bad_date_reports_line() {
        assert_matches!(
            parse_totals("Date,Views\n2024-01-01,1\nyesterday,2\n"),
            Err(CoreError::Parse { line: 3, .. })
        );
    }

    #[test]
    fn parses_chart_export() {
        let text = "Date,Content,Video title,Video publish time,Duration,Views\n\
                    2024-01-01,abc,\"Hello, world\",Jan 1 2024,125,\"1,024\"\n";
        let rows = parse_chart_data(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Hello, world");
        assert_eq!(rows[0].content, "abc");
        assert_eq!(rows[0].duration_secs, 125);
        assert_eq!(rows[0].views, 1024);
    }

    // -- overall --

    #[test]
    fn growth_rate_halves() {
        // First five days sum to 100, last five to 50.
        let views = [20, 20, 20, 20, 20, 10, 10, 10, 10, 10];
        assert_eq!(growth_rate(&views), -50.0);
    }

    #[test]
    fn growth_rate_with_empty_first_half_is_zero() {
        assert_eq!(growth_rate(&[0, 0, 5, 5]), 0.0);
        assert_eq!(growth_rate(&[7]), 0.0);
        assert_eq!(growth_rate(&[]), 0.0);
    }

    #[test]
    fn overall_performance_figures() {
        let totals: Vec<DailyTotal> = [(1, 0), (2, 30), (3, 30), (4, 10)]
            .iter()
            .map(|(d, v)| DailyTotal {
                date: NaiveDate::from_ymd_opt(2024, 1, *d).unwrap(),
                views: *v,
                other: BTreeMap::new(),
            })
            .collect();
        let overall = analyze_overall(&totals).unwrap();
        assert_eq!(overall.total_views, 70);
        assert_eq!(overall.total_days, 4);
        assert_eq!(overall.days_active, 3);
        assert_eq!(overall.avg_daily_views, 17.5);
        assert_eq!(overall.peak_day_views, 30);
        assert_eq!(overall.peak_date, date("2024-01-02"));
        assert!((overall.growth_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn overall_of_nothing_is_none() {
        assert_eq!(analyze_overall(&[]), None);
    }

    // -- per-video --

    #[test]
    fn groups_and_ranks_videos() {
        let rows = vec![
            chart_row("2024-01-01", "A", 60, 3),
            chart_row("2024-01-01", "B", 120, 10),
            chart_row("2024-01-03", "A", 60, 4),
            chart_row("2024-01-02", "C", 30, 7),
        ];
        let stats = video_stats(&rows);
        let titles: Vec<&str> = stats.iter().map(|s| s.title.as_str()).collect();
        // A and C tie on 7 views; A appears first.
        assert_eq!(titles, vec!["B", "A", "C"]);

        let a = &stats[1];
        assert_eq!(a.total_views, 7);
        assert_eq!(a.days_active, 3);
        assert!((a.avg_daily_views - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(a.duration_minutes, 1.0);
    }

    #[test]
    fn underperformers_below_median() {
        let rows = vec![
            chart_row("2024-01-01", "A", 60, 100),
            chart_row("2024-01-01", "B", 60, 50),
            chart_row("2024-01-01", "C", 60, 1),
        ];
        let stats = video_stats(&rows);
        let low: Vec<&str> = underperformers(&stats)
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(low, vec!["C"]);
    }

    #[test]
    fn patterns_use_top_video() {
        let rows = vec![
            chart_row("2024-01-01", "Short", 60, 100),
            chart_row("2024-01-01", "A much longer title", 600, 5),
        ];
        let stats = video_stats(&rows);
        let patterns = success_patterns(&stats).unwrap();
        assert_eq!(patterns.top_title, "Short");
        assert_eq!(patterns.top_title_length, 5);
        assert_eq!(patterns.avg_title_length, 12.0);
        assert_eq!(patterns.top_duration_minutes, 1.0);
        assert_eq!(patterns.avg_duration_minutes, 5.5);
        assert!(patterns.shorter_wins());
    }

    // -- timing --

    #[test]
    fn weekday_with_most_views_first() {
        // 2024-01-01 is a Monday, 2024-01-06 a Saturday.
        let rows = vec![
            chart_row("2024-01-01", "A", 60, 5),
            chart_row("2024-01-06", "A", 60, 8),
            chart_row("2024-01-08", "B", 60, 4),
        ];
        let days = weekday_views(&rows);
        assert_eq!(days[0].weekday, Weekday::Mon);
        assert_eq!(days[0].views, 9);
        assert_eq!(weekday_name(days[1].weekday), "Saturday");
    }

    #[test]
    fn report_without_exports_is_empty() {
        let report = build_audit_report(None, None);
        assert!(report.overall.is_none());
        assert!(report.videos.is_empty());
        assert!(report.patterns.is_none());
        assert!(report.timing.is_empty());
    }
}
