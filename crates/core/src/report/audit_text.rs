//! Plain-text audit report and 30-day action plan.

use std::fmt::Write;

use crate::audit::{underperformers, weekday_name, AuditReport};
use crate::recommendation::{action_plan, Priority, Recommendation};

const RULE: &str =
    "================================================================================";
const TOP_VIDEOS: usize = 5;
const MAX_UNDERPERFORMERS: usize = 3;
const TOP_DAYS: usize = 3;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len().max(20)));
}

/// Render the audit findings. Sections without input data say so instead
/// of being omitted.
pub fn audit_report(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\nYOUTUBE PERFORMANCE AUDIT\n{RULE}\n");

    section(&mut out, "OVERALL PERFORMANCE");
    match &report.overall {
        Some(o) => {
            let _ = writeln!(out, "  Total Views: {}", o.total_views);
            let _ = writeln!(
                out,
                "  Days with Activity: {} / {}",
                o.days_active, o.total_days
            );
            let _ = writeln!(out, "  Average Daily Views: {:.1}", o.avg_daily_views);
            let _ = writeln!(
                out,
                "  Peak Day: {} ({} views)",
                o.peak_date.format("%Y-%m-%d"),
                o.peak_day_views
            );
            let _ = writeln!(
                out,
                "  Growth Trend: {:+.1}% (first half vs second half)",
                o.growth_rate
            );
        }
        None => {
            let _ = writeln!(out, "  No totals data available");
        }
    }
    out.push('\n');

    section(&mut out, "TOP PERFORMING VIDEOS");
    if report.videos.is_empty() {
        let _ = writeln!(out, "  No video data available");
    }
    for (i, v) in report.videos.iter().take(TOP_VIDEOS).enumerate() {
        let _ = writeln!(out, "  #{}. {}", i + 1, v.title);
        let _ = writeln!(out, "      Total Views: {}", v.total_views);
        let _ = writeln!(out, "      Avg Daily Views: {:.1}", v.avg_daily_views);
        let _ = writeln!(out, "      Duration: {:.1} minutes", v.duration_minutes);
        let _ = writeln!(out, "      Active: {} days", v.days_active);
    }
    out.push('\n');

    let low = underperformers(&report.videos);
    if !low.is_empty() {
        section(&mut out, "UNDERPERFORMING VIDEOS");
        for v in low.iter().take(MAX_UNDERPERFORMERS) {
            let _ = writeln!(out, "  - {}", v.title);
            let _ = writeln!(out, "      Total Views: {} (below median)", v.total_views);
        }
        out.push('\n');
    }

    if let Some(p) = &report.patterns {
        section(&mut out, "SUCCESS PATTERNS");
        let _ = writeln!(out, "  Best Performing Title: \"{}\"", p.top_title);
        let _ = writeln!(out, "      {} total views", p.top_views);
        let _ = writeln!(
            out,
            "  Average Title Length: {:.0} characters",
            p.avg_title_length
        );
        let _ = writeln!(
            out,
            "  Top Performer Length: {} characters",
            p.top_title_length
        );
        let _ = writeln!(
            out,
            "  Average Video Duration: {:.1} minutes",
            p.avg_duration_minutes
        );
        let _ = writeln!(
            out,
            "  Top Performer Duration: {:.1} minutes",
            p.top_duration_minutes
        );
        let comparison = if p.shorter_wins() {
            "Shorter"
        } else {
            "Longer"
        };
        let _ = writeln!(
            out,
            "  Insight: {comparison} videos ({:.1}m) are outperforming the average",
            p.top_duration_minutes
        );
        out.push('\n');
    }

    if !report.timing.is_empty() {
        section(&mut out, "BEST DAYS FOR VIEWS");
        for day in report.timing.iter().take(TOP_DAYS) {
            let _ = writeln!(out, "  - {}: {} views", weekday_name(day.weekday), day.views);
        }
        out.push('\n');
    }

    out
}

fn plan_heading(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "WEEK 1 - IMMEDIATE ACTIONS (CRITICAL PRIORITY)",
        Priority::High => "WEEK 2-3 - HIGH PRIORITY OPTIMIZATIONS",
        Priority::Medium => "WEEK 4 - FINE-TUNING (MEDIUM PRIORITY)",
    }
}

/// Render recommendations as a week-by-week plan, most urgent first.
pub fn action_plan_text(recommendations: &[Recommendation]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{RULE}\nYOUR 30-DAY OPTIMIZATION ACTION PLAN\n{RULE}\n");

    if recommendations.is_empty() {
        let _ = writeln!(out, "  No recommendations generated");
        return out;
    }

    let plan = action_plan(recommendations);
    for priority in Priority::ALL {
        let _ = writeln!(out, "{}:\n", plan_heading(priority));
        let group = plan.iter().filter(|r| r.priority == priority);
        for (i, rec) in group.enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, rec.action);
            let _ = writeln!(out, "     Why: {}\n", rec.rationale);
        }
    }
    let _ = writeln!(out, "{RULE}\nNEXT STEP: Run this audit weekly to track improvement.\n{RULE}");
    out
}
