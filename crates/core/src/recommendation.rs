//! Prioritised recommendations synthesised from an [`AuditReport`].

use serde::Serialize;

use crate::audit::{weekday_name, AuditReport};
use crate::format::truncate_title;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Videos with fewer total views than this need attention.
pub const LOW_PERFORMER_VIEWS: u64 = 5;

/// Share of days that must have views before activity counts as healthy.
pub const MIN_ACTIVE_DAY_RATIO: f64 = 0.5;

/// Title budget when a recommendation quotes a video.
const QUOTED_TITLE_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// How urgent a recommendation is. Declaration order is urgency order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Priority; 3] = [Priority::Critical, Priority::High, Priority::Medium];

    /// Sort rank; lower is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub rationale: String,
}

impl Recommendation {
    fn new(priority: Priority, action: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            priority,
            action: action.into(),
            rationale: rationale.into(),
        }
    }
}

/// Derive recommendations from an audit, in synthesis order: growth,
/// activity, top performer, low performers, title and duration, timing.
///
/// Sections whose input export is missing contribute nothing.
pub fn synthesize(report: &AuditReport) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if let Some(overall) = &report.overall {
        if overall.growth_rate > 0.0 {
            out.push(Recommendation::new(
                Priority::High,
                "Maintain posting consistency",
                format!(
                    "You have positive growth momentum ({:.1}%)",
                    overall.growth_rate
                ),
            ));
        } else {
            out.push(Recommendation::new(
                Priority::Critical,
                "Experiment with new content angles",
                "Current strategy not driving growth",
            ));
        }

        if (overall.days_active as f64) < overall.total_days as f64 * MIN_ACTIVE_DAY_RATIO {
            out.push(Recommendation::new(
                Priority::High,
                "Increase posting frequency to 3-4x per week",
                format!(
                    "Only {} of {} days had views; low activity hurts algorithm visibility",
                    overall.days_active, overall.total_days
                ),
            ));
        }
    }

    if let Some(top) = report.videos.first() {
        out.push(Recommendation::new(
            Priority::Critical,
            format!(
                "Create follow-up to \"{}\"",
                truncate_title(&top.title, QUOTED_TITLE_CHARS)
            ),
            format!("This format generated {} views", top.total_views),
        ));

        let low = report
            .videos
            .iter()
            .filter(|v| v.total_views < LOW_PERFORMER_VIEWS)
            .count();
        if low > 0 {
            out.push(Recommendation::new(
                Priority::Medium,
                "Revamp low-performing video thumbnails",
                format!("{low} videos getting minimal views"),
            ));
        }
    }

    // The "optimal" values are the top video's own figures, not a fitted
    // optimum across the catalogue.
    if let Some(patterns) = &report.patterns {
        out.push(Recommendation::new(
            Priority::Medium,
            format!("Optimize titles to ~{} characters", patterns.top_title_length),
            "Top performer uses this length",
        ));
        out.push(Recommendation::new(
            Priority::Medium,
            format!(
                "Target {:.1}-minute video length",
                patterns.top_duration_minutes
            ),
            "Top performer runs this long",
        ));
    }

    if let Some(best) = report.timing.first() {
        let day = weekday_name(best.weekday);
        out.push(Recommendation::new(
            Priority::High,
            format!("Schedule releases for {day}"),
            format!("This day drives {} views", best.views),
        ));
    }

    out
}

/// Recommendations ordered by priority; synthesis order is kept within a
/// priority.
pub fn action_plan(recommendations: &[Recommendation]) -> Vec<&Recommendation> {
    let mut plan: Vec<&Recommendation> = recommendations.iter().collect();
    plan.sort_by_key(|r| r.priority.rank());
    plan
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
