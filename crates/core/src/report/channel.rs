//! Markdown reports for a channel analysis.

use std::fmt::Write;

use super::{
    join_or, table_cell, ReportContext, CONTENT_THEMES_FILE, DEFAULT_CATEGORY, NO_TAGS,
    RANKINGS_FILE, STATISTICS_FILE, SUCCESS_METRICS_FILE, URL_LIST_FILE, VIDEO_CSV_FILE,
};
use crate::format::{
    format_clock, format_count, format_number, format_rate, format_thousands, title_words,
    truncate_title,
};
use crate::frequency::{percentage_of_records, FrequencyTable};
use crate::metrics::{mean, ChannelSummary};
use crate::ranking::{bottom_n, high_performers, rank_by, top_fraction, top_n, SortKey};
use crate::video::VideoRecord;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const SUCCESS_TOP_N: usize = 20;
const SUCCESS_TITLE_CHARS: usize = 50;

const THEME_TAGS_N: usize = 30;
const THEME_CATEGORIES_N: usize = 10;
const THEME_WORDS_N: usize = 20;
const THEME_TOP_TAGS_N: usize = 15;
/// Share of videos, by views, treated as the high-performing slice.
const TOP_SLICE_FRACTION: f64 = 0.2;

const RANKINGS_TOP_N: usize = 50;
const RANKINGS_KEY_N: usize = 10;
const RANKINGS_TITLE_CHARS: usize = 60;

const SUMMARY_FORMAT_N: usize = 20;
const SUMMARY_FACTOR_N: usize = 10;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tag_table<'a, I>(records: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a VideoRecord>,
{
    FrequencyTable::from_sequences(records.into_iter().map(|r| r.tags.iter()))
}

fn category_table<'a, I>(records: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a VideoRecord>,
{
    FrequencyTable::from_sequences(records.into_iter().map(|r| r.categories.iter()))
}

fn word_table<'a, I>(records: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a VideoRecord>,
{
    FrequencyTable::from_sequences(records.into_iter().map(|r| title_words(&r.title)))
}

/// Whole minutes of the mean duration of `records`.
fn mean_minutes(records: &[&VideoRecord]) -> u64 {
    (mean(records.iter().map(|r| r.duration_secs() as f64)) / 60.0).floor() as u64
}

fn views_row(out: &mut String, rank: usize, r: &VideoRecord, title_chars: usize) {
    let _ = writeln!(
        out,
        "| {rank} | {} | {} | {}% | {} | {} |",
        table_cell(&truncate_title(&r.title, title_chars)),
        r.view_count_formatted,
        format_rate(r.engagement_rate),
        r.duration_formatted,
        r.upload_date_formatted,
    );
}

// ---------------------------------------------------------------------------
// 01 Channel statistics
// ---------------------------------------------------------------------------

/// Totals, averages, and the two headline videos.
pub fn channel_statistics(
    ctx: &ReportContext,
    records: &[VideoRecord],
    summary: &ChannelSummary,
) -> String {
    let by_views = rank_by(records, SortKey::Views);
    let by_engagement = rank_by(records, SortKey::Engagement);
    let mut out = String::new();

    let _ = writeln!(out, "# {} - Channel Statistics Report\n", ctx.channel_name);
    let _ = writeln!(out, "Generated: {}", ctx.generated_label());
    let _ = writeln!(out, "Source: {}\n", ctx.channel_url);

    let _ = writeln!(out, "## Overall Statistics\n");
    let _ = writeln!(
        out,
        "- **Total Videos**: {}",
        format_thousands(summary.video_count as u64)
    );
    for (label, total) in [
        ("Views", summary.total_views),
        ("Likes", summary.total_likes),
        ("Comments", summary.total_comments),
    ] {
        let _ = writeln!(
            out,
            "- **Total {label}**: {} ({})",
            format_count(total),
            format_thousands(total)
        );
    }
    let _ = writeln!(
        out,
        "- **Total Watch Time**: {} hours {} minutes\n",
        format_thousands(summary.total_duration_secs / 3600),
        (summary.total_duration_secs % 3600) / 60
    );

    let _ = writeln!(out, "## Average Performance\n");
    let _ = writeln!(
        out,
        "- **Average Views per Video**: {} ({})",
        format_number(summary.avg_views),
        format_thousands(summary.avg_views.round() as u64)
    );
    let _ = writeln!(
        out,
        "- **Median Views per Video**: {} ({})",
        format_number(summary.median_views),
        format_thousands(summary.median_views.round() as u64)
    );
    let _ = writeln!(
        out,
        "- **Average Engagement Rate**: {:.2}%",
        summary.avg_engagement
    );
    let _ = writeln!(
        out,
        "- **Average Video Duration**: {}\n",
        format_clock(summary.avg_duration_secs)
    );

    let _ = writeln!(out, "## Top Performers\n");
    if let Some(top) = by_views.first() {
        let _ = writeln!(out, "### Most Viewed Video");
        let _ = writeln!(out, "- **Title**: {}", top.title);
        let _ = writeln!(
            out,
            "- **Views**: {} ({})",
            top.view_count_formatted,
            format_thousands(top.view_count)
        );
        let _ = writeln!(out, "- **Upload Date**: {}", top.upload_date_formatted);
        let _ = writeln!(out, "- **URL**: {}\n", top.url);
    }
    if let Some(top) = by_engagement.first() {
        let _ = writeln!(out, "### Highest Engagement Video");
        let _ = writeln!(out, "- **Title**: {}", top.title);
        let _ = writeln!(
            out,
            "- **Engagement Rate**: {}%",
            format_rate(top.engagement_rate)
        );
        let _ = writeln!(out, "- **Views**: {}", top.view_count_formatted);
        let _ = writeln!(out, "- **URL**: {}\n", top.url);
    }

    let categories: Vec<&str> = by_views
        .first()
        .map(|r| r.categories.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let _ = writeln!(out, "## Success Insights\n");
    let _ = writeln!(out, "Based on the data analysis:");
    let _ = writeln!(
        out,
        "- Videos with {} or more views are above average",
        format_number(summary.avg_views)
    );
    let _ = writeln!(
        out,
        "- Engagement rates above {:.1}% indicate strong audience connection",
        summary.avg_engagement
    );
    let _ = writeln!(
        out,
        "- The channel's most successful content focuses on: {}",
        join_or(&categories, DEFAULT_CATEGORY)
    );

    out
}

// ---------------------------------------------------------------------------
// 02 Success metrics
// ---------------------------------------------------------------------------

/// Top videos by views and by engagement, plus traits of above-average
/// videos.
pub fn success_metrics(ctx: &ReportContext, records: &[VideoRecord]) -> String {
    let by_views = rank_by(records, SortKey::Views);
    let by_engagement = rank_by(records, SortKey::Engagement);
    let mut out = String::new();

    let _ = writeln!(out, "# {} - Success Metrics Analysis\n", ctx.channel_name);

    let _ = writeln!(out, "## Top {SUCCESS_TOP_N} Videos by Views\n");
    let _ = writeln!(
        out,
        "| Rank | Title | Views | Engagement | Duration | Upload Date |"
    );
    let _ = writeln!(
        out,
        "|------|-------|-------|------------|----------|-------------|"
    );
    for (i, r) in top_n(&by_views, SUCCESS_TOP_N).iter().enumerate() {
        views_row(&mut out, i + 1, r, SUCCESS_TITLE_CHARS);
    }

    let _ = writeln!(out, "\n## Top {SUCCESS_TOP_N} Videos by Engagement Rate\n");
    let _ = writeln!(
        out,
        "| Rank | Title | Engagement | Views | Likes | Comments |"
    );
    let _ = writeln!(
        out,
        "|------|-------|------------|-------|-------|----------|"
    );
    for (i, r) in top_n(&by_engagement, SUCCESS_TOP_N).iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | {} | {}% | {} | {} | {} |",
            i + 1,
            table_cell(&truncate_title(&r.title, SUCCESS_TITLE_CHARS)),
            format_rate(r.engagement_rate),
            r.view_count_formatted,
            r.like_count_formatted,
            r.comment_count_formatted,
        );
    }

    let high = high_performers(records, SortKey::Views);
    if !high.is_empty() {
        let avg_duration = mean(high.iter().map(|r| r.duration_secs() as f64));
        let tags = tag_table(high.iter().copied());

        let _ = writeln!(out, "\n## Success Patterns Analysis\n");
        let _ = writeln!(
            out,
            "### High-Performing Videos ({} videos above average)",
            high.len()
        );
        let _ = writeln!(out, "- **Average Duration**: {}", format_clock(avg_duration));
        let _ = writeln!(
            out,
            "- **Common Tags**: {}\n",
            join_or(&tags.top_labels(10), NO_TAGS)
        );
        let _ = writeln!(out, "### Performance Insights");
        let _ = writeln!(
            out,
            "- Above-average videos run about {} minutes",
            mean_minutes(&high)
        );
        let _ = writeln!(
            out,
            "- Content with these tags shows higher engagement: {}",
            join_or(&tags.top_labels(5), NO_TAGS)
        );
        let _ = writeln!(
            out,
            "- Upload timing and consistency appear to impact performance"
        );
    }

    out
}

// ---------------------------------------------------------------------------
// 03 Content themes
// ---------------------------------------------------------------------------

/// Tag, category, and title-word frequencies, overall and for the top
/// slice of videos by views.
pub fn content_themes(ctx: &ReportContext, records: &[VideoRecord]) -> String {
    let count = records.len();
    let tags = tag_table(records);
    let categories = category_table(records);
    let words = word_table(records);
    let mut out = String::new();

    let _ = writeln!(out, "# {} - Content Themes Analysis\n", ctx.channel_name);

    let _ = writeln!(out, "## Most Common Tags (Top {THEME_TAGS_N})\n");
    for (tag, n) in tags.most_common(THEME_TAGS_N) {
        let _ = writeln!(
            out,
            "- **{tag}**: {n} videos ({:.1}%)",
            percentage_of_records(n, count)
        );
    }
    if tags.is_empty() {
        let _ = writeln!(out, "- {NO_TAGS}");
    }

    let _ = writeln!(out, "\n## Content Categories\n");
    for (category, n) in categories.most_common(THEME_CATEGORIES_N) {
        let _ = writeln!(
            out,
            "- **{category}**: {n} videos ({:.1}%)",
            percentage_of_records(n, count)
        );
    }

    let _ = writeln!(out, "\n## Common Title Words (Top {THEME_WORDS_N})\n");
    for (word, n) in words.most_common(THEME_WORDS_N) {
        let _ = writeln!(out, "- **{word}**: {n} occurrences");
    }

    let by_views = rank_by(records, SortKey::Views);
    let top_slice = top_fraction(&by_views, TOP_SLICE_FRACTION);
    let top_tags = tag_table(top_slice.iter().copied());
    let top_words = word_table(top_slice.iter().copied());
    let top_categories = category_table(top_slice.iter().copied());

    let _ = writeln!(
        out,
        "\n## High-Performing Content Analysis (Top 20% of videos)\n"
    );
    let _ = writeln!(out, "### Tags in Most Successful Videos:");
    for (tag, n) in top_tags.most_common(THEME_TOP_TAGS_N) {
        let _ = writeln!(out, "- **{tag}**: {n} videos");
    }

    let _ = writeln!(out, "\n### Content Strategy Insights:");
    let _ = writeln!(
        out,
        "- Focus on topics tagged with: {}",
        join_or(&top_tags.top_labels(5), NO_TAGS)
    );
    let _ = writeln!(
        out,
        "- High-performing videos often include: {}",
        join_or(&top_words.top_labels(5), "-")
    );
    let _ = writeln!(
        out,
        "- Successful content categories: {}",
        join_or(&top_categories.top_labels(3), DEFAULT_CATEGORY)
    );

    out
}

// ---------------------------------------------------------------------------
// 04 Performance rankings
// ---------------------------------------------------------------------------

/// Full ranking tables by every sort key.
pub fn performance_rankings(ctx: &ReportContext, records: &[VideoRecord]) -> String {
    let by_views = rank_by(records, SortKey::Views);
    let mut out = String::new();

    let _ = writeln!(out, "# {} - Performance Rankings\n", ctx.channel_name);
    let _ = writeln!(out, "## Complete Performance Rankings\n");

    let _ = writeln!(out, "### Top {RANKINGS_TOP_N} Videos by Views");
    let _ = writeln!(out, "| Rank | Title | Views | Engagement | Duration | Date |");
    let _ = writeln!(out, "|------|-------|-------|------------|----------|------|");
    for (i, r) in top_n(&by_views, RANKINGS_TOP_N).iter().enumerate() {
        views_row(&mut out, i + 1, r, RANKINGS_TITLE_CHARS);
    }

    for key in &SortKey::ALL[1..] {
        let ranked = rank_by(records, *key);
        let _ = writeln!(out, "\n### Top {RANKINGS_KEY_N} Videos by {}", key.label());
        let _ = writeln!(
            out,
            "| Rank | Title | Views | Engagement | Likes | Comments | Duration |"
        );
        let _ = writeln!(
            out,
            "|------|-------|-------|------------|-------|----------|----------|"
        );
        for (i, r) in top_n(&ranked, RANKINGS_KEY_N).iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {}% | {} | {} | {} |",
                i + 1,
                table_cell(&truncate_title(&r.title, RANKINGS_TITLE_CHARS)),
                r.view_count_formatted,
                format_rate(r.engagement_rate),
                r.like_count_formatted,
                r.comment_count_formatted,
                r.duration_formatted,
            );
        }
    }

    let bottom = bottom_n(&by_views, RANKINGS_KEY_N);
    let first_rank = by_views.len() - bottom.len() + 1;
    let _ = writeln!(out, "\n### Bottom {RANKINGS_KEY_N} Videos by Views");
    let _ = writeln!(out, "| Rank | Title | Views | Engagement | Duration | Date |");
    let _ = writeln!(out, "|------|-------|-------|------------|----------|------|");
    for (i, r) in bottom.iter().enumerate() {
        views_row(&mut out, first_rank + i, r, RANKINGS_TITLE_CHARS);
    }

    let _ = writeln!(out, "\n## Data Export\n");
    let _ = writeln!(
        out,
        "Complete video data has been exported to: `{VIDEO_CSV_FILE}`\n"
    );
    let _ = writeln!(
        out,
        "This CSV contains all metadata for further analysis in Excel, Google Sheets, or other tools.\n"
    );
    let _ = writeln!(out, "### CSV Columns Include:");
    let _ = writeln!(out, "- Title, URL, Video ID");
    let _ = writeln!(out, "- View count, Like count, Comment count");
    let _ = writeln!(out, "- Engagement, like, and comment rates");
    let _ = writeln!(out, "- Upload date, Duration");
    let _ = writeln!(out, "- Tags, Categories, Description");

    out
}

// ---------------------------------------------------------------------------
// 00 Master summary
// ---------------------------------------------------------------------------

/// Entry-point document: headline figures, file index, and next steps.
pub fn master_summary(
    ctx: &ReportContext,
    records: &[VideoRecord],
    summary: &ChannelSummary,
) -> String {
    let by_views = rank_by(records, SortKey::Views);
    let tags = tag_table(records);
    let top_tags = tags.top_labels(10);
    let main_topics = join_or(top_n(&top_tags, 5), NO_TAGS);
    let winning_topics = join_or(top_n(&top_tags, 3), NO_TAGS);
    let mut out = String::new();

    let _ = writeln!(out, "# {} - Master Analysis Summary\n", ctx.channel_name);
    let _ = writeln!(out, "**Analysis Date**: {}", ctx.generated_label());
    let _ = writeln!(out, "**Channel URL**: {}", ctx.channel_url);
    let _ = writeln!(out, "**Videos Analyzed**: {}\n", summary.video_count);

    let _ = writeln!(out, "## Key Statistics");
    let _ = writeln!(
        out,
        "- **Total Views**: {} ({})",
        format_count(summary.total_views),
        format_thousands(summary.total_views)
    );
    let _ = writeln!(
        out,
        "- **Average Views**: {} per video",
        format_number(summary.avg_views)
    );
    let _ = writeln!(
        out,
        "- **Median Views**: {} per video",
        format_number(summary.median_views)
    );
    let _ = writeln!(
        out,
        "- **Average Engagement**: {:.2}%",
        summary.avg_engagement
    );
    if let Some(top) = by_views.first() {
        let _ = writeln!(
            out,
            "- **Most Successful Video**: {} ({} views)",
            top.title, top.view_count_formatted
        );
    }

    let _ = writeln!(out, "\n## Content Insights");
    let _ = writeln!(out, "- **Main Topics**: {main_topics}");
    let _ = writeln!(out, "- **High-Performance Tags**: {winning_topics}");

    let _ = writeln!(out, "\n## Generated Files\n");
    let _ = writeln!(out, "### Analysis Reports");
    for (i, (file, what)) in [
        (STATISTICS_FILE, "Complete channel overview"),
        (SUCCESS_METRICS_FILE, "Performance analysis and rankings"),
        (CONTENT_THEMES_FILE, "Topic and theme analysis"),
        (RANKINGS_FILE, "Detailed performance rankings"),
        (VIDEO_CSV_FILE, "Complete dataset for spreadsheet analysis"),
    ]
    .iter()
    .enumerate()
    {
        let _ = writeln!(out, "{}. `{file}` - {what}", i + 1);
    }
    let _ = writeln!(out, "\n### NotebookLM Resources");
    let _ = writeln!(out, "- `{URL_LIST_FILE}` - All video URLs for import");
    let _ = writeln!(
        out,
        "- `{}/` folder with {} analysis prompts:",
        super::PROMPTS_DIR,
        super::prompts::PromptKind::ALL.len()
    );
    for kind in super::prompts::PromptKind::ALL {
        let _ = writeln!(out, "  - {} Prompt", kind.title());
    }

    let _ = writeln!(out, "\n## Next Steps\n");
    let _ = writeln!(out, "### Immediate Actions:");
    let _ = writeln!(
        out,
        "1. **Review Top Performers**: Study the top {SUCCESS_TOP_N} videos in `{SUCCESS_METRICS_FILE}`"
    );
    let _ = writeln!(
        out,
        "2. **Identify Patterns**: Look for common themes in high-performing content"
    );
    let _ = writeln!(
        out,
        "3. **NotebookLM Analysis**: Use the generated prompts for deeper insights\n"
    );
    let _ = writeln!(out, "### Content Strategy:");
    let _ = writeln!(
        out,
        "1. **Focus on Winning Topics**: Prioritize content around: {winning_topics}"
    );
    let _ = writeln!(
        out,
        "2. **Optimize Format**: Videos around {} minutes perform best",
        mean_minutes(top_n(&by_views, SUMMARY_FORMAT_N))
    );
    let _ = writeln!(
        out,
        "3. **Engagement Tactics**: Study high-engagement videos for community-building strategies"
    );

    let _ = writeln!(out, "\n## Key Success Factors Identified\n");
    let _ = writeln!(
        out,
        "1. **Content Topics**: {} content generates the most views",
        top_tags.first().copied().unwrap_or(NO_TAGS)
    );
    let _ = writeln!(
        out,
        "2. **Video Length**: {}-minute videos perform best",
        mean_minutes(top_n(&by_views, SUMMARY_FACTOR_N))
    );
    let _ = writeln!(
        out,
        "3. **Engagement**: Aim for an engagement rate of {:.1}% or more",
        summary.avg_engagement
    );
    let _ = writeln!(
        out,
        "4. **Consistency**: Regular posting in successful categories maintains momentum"
    );

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
