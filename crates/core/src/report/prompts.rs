//! NotebookLM prompt documents.
//!
//! Prompt bodies and the wrapping document are Markdown templates compiled
//! into the binary. Placeholders are `{name}`; unknown placeholders are left
//! as written.

use super::{join_or, ReportContext, NO_TAGS};
use crate::format::{format_count, format_number};
use crate::frequency::FrequencyTable;
use crate::metrics::ChannelSummary;
use crate::ranking::{rank_by, SortKey};
use crate::video::VideoRecord;

/// Placeholders every prompt body must contain.
pub const REQUIRED_PLACEHOLDERS: [&str; 2] = ["{channel_name}", "{video_count}"];

const DOCUMENT_TEMPLATE: &str = include_str!("../../templates/prompt_document.md");

/// The analysis prompts generated for every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SuccessAnalysis,
    ContentStrategy,
    MonetizationAnalysis,
    CompetitorAnalysis,
    ViralContentAnalysis,
}

impl PromptKind {
    pub const ALL: [PromptKind; 5] = [
        PromptKind::SuccessAnalysis,
        PromptKind::ContentStrategy,
        PromptKind::MonetizationAnalysis,
        PromptKind::CompetitorAnalysis,
        PromptKind::ViralContentAnalysis,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::SuccessAnalysis => "success_analysis",
            Self::ContentStrategy => "content_strategy",
            Self::MonetizationAnalysis => "monetization_analysis",
            Self::CompetitorAnalysis => "competitor_analysis",
            Self::ViralContentAnalysis => "viral_content_analysis",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SuccessAnalysis => "Success Analysis",
            Self::ContentStrategy => "Content Strategy",
            Self::MonetizationAnalysis => "Monetization Analysis",
            Self::CompetitorAnalysis => "Competitor Analysis",
            Self::ViralContentAnalysis => "Viral Content Analysis",
        }
    }

    /// File name inside the prompts directory.
    pub fn file_name(self) -> String {
        format!("{}_prompt.md", self.slug())
    }

    /// Raw template body.
    pub fn template(self) -> &'static str {
        match self {
            Self::SuccessAnalysis => include_str!("../../templates/prompts/success_analysis.md"),
            Self::ContentStrategy => include_str!("../../templates/prompts/content_strategy.md"),
            Self::MonetizationAnalysis => {
                include_str!("../../templates/prompts/monetization_analysis.md")
            }
            Self::CompetitorAnalysis => {
                include_str!("../../templates/prompts/competitor_analysis.md")
            }
            Self::ViralContentAnalysis => {
                include_str!("../../templates/prompts/viral_content_analysis.md")
            }
        }
    }
}

/// Substitute `{key}` placeholders in a single pass.
///
/// Substituted values are not scanned again, so a value containing braces
/// is inserted verbatim.
pub fn render_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (v, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render the full prompt document for `kind`.
pub fn prompt_document(
    ctx: &ReportContext,
    kind: PromptKind,
    records: &[VideoRecord],
    summary: &ChannelSummary,
) -> String {
    let video_count = summary.video_count.to_string();
    let body = render_template(
        kind.template(),
        &[
            ("channel_name", ctx.channel_name.clone()),
            ("video_count", video_count.clone()),
        ],
    );

    let tags = FrequencyTable::from_sequences(records.iter().map(|r| r.tags.iter()));
    let top_video = rank_by(records, SortKey::Views)
        .first()
        .map(|r| r.title.clone())
        .unwrap_or_default();

    render_template(
        DOCUMENT_TEMPLATE,
        &[
            ("title", kind.title().to_string()),
            ("channel_name", ctx.channel_name.clone()),
            ("video_count", video_count),
            ("generated_at", ctx.generated_label()),
            ("prompt", body.trim_end().to_string()),
            ("total_views", format_count(summary.total_views)),
            ("avg_views", format_number(summary.avg_views)),
            ("top_video", top_video),
            ("main_topics", join_or(&tags.top_labels(5), NO_TAGS)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::summarize;
    use crate::report::test_helpers::{context, sample_records};

    #[test]
    fn every_template_has_required_placeholders() {
        for kind in PromptKind::ALL {
            for placeholder in REQUIRED_PLACEHOLDERS {
                assert!(
                    kind.template().contains(placeholder),
                    "{} lacks {placeholder}",
                    kind.slug()
                );
            }
        }
    }

    #[test]
    fn render_replaces_known_keys_only() {
        let out = render_template(
            "{a} and {b} but not {c} or {",
            &[("a", "1".to_string()), ("b", "{a}".to_string())],
        );
        assert_eq!(out, "1 and {a} but not {c} or {");
    }

    #[test]
    fn prompt_document_is_filled_in() {
        let records = sample_records();
        let summary = summarize(&records).unwrap();
        let doc = prompt_document(&context(), PromptKind::SuccessAnalysis, &records, &summary);

        assert!(doc.starts_with("# NotebookLM Analysis Prompt: Success Analysis\n"));
        assert!(doc.contains("**Videos**: 3 videos"));
        assert!(doc.contains("Analyze these 3 videos from rustacean"));
        assert!(doc.contains("- Most viewed video: Ownership explained simply"));
        assert!(doc.contains("- Total channel views: 160"));
        assert!(doc.contains("- Channel's main topics: rust, ownership, async, macros"));
        assert!(!doc.contains("{channel_name}"));
        assert!(!doc.contains("{prompt}"));
    }

    #[test]
    fn file_names() {
        assert_eq!(
            PromptKind::ViralContentAnalysis.file_name(),
            "viral_content_analysis_prompt.md"
        );
    }
}
