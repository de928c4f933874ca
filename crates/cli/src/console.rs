//! Terminal interaction: prompts and event lines.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tubelens_core::event::PipelineEvent;

/// Print `question` and read one trimmed line. End of input reads as empty.
pub fn ask(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Yes/no question; only `y` and `yes` (any case) accept.
pub fn confirm(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> io::Result<bool> {
    let answer = ask(input, output, &format!("{question} (y/n): "))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// One console line per event.
pub fn describe_event(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::Log { message } => message.clone(),
        PipelineEvent::Progress { percent } => format!("  ... {percent}% processed"),
        PipelineEvent::Complete { output_path, stats } => format!(
            "Analysis complete: {} videos, {} total views\nResults saved to: {output_path}",
            stats.video_count, stats.total_views
        ),
        PipelineEvent::Error { message } => format!("Error: {message}"),
    }
}

/// `Downloads` under the user's home directory, or the working directory
/// when no home is set.
pub fn downloads_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup("HOME")
        .or_else(|| lookup("USERPROFILE"))
        .filter(|home| !home.trim().is_empty())
        .map(|home| PathBuf::from(home).join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("."))
}
