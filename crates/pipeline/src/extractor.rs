//! Channel listings from the external extractor.
//!
//! [`VideoSource`] is the seam between the pipeline and the extractor:
//! production runs spawn `yt-dlp`, tests substitute an in-memory listing.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::error::PipelineError;

/// Cap on captured stderr (64 KiB); only used for error messages.
const MAX_STDERR_BYTES: usize = 64 * 1024;

/// Raw entries of a channel listing, in listing order.
///
/// Entries are kept undecoded so that one malformed entry cannot fail the
/// whole listing. `null` entries (videos the extractor could not read) are
/// kept too, so positions stay stable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChannelListing {
    #[serde(default)]
    pub entries: Vec<Value>,
}

impl ChannelListing {
    /// Parse the extractor's JSON document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PipelineError> {
        serde_json::from_slice(bytes)
            .map_err(|e| PipelineError::Extraction(format!("unparsable extractor output: {e}")))
    }

    /// Number of entries that are not `null`.
    pub fn available(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_null()).count()
    }
}

/// Something that can list every video of a channel.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch_listing(&self, channel_url: &str) -> Result<ChannelListing, PipelineError>;
}

/// [`VideoSource`] backed by the `yt-dlp` command-line tool.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    program: String,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, channel_url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--dump-single-json")
            .arg("--ignore-errors")
            .arg("--no-warnings")
            .arg(channel_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl VideoSource for YtDlpExtractor {
    async fn fetch_listing(&self, channel_url: &str) -> Result<ChannelListing, PipelineError> {
        tracing::info!(program = %self.program, channel_url, "Starting extractor");

        let mut child = self.command(channel_url).spawn().map_err(|e| {
            PipelineError::Extraction(format!(
                "failed to run {}: {e}. Make sure yt-dlp is installed",
                self.program
            ))
        })?;

        // Drain both pipes concurrently so a chatty stderr cannot block stdout.
        let stdout_task = tokio::spawn(read_stream(child.stdout.take(), None));
        let stderr_task = tokio::spawn(read_stream(child.stderr.take(), Some(MAX_STDERR_BYTES)));

        let status = child.wait().await?;
        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();

        // With --ignore-errors the extractor exits non-zero when any single
        // video failed, yet still prints the listing.
        if !status.success() && stdout.iter().all(u8::is_ascii_whitespace) {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(PipelineError::Extraction(format!(
                "{} exited with {}: {}",
                self.program,
                status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        if !status.success() {
            tracing::warn!(
                exit_code = status.code().unwrap_or(-1),
                "Extractor reported errors for some videos"
            );
        }

        ChannelListing::from_json(&stdout)
    }
}

/// Read an output stream to the end, keeping at most `limit` bytes.
///
/// The stream is always drained so the child never blocks on a full pipe.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>, limit: Option<usize>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = h.read_to_end(&mut buf).await;
    }
    if let Some(limit) = limit {
        buf.truncate(limit);
    }
    buf
}
