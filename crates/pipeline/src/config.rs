use std::path::PathBuf;

/// Default root directory for channel analyses.
pub const DEFAULT_OUTPUT_DIR: &str = "analysis";

/// Default extractor executable, resolved through `PATH`.
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";

/// Analyzer configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Root under which `<channel>/<timestamp>/` directories are created.
    pub output_root: PathBuf,
    /// Extractor executable name or path.
    pub ytdlp_bin: String,
}

impl AnalyzerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default    |
    /// |-----------------------|------------|
    /// | `ANALYSIS_OUTPUT_DIR` | `analysis` |
    /// | `YTDLP_BIN`           | `yt-dlp`   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let output_root = lookup("ANALYSIS_OUTPUT_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into());

        let ytdlp_bin = lookup("YTDLP_BIN")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_YTDLP_BIN.into());

        Self {
            output_root: PathBuf::from(output_root),
            ytdlp_bin,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
