//! Open a directory in the platform file manager.

use std::path::Path;

use tokio::process::Command;

use crate::error::PipelineError;

/// File-manager command for the current platform.
pub fn opener_program() -> &'static str {
    if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Open `path` with [`opener_program`]. The path must exist.
pub async fn open_folder(path: &Path) -> Result<(), PipelineError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(PipelineError::MissingInput(format!(
            "Invalid path: {}",
            path.display()
        )));
    }

    let program = opener_program();
    tracing::info!(program, path = %path.display(), "Opening folder");

    let status = Command::new(program)
        .arg(path)
        .status()
        .await
        .map_err(|e| PipelineError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    // explorer.exe reports exit code 1 even when it succeeds.
    if !status.success() && program != "explorer" {
        return Err(PipelineError::Open {
            path: path.display().to_string(),
            message: format!("{program} exited with {}", status.code().unwrap_or(-1)),
        });
    }
    Ok(())
}
