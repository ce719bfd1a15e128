use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::info;

pub const SUMMARY_FILE_NAME: &str = "date_plan.txt";

/// Write the plan as UTF-8 to `date_plan.txt` inside `dir`, creating the
/// directory if needed. An earlier download in the same place is replaced.
pub fn save_summary(dir: &Path, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;

    let path = dir.join(SUMMARY_FILE_NAME);
    fs::write(&path, text.as_bytes())
        .with_context(|| format!("Could not write {}", path.display()))?;

    info!(path = %path.display(), bytes = text.len(), "saved summary");
    Ok(path)
}
