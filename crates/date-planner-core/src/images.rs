//! Image lookup for option cards.
//!
//! The terminal cannot draw the pictures, but it can tell the user whether the
//! file a card points at is really there. A missing file is only ever a warning.

use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    /// The option has no image (custom picks may leave it blank).
    None,
    Present { path: PathBuf, bytes: u64 },
    Missing { path: PathBuf },
}

impl ImageStatus {
    pub fn is_missing(&self) -> bool {
        matches!(self, ImageStatus::Missing { .. })
    }

    /// One line for the UI: the file and its size, or the warning.
    pub fn describe(&self, filename: &str, dir: &Path) -> String {
        match self {
            ImageStatus::None => "No image".to_string(),
            ImageStatus::Present { path, bytes } => {
                format!("{} ({})", path.display(), human_size(*bytes))
            }
            ImageStatus::Missing { .. } => format!(
                "Image not found: `{}` in `{}`. Check the name and extension.",
                filename,
                dir.display()
            ),
        }
    }
}

pub fn locate(dir: &Path, filename: &str) -> ImageStatus {
    let filename = filename.trim();
    if filename.is_empty() {
        return ImageStatus::None;
    }

    let path = dir.join(filename);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => ImageStatus::Present {
            path,
            bytes: meta.len(),
        },
        _ => {
            debug!(path = %path.display(), "image not found");
            ImageStatus::Missing { path }
        }
    }
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vibe_cozy.jpg"), vec![0u8; 2048]).unwrap();
        let status = locate(dir.path(), "vibe_cozy.jpg");
        assert_eq!(
            status,
            ImageStatus::Present {
                path: dir.path().join("vibe_cozy.jpg"),
                bytes: 2048
            }
        );
        assert!(status.describe("vibe_cozy.jpg", dir.path()).ends_with("(2.0 KB)"));
    }

    #[test]
    fn test_locate_missing_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let status = locate(dir.path(), "flowers_roses.jpg");
        assert!(status.is_missing());
        assert!(status
            .describe("flowers_roses.jpg", dir.path())
            .starts_with("Image not found: `flowers_roses.jpg`"));
    }

    #[test]
    fn test_locate_blank() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(locate(dir.path(), "  "), ImageStatus::None);
    }

    #[test]
    fn test_directory_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        assert!(locate(dir.path(), "sub").is_missing());
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
