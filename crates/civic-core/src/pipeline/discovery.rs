//! Media discovery for turning command-line paths into evidence batches.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::MediaConfig;

/// Finds image and video files under a path.
pub struct MediaDiscovery {
    config: MediaConfig,
}

impl MediaDiscovery {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// Discover all supported media files at a path.
    ///
    /// A file is returned as-is if supported. A directory is walked
    /// recursively and the results are sorted so batch order is stable.
    pub fn discover(&self, path: &Path) -> Vec<PathBuf> {
        if path.is_file() {
            if self.is_supported(path) {
                return vec![path.to_path_buf()];
            }
            return vec![];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        files
    }

    /// Check if a file has an image or video extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .image_extensions
                    .iter()
                    .chain(&self.config.video_extensions)
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
