//! Source discovery for file and directory inputs.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ChunkError;

/// Sources found under an input path.
#[derive(Debug, Default)]
pub struct DiscoveredSources {
    /// Matching files in sorted path order.
    pub sources: Vec<PathBuf>,

    /// Entries that could not be read while walking.
    pub errors: Vec<ChunkError>,
}

/// Find chunk sources under `path`.
///
/// A non-directory path is returned as the only source, whatever its
/// extension, so that a missing file still reports an open error. A
/// directory is walked recursively and every regular file (or symlink to
/// one) whose name ends in `.{extension}` is kept, including a file named
/// just `.{extension}`.
pub fn discover_sources(path: &Path, extension: &str) -> DiscoveredSources {
    if !path.is_dir() {
        return DiscoveredSources {
            sources: vec![path.to_path_buf()],
            errors: Vec::new(),
        };
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut found = DiscoveredSources::default();

    for entry in WalkDir::new(path) {
        match entry {
            Ok(entry) => {
                let matches = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(&suffix));
                if matches && entry.path().is_file() {
                    found.sources.push(entry.into_path());
                }
            }
            Err(e) => found.errors.push(ChunkError::Discovery {
                path: e.path().unwrap_or(path).to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    found
        .sources
        .sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    found
}
