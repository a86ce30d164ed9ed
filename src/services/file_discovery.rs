use crate::models::ExtensionSet;
use crate::utils::matches_extensions;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A recursive media scan over one root. Each call to [`MediaScan::iter`]
/// starts a fresh traversal, so the scan can be replayed.
#[derive(Debug, Clone)]
pub struct MediaScan {
    root: PathBuf,
    extensions: ExtensionSet,
}

impl MediaScan {
    /// The root must already be validated as an existing directory.
    pub fn new<P: AsRef<Path>>(root: P, extensions: ExtensionSet) -> Result<Self> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve seed directory: {:?}", root))?;

        Ok(Self { root, extensions })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    pub fn iter(&self) -> MediaFiles<'_> {
        MediaFiles {
            walker: WalkDir::new(&self.root).follow_links(false).into_iter(),
            extensions: &self.extensions,
        }
    }
}

impl<'a> IntoIterator for &'a MediaScan {
    type Item = PathBuf;
    type IntoIter = MediaFiles<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy sequence of matching regular files, in traversal order
pub struct MediaFiles<'a> {
    walker: walkdir::IntoIter,
    extensions: &'a ExtensionSet,
}

impl Iterator for MediaFiles<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        for entry in self.walker.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Follows a file symlink to its target; dangling links and
            // special files fail this check.
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if matches_extensions(path, self.extensions) {
                return Some(entry.into_path());
            }
        }
        None
    }
}

/// Collect every matching file under `root`
pub fn discover_media_files<P: AsRef<Path>>(
    root: P,
    extensions: &ExtensionSet,
) -> Result<Vec<PathBuf>> {
    let scan = MediaScan::new(root, extensions.clone())?;
    let files: Vec<PathBuf> = scan.iter().collect();

    debug!("Found {} media files under {:?}", files.len(), scan.root());
    Ok(files)
}
