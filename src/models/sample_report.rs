use crate::models::ExtensionSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One materialized sample: where it came from and the name it landed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl CopiedFile {
    /// True when the destination name had to be counter-suffixed
    pub fn was_renamed(&self) -> bool {
        self.source.file_name() != self.destination.file_name()
    }
}

/// Summary of a sampling run
#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub seed_dir: PathBuf,
    pub test_dir: PathBuf,
    pub requested_count: usize,
    pub seed: Option<u64>,
    pub extensions: ExtensionSet,
    pub candidates_found: usize,
    pub copied_files: Vec<CopiedFile>,
    pub generated_at: DateTime<Utc>,
}

impl SampleReport {
    pub fn new(
        seed_dir: PathBuf,
        test_dir: PathBuf,
        requested_count: usize,
        seed: Option<u64>,
        extensions: ExtensionSet,
        candidates_found: usize,
        copied_files: Vec<CopiedFile>,
    ) -> Self {
        Self {
            seed_dir,
            test_dir,
            requested_count,
            seed,
            extensions,
            candidates_found,
            copied_files,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.copied_files.is_empty()
    }

    pub fn copied_count(&self) -> usize {
        self.copied_files.len()
    }

    pub fn renamed_count(&self) -> usize {
        self.copied_files.iter().filter(|f| f.was_renamed()).count()
    }

    /// Destination paths in copy order
    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.copied_files.iter().map(|f| f.destination.as_path())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copied(source: &str, destination: &str) -> CopiedFile {
        CopiedFile {
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
        }
    }

    fn report(copied_files: Vec<CopiedFile>) -> SampleReport {
        SampleReport::new(
            PathBuf::from("/seed"),
            PathBuf::from("/out"),
            10,
            Some(7),
            ExtensionSet::normalize(["jpg"]),
            4,
            copied_files,
        )
    }

    #[test]
    fn test_was_renamed() {
        assert!(!copied("/seed/a/photo.jpg", "/out/photo.jpg").was_renamed());
        assert!(copied("/seed/b/photo.jpg", "/out/photo_1.jpg").was_renamed());
    }

    #[test]
    fn test_report_counts() {
        let report = report(vec![
            copied("/seed/a/photo.jpg", "/out/photo.jpg"),
            copied("/seed/b/photo.jpg", "/out/photo_1.jpg"),
        ]);
        assert!(!report.is_empty());
        assert_eq!(report.copied_count(), 2);
        assert_eq!(report.renamed_count(), 1);

        let destinations: Vec<&Path> = report.destinations().collect();
        assert_eq!(
            destinations,
            vec![Path::new("/out/photo.jpg"), Path::new("/out/photo_1.jpg")]
        );
    }

    #[test]
    fn test_report_json_shape() {
        let report = report(vec![copied("/seed/a.jpg", "/out/a.jpg")]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["requested_count"], 10);
        assert_eq!(value["seed"], 7);
        assert_eq!(value["extensions"], serde_json::json!([".jpg"]));
        assert_eq!(value["copied_files"][0]["destination"], "/out/a.jpg");
    }
}
