use crate::error::SamplerError;
use crate::models::ExtensionSet;
use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

/// Check that the seed directory exists and is a directory
pub fn validate_seed_dir<P: AsRef<Path>>(seed_dir: P) -> Result<(), SamplerError> {
    let path = seed_dir.as_ref();

    if !path.exists() {
        return Err(SamplerError::SeedDirNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SamplerError::NotADirectory(path.to_path_buf()));
    }

    Ok(())
}

/// Check if the file's last suffix, lowercased, is in the set.
/// `x.tar.gz` is matched on `.gz` only.
pub fn matches_extensions(path: &Path, extensions: &ExtensionSet) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
        .unwrap_or(false)
}

/// Create the directory and any missing parents. No-op if it already exists.
pub fn ensure_directory<P: AsRef<Path>>(directory: P) -> Result<()> {
    let dir_path = directory.as_ref();
    fs::create_dir_all(dir_path)
        .with_context(|| format!("Failed to create directory: {:?}", dir_path))
}

/// First free path for `file_name` inside `dest_dir`: `name.ext`, then
/// `name_1.ext`, `name_2.ext`, ...
///
/// Probes the filesystem on every call, so it must be called right before the
/// copy it guards. The probe-then-copy sequence is not atomic: it assumes no
/// other process writes into `dest_dir` during the run.
pub fn resolve_destination(dest_dir: &Path, file_name: &OsStr) -> PathBuf {
    let destination = dest_dir.join(file_name);
    if !entry_exists(&destination) {
        return destination;
    }

    let original = Path::new(file_name);
    let stem = original.file_stem().unwrap_or(file_name);
    let extension = original.extension();

    let mut counter: u64 = 1;
    loop {
        let candidate = dest_dir.join(suffixed_name(stem, counter, extension));
        if !entry_exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn suffixed_name(stem: &OsStr, counter: u64, extension: Option<&OsStr>) -> OsString {
    let mut name = OsString::from(stem);
    name.push(format!("_{}", counter));
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Any directory entry counts, dangling symlinks included
fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Copy bytes, permissions and access/modification times from `source` to
/// `destination`. Returns the number of bytes copied.
pub fn copy_file_preserving_metadata<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
) -> Result<u64> {
    let src_path = source.as_ref();
    let dest_path = destination.as_ref();

    let metadata = fs::metadata(src_path)
        .with_context(|| format!("Failed to read metadata for: {:?}", src_path))?;

    let bytes = fs::copy(src_path, dest_path)
        .with_context(|| format!("Failed to copy file from {:?} to {:?}", src_path, dest_path))?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    // fs::copy already carried the permissions over; a read-only copy has to be
    // opened writable to stamp its times.
    let permissions = metadata.permissions();
    if permissions.readonly() {
        let mut writable = permissions.clone();
        writable.set_readonly(false);
        fs::set_permissions(dest_path, writable)
            .with_context(|| format!("Failed to update permissions for: {:?}", dest_path))?;
    }

    File::options()
        .write(true)
        .open(dest_path)
        .and_then(|file| file.set_times(times))
        .with_context(|| format!("Failed to set file times for: {:?}", dest_path))?;

    if permissions.readonly() {
        fs::set_permissions(dest_path, permissions)
            .with_context(|| format!("Failed to restore permissions for: {:?}", dest_path))?;
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_matches_extensions() {
        let extensions = ExtensionSet::normalize([".jpg", ".png"]);
        assert!(matches_extensions(Path::new("a.jpg"), &extensions));
        assert!(matches_extensions(Path::new("d.png"), &extensions));
        assert!(!matches_extensions(Path::new("b.txt"), &extensions));
        assert!(!matches_extensions(Path::new("noext"), &extensions));
        assert!(!matches_extensions(Path::new(".jpg"), &extensions));
    }

    #[test]
    fn test_matches_extensions_case_insensitive() {
        let extensions = ExtensionSet::normalize(["jpg"]);
        assert!(matches_extensions(Path::new("c.JPG"), &extensions));
        assert!(matches_extensions(Path::new("c.Jpg"), &extensions));
    }

    #[test]
    fn test_matches_last_suffix_only() {
        let extensions = ExtensionSet::normalize([".gz"]);
        assert!(matches_extensions(Path::new("x.tar.gz"), &extensions));

        let extensions = ExtensionSet::normalize([".tar.gz"]);
        assert!(!matches_extensions(Path::new("x.tar.gz"), &extensions));
    }

    #[test]
    fn test_validate_seed_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_seed_dir(temp_dir.path()).is_ok());

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            validate_seed_dir(&missing),
            Err(SamplerError::SeedDirNotFound(_))
        ));

        let file = temp_dir.path().join("file.jpg");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            validate_seed_dir(&file),
            Err(SamplerError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        ensure_directory(&nested).unwrap();
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_resolve_destination_increments_counter() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let name = OsStr::new("photo.jpg");

        assert_eq!(resolve_destination(dir, name), dir.join("photo.jpg"));

        fs::write(dir.join("photo.jpg"), "0").unwrap();
        assert_eq!(resolve_destination(dir, name), dir.join("photo_1.jpg"));

        fs::write(dir.join("photo_1.jpg"), "1").unwrap();
        assert_eq!(resolve_destination(dir, name), dir.join("photo_2.jpg"));
    }

    #[test]
    fn test_resolve_destination_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        fs::write(dir.join("README"), "x").unwrap();
        assert_eq!(
            resolve_destination(dir, OsStr::new("README")),
            dir.join("README_1")
        );

        fs::write(dir.join("x.tar.gz"), "x").unwrap();
        assert_eq!(
            resolve_destination(dir, OsStr::new("x.tar.gz")),
            dir.join("x.tar_1.gz")
        );
    }

    #[test]
    fn test_copy_preserves_content_and_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src.jpg");
        let destination = temp_dir.path().join("dst.jpg");
        fs::write(&source, b"image bytes").unwrap();

        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        let bytes = copy_file_preserving_metadata(&source, &destination).unwrap();

        assert_eq!(bytes, 11);
        assert_eq!(fs::read(&destination).unwrap(), b"image bytes");
        assert_eq!(fs::metadata(&destination).unwrap().modified().unwrap(), mtime);
    }

    #[test]
    fn test_copy_keeps_read_only_flag() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("locked.png");
        let destination = temp_dir.path().join("copy.png");
        fs::write(&source, b"png").unwrap();

        let mut permissions = fs::metadata(&source).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&source, permissions).unwrap();

        copy_file_preserving_metadata(&source, &destination).unwrap();

        assert!(fs::metadata(&destination).unwrap().permissions().readonly());
        assert_eq!(fs::read(&destination).unwrap(), b"png");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = copy_file_preserving_metadata(
            temp_dir.path().join("gone.jpg"),
            temp_dir.path().join("out.jpg"),
        );
        assert!(result.is_err());
        assert!(!temp_dir.path().join("out.jpg").exists());
    }
}
