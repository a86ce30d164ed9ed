use crate::models::CopiedFile;
use crate::utils::{copy_file_preserving_metadata, ensure_directory, resolve_destination};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copy each selected file into `dest_dir`, never overwriting anything.
///
/// The destination directory is created if missing. Name collisions, with
/// earlier runs or within this batch, get a `_N` counter before the
/// extension. Records come back in processing order. The first failed copy
/// aborts the batch; files copied before it stay on disk.
pub fn copy_samples<P: AsRef<Path>>(files: &[PathBuf], dest_dir: P) -> Result<Vec<CopiedFile>> {
    let dest_dir = dest_dir.as_ref();
    ensure_directory(dest_dir)?;

    let mut copied = Vec::with_capacity(files.len());
    for source in files {
        copied.push(copy_one(source, dest_dir)?);
    }

    info!("Copied {} files into {:?}", copied.len(), dest_dir);
    Ok(copied)
}

fn copy_one(source: &Path, dest_dir: &Path) -> Result<CopiedFile> {
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow!("Source path has no file name: {:?}", source))?;

    let destination = resolve_destination(dest_dir, file_name);
    if destination.file_name() != Some(file_name) {
        debug!("Name taken, using {:?} for {:?}", destination, source);
    }

    let bytes = copy_file_preserving_metadata(source, &destination)?;
    debug!("Copied {:?} -> {:?} ({} bytes)", source, destination, bytes);

    Ok(CopiedFile {
        source: source.to_path_buf(),
        destination,
    })
}
