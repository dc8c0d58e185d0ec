//! Label files: one opaque text file per image, living under a labels directory.
//!
//! Writes go through a temporary file in the destination directory that is
//! renamed over the target, so readers see either the old or the new content.
//! Two clients writing the same label concurrently still race; the last rename wins.

use crate::{
    errors::{AppError, AppResult},
    security::Resolver,
    store::is_label_name,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;

pub const MAX_LABEL_BYTES: usize = 8 << 20;

/// Reads a label. `Ok(None)` means it has never been written.
pub fn read_label(resolver: &Resolver, labels_dir: &str, file: &str) -> AppResult<Option<String>> {
    let full = locate(resolver, labels_dir, file)?;
    match fs::read(&full) {
        Ok(bytes) => {
            let text = String::from_utf8(bytes)
                .map_err(|e| AppError::UnreadableLabel(io::Error::new(io::ErrorKind::InvalidData, e)))?;
            Ok(Some(text))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::UnreadableLabel(e)),
    }
}

/// Replaces the label's content, creating missing directories on the way.
pub fn write_label(
    resolver: &Resolver,
    labels_dir: &str,
    file: &str,
    content: &str,
    max_bytes: usize,
) -> AppResult<PathBuf> {
    let full = locate(resolver, labels_dir, file)?;
    if content.len() > max_bytes {
        return Err(AppError::BodyTooLarge);
    }
    let parent = full.parent().ok_or(AppError::PathEscape)?;
    fs::create_dir_all(parent).map_err(AppError::DirectoryCreationFailure)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(AppError::WriteFailure)?;
    tmp.write_all(content.as_bytes()).map_err(AppError::WriteFailure)?;
    tmp.as_file().sync_all().map_err(AppError::WriteFailure)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644)).map_err(AppError::WriteFailure)?;
    }
    tmp.persist(&full).map_err(|e| AppError::WriteFailure(e.error))?;

    debug!(path = %full.display(), bytes = content.len(), "label written");
    Ok(full)
}

fn locate(resolver: &Resolver, labels_dir: &str, file: &str) -> AppResult<PathBuf> {
    if labels_dir.is_empty() {
        return Err(AppError::MissingBaseDir);
    }
    if file.is_empty() {
        return Err(AppError::MissingRelativePath);
    }
    if !is_label_name(file) {
        return Err(AppError::InvalidLabelExtension);
    }
    resolver.resolve(labels_dir, file)
}
