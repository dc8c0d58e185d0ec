//! Confinement of client-supplied relative paths to a declared base directory.
//!
//! The default check is lexical: `.` and `..` segments are folded before the
//! containment test and symlinks are taken at face value, so a link inside the
//! base that points elsewhere is followed by later I/O. Deployments that do not
//! trust the contents of their base directories can turn on the symlink check,
//! which re-tests containment against the physical (canonicalized) paths.

use crate::errors::{AppError, AppResult};
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    symlink_check: bool,
}

impl Resolver {
    pub fn lexical() -> Self {
        Self { symlink_check: false }
    }

    pub fn with_symlink_check(symlink_check: bool) -> Self {
        Self { symlink_check }
    }

    /// Joins `rel` onto `base` and returns the cleaned absolute result, or
    /// `PathEscape` if it lands outside `base`.
    pub fn resolve(&self, base: &str, rel: &str) -> AppResult<PathBuf> {
        let full = resolve(base, rel)?;
        if self.symlink_check {
            let base_abs = absolute_dir(base).map_err(AppError::CanonicalizationFailure)?;
            let phys_base = physical(&base_abs).map_err(AppError::CanonicalizationFailure)?;
            let phys_full = physical(&full).map_err(AppError::CanonicalizationFailure)?;
            if !phys_full.starts_with(&phys_base) {
                return Err(AppError::PathEscape);
            }
        }
        Ok(full)
    }
}

/// Lexical resolution of `rel` under `base`. `base` does not need to exist.
pub fn resolve(base: &str, rel: &str) -> AppResult<PathBuf> {
    if base.is_empty() {
        return Err(AppError::MissingBaseDir);
    }
    if rel.is_empty() {
        return Err(AppError::MissingRelativePath);
    }
    let rel_path = Path::new(rel);
    if rel_path.is_absolute() || rel_path.has_root() {
        return Err(AppError::AbsoluteRelativePathRejected);
    }
    let base_abs = absolute_dir(base).map_err(AppError::CanonicalizationFailure)?;
    let full = clean(&base_abs.join(rel_path));
    match full.strip_prefix(&base_abs) {
        Ok(_) => Ok(full),
        Err(_) => Err(AppError::PathEscape),
    }
}

/// Absolute, lexically cleaned form of `dir`, relative inputs being taken
/// against the process working directory.
pub fn absolute_dir(dir: impl AsRef<Path>) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    if dir.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }
    let joined = if dir.is_absolute() { dir.to_path_buf() } else { std::env::current_dir()?.join(dir) };
    Ok(clean(&joined))
}

/// Folds `.` and `..` without touching the filesystem. `..` at the root stays at the root.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

// canonicalize the deepest existing ancestor and re-append the rest
fn physical(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        match dunce::canonicalize(existing) {
            Ok(mut canon) => {
                for part in missing.iter().rev() {
                    canon.push(part);
                }
                return Ok(canon);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(e);
                };
                missing.push(name.to_os_string());
                existing = parent;
            }
            Err(e) => return Err(e),
        }
    }
}
