//! Path containment checks for generated files.
//! Every rendered file path is resolved against its project directory and
//! rejected when the lexical resolution leaves that directory.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Lexically normalizes `path`: drops `.` segments and folds `..` into the
/// preceding segment. The filesystem is never consulted, so symlinks are not
/// followed.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component),
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Resolves `relative` against `base` and verifies the result stays inside it.
///
/// `relative` is expected to be already rendered. Absolute paths and `..`
/// segments are allowed as long as the final location is below `base`.
///
/// # Errors
/// * `Error::PathEscape` if the resolved path is `base` itself or lies outside it
pub fn resolve_within<P: AsRef<Path>>(base: P, relative: &str) -> Result<PathBuf> {
    let base = normalize(absolute(base.as_ref())?);
    let resolved = normalize(base.join(relative));

    if resolved == base || !resolved.starts_with(&base) {
        debug!("Rejected path '{}' outside of '{}'", relative, base.display());
        return Err(Error::PathEscape {
            path: relative.to_string(),
            base: base.display().to_string(),
        });
    }

    Ok(resolved)
}
