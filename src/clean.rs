use crate::{
    errors::{FileOperation, IoError},
    manifest::{resolve, segments, Manifest},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CleanError {
    #[error("I/O error within clean domain")]
    #[diagnostic(code(sprout::clean::io))]
    Io(#[from] IoError),
}

/// Totals for one [`clean_structure`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub files_removed: usize,
    pub directories_removed: usize,
}

/// Removes the files a previous run materialized from `manifest`, then any of
/// their parent directories left empty, deepest first.
///
/// Only paths implied by file entries are touched. Non-empty directories and
/// `root` itself are left alone.
///
/// # Errors
///
/// Returns a [`CleanError`] if a file or directory exists but cannot be
/// removed or inspected.
pub fn clean_structure(manifest: &Manifest, root: &Path) -> Result<CleanReport, CleanError> {
    log::info!("cleaning existing files under '{}'", root.display());

    let mut report = CleanReport::default();

    for (relative, _) in manifest.files() {
        let path = resolve(root, relative);

        if !path.exists() {
            continue;
        }

        fs::remove_file(&path)
            .map_err(|error| IoError::new(FileOperation::Remove, path.clone(), error))?;

        println!("{} {}", "remove".red(), path.display());

        report.files_removed += 1;
    }

    for directory in parent_directories(manifest, root) {
        if !directory.is_dir() || !is_empty_dir(&directory)? {
            log::debug!("keeping directory: {}", directory.display());
            continue;
        }

        fs::remove_dir(&directory)
            .map_err(|error| IoError::new(FileOperation::RemoveDir, directory.clone(), error))?;

        println!("{} {}", "rmdir".red(), directory.display());

        report.directories_removed += 1;
    }

    Ok(report)
}

/// Distinct parent directories of every file entry, excluding `root`, ordered
/// deepest first so children are visited before their parents.
fn parent_directories(manifest: &Manifest, root: &Path) -> Vec<PathBuf> {
    let mut relatives = BTreeSet::new();

    for (relative, _) in manifest.files() {
        let mut parent: Vec<&str> = segments(relative).collect();
        parent.pop();

        // an empty parent is the root itself
        if !parent.is_empty() {
            relatives.insert(parent);
        }
    }

    let mut ordered: Vec<Vec<&str>> = relatives.into_iter().collect();
    // stable: ties keep lexical order
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));

    ordered
        .into_iter()
        .map(|parent| resolve(root, &parent.join("/")))
        .collect()
}

fn is_empty_dir(path: &Path) -> Result<bool, IoError> {
    let mut entries = fs::read_dir(path)
        .map_err(|error| IoError::new(FileOperation::ReadDir, path.to_path_buf(), error))?;

    Ok(entries.next().is_none())
}
