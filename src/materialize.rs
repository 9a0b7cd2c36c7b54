use crate::{
    errors::{FileOperation, IoError},
    manifest::{resolve, Entry, Manifest},
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use colored::Colorize;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("I/O error within materialize domain")]
    #[diagnostic(code(sprout::materialize::io))]
    Io(#[from] IoError),

    #[error("Invalid base64 contents for binary file '{path}'")]
    #[diagnostic(
        code(sprout::materialize::decode),
        help("Entries with isBinary set must carry base64-encoded contents")
    )]
    Decode {
        path: String,
        #[source]
        source: base64::DecodeError,
    },
}

// Standard alphabet, padding optional on input.
const BINARY_CONTENTS: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// What happened to a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    SkippedFolder,
    Unrecognized,
}

/// Totals for one [`create_structure`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeReport {
    pub files_written: usize,
    pub folders_skipped: usize,
    pub unrecognized: usize,
}
impl MaterializeReport {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Written(_) => self.files_written += 1,
            Outcome::SkippedFolder => self.folders_skipped += 1,
            Outcome::Unrecognized => self.unrecognized += 1,
        }
    }
}

/// Creates `path` and every missing ancestor.
///
/// Succeeds without touching anything when the directory already exists.
///
/// # Errors
///
/// Returns an [`IoError`] if any part of the chain cannot be created, e.g. a
/// component exists as a regular file or permissions forbid it.
pub fn ensure_directory(path: &Path) -> Result<(), IoError> {
    if path.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.to_path_buf(), error))?;

    println!("{} {}", "mkdir".blue(), path.display());

    Ok(())
}

/// Writes the file described by one manifest entry under `root`.
///
/// Folder entries and unrecognized entry types leave the filesystem untouched.
/// Existing files at the target path are overwritten.
///
/// # Errors
///
/// Returns a [`MaterializeError`] if:
///
/// - A binary entry does not hold valid base64.
/// - The parent directory cannot be created.
/// - The file cannot be written.
pub fn materialize_entry(
    root: &Path,
    relative: &str,
    entry: &Entry,
) -> Result<Outcome, MaterializeError> {
    let (contents, is_binary) = match entry {
        Entry::File {
            contents,
            is_binary,
            ..
        } => (contents.as_deref().unwrap_or_default(), *is_binary),
        Entry::Folder { .. } => {
            log::debug!("skipping folder entry: {}", relative);

            println!("{} {}", "skip".yellow(), relative);

            return Ok(Outcome::SkippedFolder);
        }
        Entry::Unrecognized { kind, .. } => {
            log::warn!("ignoring entry '{}' with unrecognized type '{}'", relative, kind);

            println!("{} {} ({})", "ignore".yellow(), relative, kind);

            return Ok(Outcome::Unrecognized);
        }
    };

    let bytes = if is_binary {
        decode_binary(contents).map_err(|error| MaterializeError::Decode {
            path: relative.to_string(),
            source: error,
        })?
    } else {
        contents.as_bytes().to_vec()
    };

    let destination = resolve(root, relative);

    if let Some(parent) = destination.parent() {
        ensure_directory(parent)?;
    }

    write_file(&destination, &bytes)?;

    log::debug!(
        "wrote {} bytes for '{}' ({})",
        bytes.len(),
        relative,
        entry.name()
    );

    Ok(Outcome::Written(destination))
}

/// Materializes every manifest entry under `root`, in manifest order.
///
/// The root itself is created first. The first failure stops the pass; files
/// written before it are left in place.
///
/// # Errors
///
/// Returns the first [`MaterializeError`] encountered.
pub fn create_structure(
    manifest: &Manifest,
    root: &Path,
) -> Result<MaterializeReport, MaterializeError> {
    log::info!("creating file structure under '{}'", root.display());

    ensure_directory(root)?;

    let mut report = MaterializeReport::default();

    for (relative, entry) in manifest.entries() {
        let outcome = materialize_entry(root, relative, entry)?;

        report.record(&outcome);
    }

    Ok(report)
}

fn decode_binary(contents: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = contents
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    BINARY_CONTENTS.decode(compact)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    std::fs::write(path, bytes)
        .map_err(|error| IoError::new(FileOperation::Write, path.to_path_buf(), error))?;

    println!("{} {}", "create".green(), path.display());

    Ok(())
}
