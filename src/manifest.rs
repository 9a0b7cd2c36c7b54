use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Default manifest file name, looked up in the current working directory.
pub const MANIFEST_FILE_NAME: &str = "base.json";

#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("Manifest not found at '{path}'")]
    #[diagnostic(
        code(sprout::manifest::not_found),
        help("Run from the directory holding the manifest, or pass --manifest <PATH>")
    )]
    NotFound { path: PathBuf },

    #[error("Manifest at '{path}' is empty")]
    #[diagnostic(
        code(sprout::manifest::empty),
        help("The manifest must be a JSON object mapping paths to entries")
    )]
    Empty { path: PathBuf },

    #[error("I/O error within manifest domain")]
    #[diagnostic(code(sprout::manifest::io))]
    Io(#[from] IoError),

    #[error("Unable to parse manifest at '{path}': {source}")]
    #[diagnostic(code(sprout::manifest::parse), help("Review the manifest JSON"))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One manifest value.
///
/// Folder entries are descriptive only; directories come into existence as
/// ancestors of file entries. Any `type` tag other than `file` or `folder` is
/// kept as [`Entry::Unrecognized`] so callers can report it instead of
/// dropping it on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEntry")]
pub enum Entry {
    File {
        name: String,
        contents: Option<String>,
        is_binary: bool,
    },
    Folder {
        name: String,
    },
    Unrecognized {
        kind: String,
        name: String,
    },
}
impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name } | Self::Unrecognized { name, .. } => {
                name
            }
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }
}

// Wire shape of an entry, before the `type` tag is resolved.
#[derive(Debug, Deserialize)]
struct RawEntry {
    r#type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    contents: Option<String>,
    #[serde(default, rename = "isBinary")]
    is_binary: Option<bool>,
}
impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        match raw.r#type.as_str() {
            "file" => Entry::File {
                name: raw.name,
                contents: raw.contents,
                is_binary: raw.is_binary.unwrap_or(false),
            },
            "folder" => Entry::Folder { name: raw.name },
            _ => Entry::Unrecognized {
                kind: raw.r#type,
                name: raw.name,
            },
        }
    }
}

/// Ordered mapping from forward-slash relative paths to [`Entry`] values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest(pub IndexMap<String, Entry>);
impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] if:
    ///
    /// - The file does not exist.
    /// - The file is empty or holds only whitespace.
    /// - The file cannot be read.
    /// - The contents are not a JSON object of entries.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => ManifestError::NotFound {
                path: path.to_path_buf(),
            },
            _ => IoError::new(FileOperation::Read, path.to_path_buf(), error).into(),
        })?;

        if content.trim().is_empty() {
            return Err(ManifestError::Empty {
                path: path.to_path_buf(),
            });
        }

        let manifest = Self::parse(&content).map_err(|error| ManifestError::Parse {
            path: path.to_path_buf(),
            source: error,
        })?;

        log::debug!(
            "loaded manifest '{}' with {} entries",
            path.display(),
            manifest.len()
        );

        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in manifest order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.0.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Only the file entries, in manifest order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries().filter(|(_, entry)| entry.is_file())
    }
}

/// Components of a forward-slash manifest path, without empty or `.` segments.
pub fn segments(relative: &str) -> impl Iterator<Item = &str> {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
}

/// Joins a forward-slash manifest path onto `root`, one component at a time.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    segments(relative).fold(root.to_path_buf(), |path, segment| path.join(segment))
}
