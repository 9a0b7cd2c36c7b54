use crate::manifest::MANIFEST_FILE_NAME;
use std::path::{Path, PathBuf};

/// How the target root is chosen for a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetMode {
    /// Materialize straight into the current working directory.
    #[default]
    CurrentDir,
    /// Ask for a project folder name.
    Prompt,
    /// Project folder name supplied up front.
    Named(String),
}

/// Directory every manifest path is resolved against. Chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRoot {
    CurrentDir,
    Project(String),
}
impl TargetRoot {
    pub fn path(&self) -> PathBuf {
        match self {
            Self::CurrentDir => PathBuf::from("."),
            Self::Project(name) => PathBuf::from(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub manifest: PathBuf,
    pub clean: bool,
    pub dry_run: bool,
    pub target: TargetMode,
}
impl Default for RunOptions {
    fn default() -> Self {
        Self {
            manifest: Path::new(MANIFEST_FILE_NAME).to_path_buf(),
            clean: false,
            dry_run: false,
            target: TargetMode::default(),
        }
    }
}
