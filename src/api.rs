use crate::{
    clean::{self, CleanReport},
    config::{RunOptions, TargetMode, TargetRoot},
    manifest::{self, Manifest},
    materialize::{self, MaterializeReport},
    preview, prompt,
};
use colored::Colorize;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SproutError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] manifest::ManifestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Prompt(#[from] prompt::PromptError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Clean(#[from] clean::CleanError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Materialize(#[from] materialize::MaterializeError),
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub root: TargetRoot,
    pub cleaned: Option<CleanReport>,
    pub created: Option<MaterializeReport>,
}

/// Picks the target root for this run, prompting when asked to.
///
/// # Errors
///
/// Returns a [`SproutError`] if the prompt is canceled or a supplied folder
/// name fails validation.
pub fn resolve_target(mode: &TargetMode) -> Result<TargetRoot, SproutError> {
    let root = match mode {
        TargetMode::CurrentDir => TargetRoot::CurrentDir,
        TargetMode::Prompt => TargetRoot::Project(prompt::get_project_folder()?),
        TargetMode::Named(name) => TargetRoot::Project(prompt::check_folder_name(name)?),
    };

    log::debug!("target root: {}", root.path().display());

    Ok(root)
}

/// Loads the manifest, resolves the target root, optionally cleans, then
/// materializes every entry.
///
/// The manifest is loaded before any prompt so a missing or broken manifest
/// fails without user interaction or filesystem changes.
///
/// # Errors
///
/// Returns a [`SproutError`] if:
///
/// - The manifest is missing, empty, or malformed.
/// - The folder-name prompt is canceled or a supplied name is invalid.
/// - A file or directory cannot be removed during the clean pass.
/// - A directory or file cannot be created or written to.
/// - A binary entry holds invalid base64.
pub fn run(options: &RunOptions) -> Result<RunSummary, SproutError> {
    log::info!("reading manifest '{}'", options.manifest.display());

    let manifest = Manifest::load(&options.manifest)?;

    let root = resolve_target(&options.target)?;
    let root_path = root.path();

    if options.dry_run {
        preview::preview_as_tree(&manifest, &root_path);

        return Ok(RunSummary {
            root,
            cleaned: None,
            created: None,
        });
    }

    let cleaned = if options.clean {
        println!("{}", "Cleaning up existing files...".bold());

        Some(clean::clean_structure(&manifest, &root_path)?)
    } else {
        None
    };

    println!("{}", "Creating file structure...".bold());

    let created = materialize::create_structure(&manifest, &root_path)?;

    println!(
        "{} ({} files written, {} folders skipped, {} unrecognized)",
        "File structure created successfully!".green().bold(),
        created.files_written,
        created.folders_skipped,
        created.unrecognized
    );

    Ok(RunSummary {
        root,
        cleaned,
        created: Some(created),
    })
}
