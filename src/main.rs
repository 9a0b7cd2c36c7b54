use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use sprout::{
    config::{RunOptions, TargetMode},
    manifest::MANIFEST_FILE_NAME,
};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clean")
                .long("clean")
                .help("Remove files from a previous run, and directories left empty, before creating")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .help("Prompt for a project folder to create the structure in")
                .action(ArgAction::SetTrue)
                .conflicts_with("name"),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help("Project folder to create the structure in, without prompting"),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .value_name("PATH")
                .help("Manifest describing the file structure")
                .default_value(MANIFEST_FILE_NAME),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Preview the structure without touching the filesystem")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let options = build_options(&matches);

    sprout::api::run(&options)?;

    Ok(())
}

fn init_logging(is_verbose: bool) {
    let level = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn build_options(args: &ArgMatches) -> RunOptions {
    let target = if let Some(name) = args.get_one::<String>("name") {
        TargetMode::Named(name.clone())
    } else if args.get_flag("project") {
        TargetMode::Prompt
    } else {
        TargetMode::CurrentDir
    };

    RunOptions {
        manifest: args
            .get_one::<String>("manifest")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(MANIFEST_FILE_NAME)),
        clean: args.get_flag("clean"),
        dry_run: args.get_flag("dry-run"),
        target,
    }
}
