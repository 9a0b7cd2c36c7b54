use colored::Colorize;
use inquire::{validator::Validation, CustomUserError, InquireError, Text};
use miette::Diagnostic;
use std::io::{self, BufRead, IsTerminal, Write};
use thiserror::Error;

const FOLDER_NAME_HELP: &str = "Letters, numbers, '-', '_' and '.' only";

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Prompt canceled before a project folder name was given")]
    #[diagnostic(code(sprout::prompt::canceled))]
    Canceled,

    #[error("Invalid project folder name: '{name}'")]
    #[diagnostic(
        code(sprout::prompt::invalid_name),
        help("Letters, numbers, '-', '_' and '.' only")
    )]
    InvalidName { name: String },

    #[error("Unable to read the project folder name")]
    #[diagnostic(code(sprout::prompt::io))]
    Io(#[from] io::Error),

    #[error("Error occurred trying to prompt user")]
    #[diagnostic(code(sprout::prompt::inquire))]
    Inquire(#[source] InquireError),
}
impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Canceled
            }
            other => PromptError::Inquire(other),
        }
    }
}

pub fn is_valid_folder_name(name: &str) -> bool {
    lazy_static::lazy_static! {
        static ref FOLDER_NAME_REGEX: regex::Regex =
            regex::Regex::new(r"^[A-Za-z0-9\-_.]+$").expect("a valid regex pattern");
    }

    FOLDER_NAME_REGEX.is_match(name)
}

fn validate_folder_name(input: &str) -> Result<Validation, CustomUserError> {
    if is_valid_folder_name(input) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(FOLDER_NAME_HELP.into()))
    }
}

/// Validates a folder name supplied without a prompt, where there is no one to
/// ask again.
pub fn check_folder_name(name: &str) -> Result<String, PromptError> {
    if is_valid_folder_name(name) {
        Ok(name.to_string())
    } else {
        Err(PromptError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Asks for the project folder name until a valid one is given.
///
/// Uses an interactive prompt on a terminal and falls back to reading lines
/// from stdin otherwise.
///
/// # Errors
///
/// Returns [`PromptError::Canceled`] when the user escapes, interrupts, or
/// input ends before a valid name arrives.
pub fn get_project_folder() -> Result<String, PromptError> {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        let answer = Text::new("Project folder name:")
            .with_help_message(FOLDER_NAME_HELP)
            .with_validator(validate_folder_name)
            .prompt()?;

        return Ok(answer);
    }

    log::debug!("stdin is not a terminal, reading folder name line by line");

    read_folder_name(stdin.lock(), io::stdout().lock())
}

/// Line-based prompt loop: writes the question to `output`, reads one line
/// from `input`, and asks again on empty or invalid answers.
pub fn read_folder_name<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<String, PromptError> {
    loop {
        write!(output, "Project folder name: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::Canceled);
        }

        let answer = line.trim_end_matches(['\r', '\n']);

        if answer.is_empty() {
            writeln!(output, "{}", "A project folder name is required".red())?;
        } else if is_valid_folder_name(answer) {
            return Ok(answer.to_string());
        } else {
            log::debug!("rejected folder name: {:?}", answer);

            writeln!(output, "{} {}", "Invalid name.".red(), FOLDER_NAME_HELP)?;
        }
    }
}
