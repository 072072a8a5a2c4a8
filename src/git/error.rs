use std::fmt;
use std::process::ExitStatus;

use thiserror::Error;

/// A git process exited with a non-zero status.
///
/// The rendered message names the command line, the return code and
/// everything the process wrote to stdout and stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    pub command: Vec<String>,
    pub return_code: i32,
    pub output: String,
}

impl CommandError {
    pub(crate) fn new(command: Vec<String>, status: ExitStatus, output: String) -> CommandError {
        CommandError {
            command,
            return_code: return_code(status),
            output,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' gave return code {}:\n\n{}\n\n",
            self.command.join(" "),
            self.return_code,
            self.output
        )
    }
}

impl std::error::Error for CommandError {}

#[cfg(unix)]
fn return_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => -signal,
        (None, None) => -1,
    }
}

#[cfg(not(unix))]
fn return_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Describes the error conditions that might arise from giterator `Git` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for giterator `Git` operations.
pub type Result<T> = std::result::Result<T, Error>;
