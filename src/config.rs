//! Process-level settings for giterator.
//!
//! Configuration comes from the environment:
//!
//! * `GITERATOR_GIT` names the git executable to run (default `git`,
//!   looked up on `PATH`).
//! * `RUST_LOG` controls log output from the `giterator` binary.

use std::{env, ffi::OsString};

/// Environment variable naming the git executable.
pub const GIT_PROGRAM_VAR: &str = "GITERATOR_GIT";

const DEFAULT_GIT_PROGRAM: &str = "git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub git_program: OsString,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|name| env::var_os(name))
    }

    /// Reads configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let git_program = lookup(GIT_PROGRAM_VAR)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| OsString::from(DEFAULT_GIT_PROGRAM));

        Config { git_program }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            git_program: OsString::from(DEFAULT_GIT_PROGRAM),
        }
    }
}
