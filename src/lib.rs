//! Tools for doing git things.
//!
//! Everything here drives the command-line `git`: [`Git`] wraps a working
//! directory and runs git subcommands in it, and [`Repo`] builds on that to
//! make throwaway repositories with predictable history for automated tests.
//!
//! ```no_run
//! use giterator::{Identity, Repo};
//!
//! # fn main() -> giterator::Result<()> {
//! let mut repo = Repo::temp()?;
//! repo.commit_content("a", None, Some("v1"), None)?;
//! repo.commit_content("b", None, None, Some("feature"))?;
//! assert_eq!(repo.list_tags()?, vec!["v1"]);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod fixture;
pub mod git;

pub use clock::Clock;
pub use config::Config;
pub use fixture::Repo;
pub use git::{
    CommandError, DateSpec, Error, Git, Identity, LogEntry, LogFormat, LogValue, Repository,
    Result, Source,
};
