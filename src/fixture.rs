use std::{
    fs,
    ops::Deref,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::clock::Clock;
use crate::git::{DateSpec, Git, Identity, Repository, Result, Source};

/// Name configured on fixture repositories unless told otherwise.
pub const DEFAULT_NAME: &str = "Giterator";

/// Email configured on fixture repositories unless told otherwise.
pub const DEFAULT_EMAIL: &str = "giterator@example.com";

/// Message used for commits made by [`Repo::commit_content`].
pub const CONTENT_COMMIT_MESSAGE: &str = "a commit";

/// Returns the identity fixture repositories are created with.
pub fn default_identity() -> Identity {
    Identity::new(DEFAULT_NAME, DEFAULT_EMAIL)
}

/// A `Repo` is a git repository for use in automated tests.
///
/// It wraps a [`Git`] handle (all of whose operations are available through
/// `Deref`) and adds helpers for building up history quickly. Commits made
/// without an explicit time take successive readings of an internal
/// [`Clock`], so fixture history is the same on every run.
///
/// Because a repo made with [`Repo::temp`] owns its temporary directory,
/// that directory is deleted when the repo is dropped.
#[derive(Debug)]
pub struct Repo {
    git: Git,
    clock: Clock,
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: Option<tempfile::TempDir>,
}

impl Repo {
    /// Creates (or re-initializes) a repository at `path`, configured with
    /// `identity` or, if `None`, the [default identity](default_identity).
    pub fn make<P: Into<PathBuf>>(path: P, identity: Option<Identity>) -> Result<Repo> {
        let mut git = Git::new(path);
        git.initialize(Some(identity.unwrap_or_else(default_identity)))?;
        Ok(Repo::from_git(git))
    }

    /// Creates a repository named `name` within `container`.
    pub fn make_in<P: AsRef<Path>>(container: P, name: &str) -> Result<Repo> {
        Repo::make(container.as_ref().join(name), None)
    }

    /// Creates a repository named `local` within `container`.
    pub fn make_local<P: AsRef<Path>>(container: P) -> Result<Repo> {
        Repo::make_in(container, "local")
    }

    /// Creates a repository named `local` in a new temporary directory.
    ///
    /// Clones of it are made alongside `local`, so they are removed with the
    /// directory when the repo is dropped.
    pub fn temp() -> Result<Repo> {
        let tempdir = tempfile::tempdir()?;
        let mut repo = Repo::make_local(tempdir.path())?;
        repo.tempdir = Some(tempdir);
        Ok(repo)
    }

    /// Commits everything in the working directory. Unless given separately,
    /// the committer date is the same as the author date.
    pub fn commit(
        &self,
        message: &str,
        author_date: Option<DateSpec>,
        commit_date: Option<DateSpec>,
    ) -> Result<String> {
        let commit_date = commit_date.or_else(|| author_date.clone());
        self.git.commit(message, author_date, commit_date)
    }

    /// Writes `"<prefix> content"` to a file named `prefix` and commits it at
    /// `time`, or at the next reading of the repo's clock.
    ///
    /// If `branch` is given, it is created and checked out first. If `tag` is
    /// given, the new commit is tagged with it.
    ///
    /// Returns the short hash of the new commit.
    pub fn commit_content(
        &mut self,
        prefix: &str,
        time: Option<DateTime<Utc>>,
        tag: Option<&str>,
        branch: Option<&str>,
    ) -> Result<String> {
        if let Some(branch) = branch {
            self.git.create_branch(branch)?;
        }

        fs::write(self.git.path().join(prefix), format!("{} content", prefix))?;

        let time = time.unwrap_or_else(|| self.clock.now());
        let hash = self.commit(CONTENT_COMMIT_MESSAGE, Some(time.into()), None)?;

        if let Some(tag) = tag {
            self.git.tag(tag)?;
        }

        info!(file = prefix, %hash, %time, "committed fixture content");
        Ok(hash)
    }
}

impl Deref for Repo {
    type Target = Git;

    fn deref(&self) -> &Git {
        &self.git
    }
}

impl Repository for Repo {
    fn git(&self) -> &Git {
        &self.git
    }

    fn from_git(git: Git) -> Repo {
        Repo {
            git,
            clock: Clock::new(),
            tempdir: None,
        }
    }
}

impl<'a> From<&'a Repo> for Source<'a> {
    fn from(repo: &'a Repo) -> Source<'a> {
        Source::Repository(repo.git())
    }
}
