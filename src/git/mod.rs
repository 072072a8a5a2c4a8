//! Runs the `git` executable against a working directory.
//!
//! ## Design Goals
//!
//! `Git` is a thin handle: it owns a path and the identity last configured
//! for it, and every operation is a single blocking invocation of the
//! command-line git. Output from stdout and stderr is captured together, in
//! the order git wrote it, and any non-zero exit becomes a [`CommandError`].
//!
//! Handles are not synchronized. Git's own locking protects the repository,
//! but sequences such as "commit then resolve HEAD" are not atomic.

use std::{
    collections::BTreeMap,
    ffi::{OsStr, OsString},
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use tracing::{debug, info};

use crate::config::Config;

mod date;
pub use date::DateSpec;

mod error;
pub use error::{CommandError, Error, Result};

mod identity;
pub use identity::Identity;

mod log;
pub use log::{LogEntry, LogFormat, LogValue};

/// A handle on a (possibly not yet created) git working directory.
#[derive(Debug, Clone)]
pub struct Git {
    path: PathBuf,
    identity: Option<Identity>,
    config: Config,
}

impl Git {
    /// Creates a handle for `path`, running the git named by the environment
    /// (see [`Config::from_env`]). Nothing is touched on disk.
    pub fn new<P: Into<PathBuf>>(path: P) -> Git {
        Git::with_config(path, Config::from_env())
    }

    pub fn with_config<P: Into<PathBuf>>(path: P, config: Config) -> Git {
        Git {
            path: path.into(),
            identity: None,
            config,
        }
    }

    /// Returns the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Returns the identity most recently configured through this handle.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `git <args>` in the working directory and returns its combined
    /// stdout and stderr.
    pub fn invoke<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.invoke_with(args, &[], None)
    }

    /// Runs `git <args>` with extra environment variables layered over the
    /// inherited environment, in `cwd` if given, else the working directory.
    pub fn invoke_with<I, S>(&self, args: I, env: &[(&str, &str)], cwd: Option<&Path>) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let cwd = cwd.unwrap_or(&self.path);

        let command_line: Vec<String> = std::iter::once(self.config.git_program.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(|word| word.to_string_lossy().into_owned())
            .collect();

        debug!(command = %command_line.join(" "), cwd = %cwd.display(), "running git");

        let (mut reader, writer) = io::pipe()?;

        let mut command = Command::new(&self.config.git_program);
        command
            .args(&args)
            .current_dir(cwd)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);

        let mut child = command.spawn()?;

        // The command keeps a copy of the pipe's write end; the read below
        // only sees EOF once it is gone.
        drop(command);

        let mut output = Vec::new();
        reader.read_to_end(&mut output)?;
        let status = child.wait()?;

        let output = String::from_utf8_lossy(&output).into_owned();

        if !status.success() {
            return Err(CommandError::new(command_line, status, output).into());
        }

        Ok(output)
    }

    /// Creates the working directory (and any missing parents), runs
    /// `git init` there and configures `identity`, if any, as the local user.
    ///
    /// Running this on an existing repository is harmless.
    pub fn initialize(&mut self, identity: Option<Identity>) -> Result<()> {
        fs::create_dir_all(&self.path)?;
        self.invoke(["init"])?;
        info!(path = %self.path.display(), "initialized repository");
        self.configure_identity(identity)
    }

    fn configure_identity(&mut self, identity: Option<Identity>) -> Result<()> {
        if let Some(identity) = identity {
            self.invoke(["config", "user.name", identity.name()])?;
            self.invoke(["config", "user.email", identity.email()])?;
            self.identity = Some(identity);
        }
        Ok(())
    }

    /// Stages everything in the working directory, deletions included, and
    /// commits it. `author_date` is passed as `--date` and `commit_date` as
    /// `GIT_COMMITTER_DATE`.
    ///
    /// Returns the short hash of the new commit.
    pub fn commit(
        &self,
        message: &str,
        author_date: Option<DateSpec>,
        commit_date: Option<DateSpec>,
    ) -> Result<String> {
        self.invoke(["add", "."])?;

        let mut args = vec!["commit".to_string(), "-m".to_string(), message.to_string()];
        if let Some(date) = author_date {
            args.push(format!("--date={}", date.to_git()));
        }

        let commit_date = commit_date.map(|d| d.to_git());
        let env: Vec<(&str, &str)> = commit_date
            .iter()
            .map(|d| ("GIT_COMMITTER_DATE", d.as_str()))
            .collect();

        self.invoke_with(&args, &env, None)?;
        self.resolve_revision("HEAD")
    }

    /// Returns the short hash for a branch, tag or other revision.
    pub fn resolve_revision(&self, label: &str) -> Result<String> {
        let output = self.invoke(["rev-parse", "--verify", "-q", "--short", label])?;
        Ok(output.trim().to_string())
    }

    /// Tags `HEAD`.
    pub fn tag(&self, name: &str) -> Result<()> {
        self.invoke(["tag", name])?;
        Ok(())
    }

    /// Lists tags in git's (lexicographic) order.
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let output = self.invoke(["tag"])?;
        Ok(split_words(&output))
    }

    pub fn tag_hashes(&self) -> Result<BTreeMap<String, String>> {
        self.hashes(self.list_tags()?)
    }

    /// Creates a branch at `HEAD` and switches to it.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.invoke(["checkout", "-b", name])?;
        Ok(())
    }

    pub fn list_branches(&self) -> Result<Vec<String>> {
        let output = self.invoke(["for-each-ref", "--format=%(refname:short)", "refs/heads/"])?;
        Ok(split_words(&output))
    }

    pub fn branch_hashes(&self) -> Result<BTreeMap<String, String>> {
        self.hashes(self.list_branches()?)
    }

    fn hashes(&self, labels: Vec<String>) -> Result<BTreeMap<String, String>> {
        labels
            .into_iter()
            .map(|label| {
                let hash = self.resolve_revision(&label)?;
                Ok::<_, Error>((label, hash))
            })
            .collect()
    }

    /// Reads the given attributes of every commit reachable from `HEAD`,
    /// newest first.
    pub fn log(&self, attributes: &[LogFormat]) -> Result<Vec<LogEntry>> {
        let output = self.invoke(["log".to_string(), log::format_arg(attributes)])?;
        Ok(output
            .lines()
            .map(|line| LogEntry::parse(attributes, line))
            .collect())
    }
}

fn split_words(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}

/// Where a clone comes from: a plain path or an existing handle.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Path(&'a Path),
    Repository(&'a Git),
}

impl<'a> Source<'a> {
    pub fn path(&self) -> &'a Path {
        match *self {
            Source::Path(path) => path,
            Source::Repository(git) => git.path(),
        }
    }

    pub(crate) fn identity(&self) -> Option<&'a Identity> {
        match *self {
            Source::Path(_) => None,
            Source::Repository(git) => git.identity(),
        }
    }

    fn config(&self) -> Config {
        match *self {
            Source::Path(_) => Config::from_env(),
            Source::Repository(git) => git.config().clone(),
        }
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Source<'a> {
        Source::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Source<'a> {
        Source::Path(path.as_path())
    }
}

impl<'a> From<&'a Git> for Source<'a> {
    fn from(git: &'a Git) -> Source<'a> {
        Source::Repository(git)
    }
}

/// A struct that implements `Repository` wraps a [`Git`] handle and can be
/// rebuilt from one, so that operations creating new repositories hand back
/// the caller's own type.
pub trait Repository: Sized {
    fn git(&self) -> &Git;

    fn from_git(git: Git) -> Self;

    /// Clones `source` into `destination`, which is taken relative to the
    /// directory containing the source repository.
    ///
    /// Without an explicit `identity`, a handle source passes on the identity
    /// it was configured with. A plain path source configures none.
    fn clone_repo<'a, S, P>(source: S, destination: P, identity: Option<Identity>) -> Result<Self>
    where
        S: Into<Source<'a>>,
        P: AsRef<Path>,
    {
        let source = source.into();
        let identity = identity.or_else(|| source.identity().cloned());

        let source_path = std::path::absolute(source.path())?;
        let parent = source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| source_path.clone());
        let destination = parent.join(destination);

        let mut git = Git::with_config(&destination, source.config());
        git.invoke_with(
            [
                OsStr::new("clone"),
                source_path.as_os_str(),
                destination.as_os_str(),
            ],
            &[],
            Some(&parent),
        )?;

        info!(
            source = %source_path.display(),
            destination = %destination.display(),
            "cloned repository"
        );

        git.configure_identity(identity)?;
        Ok(Self::from_git(git))
    }
}

impl Repository for Git {
    fn git(&self) -> &Git {
        self
    }

    fn from_git(git: Git) -> Git {
        git
    }
}

#[cfg(test)]
mod tests {
    use std::{ffi::OsString, fs};

    use super::*;

    fn identity() -> Identity {
        Identity::new("Foo Bar", "foo@example.com")
    }

    #[test]
    fn init() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("foo");
        fs::create_dir_all(&path).unwrap();

        Git::new(&path).initialize(None).unwrap();
        assert!(path.join(".git").is_dir());
    }

    #[test]
    fn init_make_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("foo/bar");

        let mut git = Git::new(&path);
        git.initialize(None).unwrap();

        assert!(path.join(".git").is_dir());
        assert_eq!(git.path(), path.as_path());
        assert_eq!(git.identity(), None);
    }

    #[test]
    fn init_twice() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut git = Git::new(temp_dir.path());
        git.initialize(None).unwrap();
        git.initialize(None).unwrap();
        assert!(temp_dir.path().join(".git").is_dir());
    }

    #[test]
    fn init_with_identity() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("foo");

        let mut git = Git::new(&path);
        git.initialize(Some(identity())).unwrap();

        let config = fs::read_to_string(path.join(".git/config")).unwrap();
        assert!(config.contains("name = Foo Bar"), "{}", config);
        assert!(config.contains("email = foo@example.com"), "{}", config);

        assert_eq!(git.identity(), Some(&identity()));
        assert_eq!(git.invoke(["config", "user.name"]).unwrap(), "Foo Bar\n");
    }

    #[test]
    fn unknown_command() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut git = Git::new(temp_dir.path());
        git.initialize(None).unwrap();

        let err = git.invoke(["bogus"]).unwrap_err();
        if let Error::Command(err) = &err {
            assert_eq!(err.command, vec!["git", "bogus"]);
            assert_eq!(err.return_code, 1);
            assert!(err.output.contains("bogus"), "{}", err.output);
        } else {
            panic!("wrong error: {:?}", err);
        }

        let msg = err.to_string();
        assert!(msg.starts_with("'git bogus' gave return code 1:\n\n"), "{}", msg);
        assert!(msg.ends_with("\n\n"), "{}", msg);
    }

    #[test]
    fn stderr_is_captured() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut git = Git::new(temp_dir.path());
        git.initialize(None).unwrap();

        let err = git.invoke(["checkout", "no-such-branch"]).unwrap_err();
        if let Error::Command(err) = err {
            assert_ne!(err.return_code, 0);
            assert!(err.output.contains("no-such-branch"), "{}", err.output);
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn env_is_layered_over_inherited() {
        let temp_dir = tempfile::tempdir().unwrap();
        let git = Git::new(temp_dir.path());

        let output = git
            .invoke_with(
                ["var", "GIT_COMMITTER_IDENT"],
                &[
                    ("GIT_COMMITTER_NAME", "Env Person"),
                    ("GIT_COMMITTER_EMAIL", "env@example.com"),
                    ("GIT_COMMITTER_DATE", "@0 +0000"),
                ],
                None,
            )
            .unwrap();

        assert_eq!(output, "Env Person <env@example.com> 0 +0000\n");
    }

    #[test]
    fn cwd_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut repo = Git::new(temp_dir.path().join("repo"));
        repo.initialize(None).unwrap();

        let elsewhere = Git::new(temp_dir.path().join("missing"));
        let output = elsewhere
            .invoke_with(["rev-parse", "--is-inside-work-tree"], &[], Some(repo.path()))
            .unwrap();

        assert_eq!(output, "true\n");
    }

    #[test]
    fn missing_program() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            git_program: OsString::from("/no/such/git"),
        };

        let err = Git::with_config(temp_dir.path(), config)
            .invoke(["status"])
            .unwrap_err();

        if let Error::Io(err) = err {
            assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn unknown_revision() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut git = Git::new(temp_dir.path());
        git.initialize(Some(identity())).unwrap();

        let err = git.resolve_revision("nope").unwrap_err();
        if let Error::Command(err) = err {
            assert_eq!(err.return_code, 1);
            assert!(err.command.ends_with(&["--short".to_string(), "nope".to_string()]));
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn empty_repo_has_no_refs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut git = Git::new(temp_dir.path());
        git.initialize(Some(identity())).unwrap();

        assert!(git.list_tags().unwrap().is_empty());
        assert!(git.list_branches().unwrap().is_empty());
        assert!(git.tag_hashes().unwrap().is_empty());
        assert!(git.branch_hashes().unwrap().is_empty());
    }
}
