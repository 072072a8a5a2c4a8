use std::path::Path;

use giterator::{Git, Identity};

pub fn identity() -> Identity {
    Identity::new("Giterator", "giterator@example.com")
}

// A plain `Git` handle on a fresh repository at `<dir>/git`.
#[allow(dead_code)]
pub fn init_git(dir: &Path) -> Git {
    let mut git = Git::new(dir.join("git"));
    git.initialize(Some(identity())).unwrap();
    git
}

// Runs `git log` with `args` and returns its output.
#[allow(dead_code)]
pub fn log(git: &Git, args: &[&str]) -> String {
    let mut full = vec!["log"];
    full.extend_from_slice(args);
    git.invoke(full).unwrap()
}
