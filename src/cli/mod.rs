use std::{
    error::Error,
    io::Write,
};

#[cfg(test)]
use std::ffi::OsString;

use clap::{crate_version, ArgMatches, Command};

mod pack;
mod unpack;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

type Run = fn(&mut App<'_>, &ArgMatches) -> Result<()>;

// Every subcommand the binary understands, in help order.
const SUBCOMMANDS: &[(fn() -> Command, Run)] = &[
    (pack::subcommand, pack::run),
    (unpack::subcommand, unpack::run),
];

pub(crate) fn clap_app() -> Command {
    let app = Command::new("giterator")
        .version(crate_version!())
        .about("Tools for doing git things")
        .subcommand_required(true);

    SUBCOMMANDS
        .iter()
        .fold(app, |app, (subcommand, _)| app.subcommand(subcommand()))
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        let matches = self.arg_matches.clone();
        // ^^ Need an independent copy of matches so we can still pass
        // the App struct through to subcommand imps.

        let (name, sub_matches) = matches
            .subcommand()
            .ok_or("no subcommand given")?;
        // Clap exits with a usage error before we get here if no subcommand was given.

        let (_, run) = SUBCOMMANDS
            .iter()
            .find(|(subcommand, _)| subcommand().get_name() == name)
            .ok_or_else(|| format!("unknown subcommand: {}", name))?;

        run(self, sub_matches)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("giterator"));

        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app().try_get_matches_from(args)?,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    #[cfg(not(tarpaulin_include))]
    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    use super::App;

    #[test]
    fn no_subcommand_is_usage_error() {
        let mut cmd = Command::cargo_bin("giterator").unwrap();
        cmd.assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains("requires a subcommand"))
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn unknown_subcommand_is_usage_error() {
        let mut cmd = Command::cargo_bin("giterator").unwrap();
        cmd.arg("bogus")
            .assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains("unrecognized subcommand 'bogus'"));
    }

    #[test]
    fn version() {
        let mut cmd = Command::cargo_bin("giterator").unwrap();
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("giterator 0."))
            .stderr("");
    }

    #[test]
    fn help_lists_subcommands() {
        let mut cmd = Command::cargo_bin("giterator").unwrap();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("pack"))
            .stdout(predicate::str::contains("unpack"));
    }

    #[test]
    fn error_no_subcommand_in_process() {
        let err = App::run_with_args(Vec::<&str>::new()).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("requires a subcommand"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
