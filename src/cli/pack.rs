use clap::{ArgMatches, Command};
use tracing::debug;

use super::{App, Result};

pub(crate) fn subcommand() -> Command {
    Command::new("pack").about("Pack repositories into a portable form")
}

pub(crate) fn run(_app: &mut App, _args: &ArgMatches) -> Result<()> {
    debug!("pack has nothing to do yet");
    Ok(())
}
