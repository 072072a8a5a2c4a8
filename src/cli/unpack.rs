use clap::{ArgMatches, Command};
use tracing::debug;

use super::{App, Result};

pub(crate) fn subcommand() -> Command {
    Command::new("unpack").about("Unpack repositories from their portable form")
}

pub(crate) fn run(_app: &mut App, _args: &ArgMatches) -> Result<()> {
    debug!("unpack has nothing to do yet");
    Ok(())
}
