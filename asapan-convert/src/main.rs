use anyhow::Result;
use clap::Parser;

mod cli;
mod convert_cmd;
mod path_guard;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    convert_cmd::run_convert(cli)
}
