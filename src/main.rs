use anyhow::Result;
use clap::Parser;
use config_store::{cli::Cli, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
