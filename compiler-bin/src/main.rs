use clap::Parser;
use compiler_bin::{cli, logging};

fn main() -> anyhow::Result<()> {
    let config = cli::Config::parse();
    logging::start(&config)?;
    compiler_bin::run(&config)
}
