//! Flu CLI - Command line tool for flu season comparison charts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "flu-cli",
    version,
    about = "Flu season comparison toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: flu_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("flu-cli {}", env!("CARGO_PKG_VERSION"));
    flu_cmd::run(cli.command)
}
