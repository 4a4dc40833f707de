//! CTW CLI - command line tool for the Nagpur CO₂ twin.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ctw-cli",
    version,
    about = "City CO2 / air-quality twin toolkit"
)]
struct Cli {
    #[command(flatten)]
    globals: ctw_cmd::GlobalArgs,

    #[command(subcommand)]
    command: ctw_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ctw_cmd::run(&cli.globals, cli.command).await
}
