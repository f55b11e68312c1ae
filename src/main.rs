use anyhow::Result;
use clap::Parser;
use expense_tracker::cli::Cli;
use expense_tracker::logging::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run()
}
