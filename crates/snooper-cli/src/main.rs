mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::CommandLineInterface::parse();
    cli::init_logging(cli.verbosity());
    cli.run()
}
