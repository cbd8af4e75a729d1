//! CLI entry point for the quadtree automaton image codec

use clap::Parser;
use quadfa::io::cli::{Cli, CommandProcessor, init_logging};

#[allow(clippy::print_stdout)]
fn main() -> quadfa::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.default_log_level());

    let mut processor = CommandProcessor::new(cli);
    for line in processor.process()? {
        println!("{line}");
    }

    Ok(())
}
