//! metafn CLI

use std::io::IsTerminal;

use clap::Parser;
use metafnc::{init_tracing, run, Cli};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprint!("{}", err.render(std::io::stderr().is_terminal()));
        std::process::exit(1);
    }
}
