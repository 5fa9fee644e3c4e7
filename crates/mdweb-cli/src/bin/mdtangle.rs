use clap::Parser;
use mdweb_cli::{CommonArgs, init_logging, run};
use mdweb_engine::Selection;
use std::process;

/// Extract source code from literate markdown documents.
///
/// Indented blocks are written to a file named after the document with its
/// last extension removed (`foo.cpp.md` -> `foo.cpp`), or to the file named by
/// the most recent `<<target>>` directive.
#[derive(Parser, Debug)]
#[command(name = "mdtangle", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common.log_level());

    if let Err(e) = run(&cli.common, Selection::TANGLE) {
        log::error!("{e:#}");
        process::exit(1);
    }
}
