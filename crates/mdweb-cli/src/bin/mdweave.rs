use clap::Parser;
use mdweb_cli::{CommonArgs, init_logging, run};
use mdweb_engine::Selection;
use std::process;

/// Extract documentation from literate markdown documents.
///
/// Writes each document without its directive lines and boilerplate blocks
/// to a file named after the document with every extension replaced by the
/// documentation extension (`foo.cpp.md` -> `foo.md`).
#[derive(Parser, Debug)]
#[command(name = "mdweave", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common.log_level());

    if let Err(e) = run(&cli.common, Selection::WEAVE) {
        log::error!("{e:#}");
        process::exit(1);
    }
}
