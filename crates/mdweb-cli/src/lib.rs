//! Shared plumbing for the `mdtangle` and `mdweave` binaries.

use anyhow::{Context, Result};
use clap::Args;
use mdweb_config::Config;
use mdweb_engine::{BatchOptions, Selection, Summary, process_files};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Literate documents to process; each argument is a glob pattern
    #[arg(required = true, value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Config file (defaults to ~/.config/mdweb/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write relative targets under this directory instead of next to each document
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Warn;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Merges the config file with command-line overrides.
    pub fn batch_options(&self, selection: Selection) -> Result<BatchOptions> {
        let config = Config::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;

        let mut options = BatchOptions::new(selection);
        options.text_extension = config.text_extension;
        options.output_dir = self.output_dir.clone().or(config.output_dir);
        Ok(options)
    }
}

/// `RUST_LOG` still takes precedence over the command-line level.
pub fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

pub fn run(args: &CommonArgs, selection: Selection) -> Result<Summary> {
    let options = args.batch_options(selection)?;
    log::debug!("Options: {options:?}");

    let summary = process_files(&args.patterns, &options).context("Processing failed")?;
    log::debug!(
        "Processed {} document(s), wrote {} segment(s) to {} file(s)",
        summary.documents,
        summary.segments,
        summary.outputs.len()
    );
    Ok(summary)
}
