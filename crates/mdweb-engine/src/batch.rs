//! Runs many literate documents through the classifier into one shared set
//! of output files.

use std::path::PathBuf;

use crate::io::{Document, IoError, OutputTable};
use crate::models::DEFAULT_TEXT_EXTENSION;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Failed to read matched path: {0}")]
    Glob(#[from] glob::GlobError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Which streams a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub code: bool,
    pub text: bool,
}

impl Selection {
    /// Extract source code.
    pub const TANGLE: Selection = Selection {
        code: true,
        text: false,
    };
    /// Extract documentation.
    pub const WEAVE: Selection = Selection {
        code: false,
        text: true,
    };
    pub const BOTH: Selection = Selection {
        code: true,
        text: true,
    };
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub selection: Selection,
    /// Extension of woven documentation files, without the dot.
    pub text_extension: String,
    /// Base directory for relative targets. Defaults to each document's directory.
    pub output_dir: Option<PathBuf>,
}

impl BatchOptions {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            text_extension: DEFAULT_TEXT_EXTENSION.to_string(),
            output_dir: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Documents read.
    pub documents: usize,
    /// Segments appended to outputs.
    pub segments: usize,
    /// Output files written, in the order they were first opened.
    pub outputs: Vec<PathBuf>,
}

/// Expands each glob pattern in turn. Matches within a pattern are sorted.
///
/// Patterns matching nothing are skipped with a warning. Directories are
/// ignored.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let entries = glob::glob(pattern).map_err(|source| BatchError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let before = files.len();
        for entry in entries {
            let path = entry?;
            if path.is_dir() {
                log::debug!("Skipping directory {}", path.display());
                continue;
            }
            files.push(path);
        }

        if files.len() == before {
            log::warn!("No files match '{pattern}'");
        }
    }

    Ok(files)
}

/// Classifies one document and appends the selected streams to `outputs`.
///
/// Returns the number of segments written. The document is protected in
/// `outputs` first, so no code or documentation target may replace it.
pub fn process_document(
    document: &Document,
    options: &BatchOptions,
    outputs: &mut OutputTable,
) -> Result<usize, IoError> {
    outputs.protect(document.path());
    let source_dir = document.directory();
    let mut written = 0;

    for line in document.classify(&options.text_extension) {
        if options.selection.code && outputs.write_code(source_dir, &line)? {
            written += 1;
        }
        if options.selection.text && outputs.write_text(source_dir, &line)? {
            written += 1;
        }
    }

    Ok(written)
}

/// Tangles and/or weaves every file matched by `patterns`.
///
/// Documents are processed one at a time in pattern order, so lines sent to
/// a shared target appear in that order. The first failure aborts the run.
///
/// Every matched document is protected before any output is opened, so a
/// target can alias neither its own source nor a document still to be read.
pub fn process_files<S: AsRef<str>>(
    patterns: &[S],
    options: &BatchOptions,
) -> Result<Summary, BatchError> {
    let files = expand_patterns(patterns)?;
    let mut outputs = match &options.output_dir {
        Some(dir) => OutputTable::with_output_dir(dir),
        None => OutputTable::new(),
    };
    for path in &files {
        outputs.protect(path);
    }
    let mut summary = Summary::default();

    for path in &files {
        let document = Document::open(path)?;
        log::debug!("Processing {}", path.display());
        summary.segments += process_document(&document, options, &mut outputs)?;
        summary.documents += 1;
    }

    summary.outputs = outputs.finish()?;
    Ok(summary)
}
