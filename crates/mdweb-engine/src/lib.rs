pub mod batch;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use batch::{BatchError, BatchOptions, Selection, Summary, process_files};
pub use io::{Document, IoError, OutputTable, Stream};
pub use models::{ClassifiedLine, DEFAULT_TEXT_EXTENSION, DefaultTargets, Segment};
pub use parsing::{Directive, LineClassifier, Mode};
