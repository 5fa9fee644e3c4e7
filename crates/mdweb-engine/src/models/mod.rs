pub mod classified_line;
pub mod targets;

pub use classified_line::{ClassifiedLine, Segment};
pub use targets::{DEFAULT_TEXT_EXTENSION, DefaultTargets};
