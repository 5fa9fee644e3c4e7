//! # Line Classification
//!
//! Literate documents are plain text with indented code. Each line is
//! classified in order by a small state machine:
//!
//! 1. **Directives** (`directive`): indented `<<payload>>` lines switch the
//!    active code target or enter a boilerplate/example run. They produce no
//!    output of their own.
//!
//! 2. **Classification** (`classify`): every other line is routed to the code
//!    stream, the documentation stream, or both, depending on the current
//!    `Mode` and whether the line is indented, blank, or prose.
//!
//! ## Key Invariants
//!
//! - Lines of one document are classified strictly in order
//! - Only prose (non-blank, non-indented) ends a code run
//! - Woven text is the source document minus its directive lines

pub mod classify;
pub mod directive;

pub use classify::{LineClassifier, LineKind, Mode, Routing, classify_lines, transition};
pub use directive::{Directive, parse_directive, unindent};
