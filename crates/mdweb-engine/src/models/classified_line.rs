use serde::Serialize;

/// A piece of a source line routed to one output target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Content to append to the target, line terminator included.
    pub content: String,
    /// Logical name of the output file. Relative names are resolved by the output table.
    pub target: String,
}

impl Segment {
    pub fn new(content: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            target: target.into(),
        }
    }
}

/// The record emitted for one non-directive line of a literate document.
///
/// A line can feed the code stream, the documentation stream, or both.
/// Directive lines never produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    /// 1-based line number in the source document.
    pub line_number: usize,
    /// Unindented line for the code stream, if any.
    pub code: Option<Segment>,
    /// Raw line for the documentation stream, if any. `None` for boilerplate.
    pub text: Option<Segment>,
}

impl ClassifiedLine {
    pub fn code(&self) -> Option<&str> {
        self.code.as_ref().map(|s| s.content.as_str())
    }

    pub fn code_target(&self) -> Option<&str> {
        self.code.as_ref().map(|s| s.target.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().map(|s| s.content.as_str())
    }

    pub fn text_target(&self) -> Option<&str> {
        self.text.as_ref().map(|s| s.target.as_str())
    }
}
