use regex::Regex;
use std::sync::OnceLock;

/// Indents that mark a line as code. Only the first matching prefix is removed.
pub const TAB_INDENT: &str = "\t";
pub const SPACE_INDENT: &str = "    ";

/// Strips a single code indent: one tab, or exactly four spaces.
///
/// Returns `None` when the line is not indented as code.
pub fn unindent(line: &str) -> Option<&str> {
    line.strip_prefix(TAB_INDENT)
        .or_else(|| line.strip_prefix(SPACE_INDENT))
}

fn directive_regex() -> &'static Regex {
    static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE_REGEX.get_or_init(|| Regex::new(r"^<<(.*)>>\s*$").expect("Invalid directive regex"))
}

/// Returns the trimmed payload of a `<<payload>>` control line.
///
/// Directives must be indented like code. The payload may be empty.
pub fn parse_directive(line: &str) -> Option<&str> {
    let remainder = unindent(line)?;
    let captures = directive_regex().captures(remainder)?;
    captures.get(1).map(|payload| payload.as_str().trim())
}

/// A decoded control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `<<!-->>`: following code goes to the documentation only.
    Example,
    /// `<<#-->>`: following code goes to the code output only.
    Boilerplate,
    /// `<<>>`: back to the document's own code target.
    DefaultTarget,
    /// `<<path>>`: following code goes to `path`.
    Target(&'a str),
}

impl<'a> Directive<'a> {
    pub const EXAMPLE: &'static str = "!--";
    pub const BOILERPLATE: &'static str = "#--";

    pub fn from_payload(payload: &'a str) -> Self {
        match payload {
            Self::EXAMPLE => Directive::Example,
            Self::BOILERPLATE => Directive::Boilerplate,
            "" => Directive::DefaultTarget,
            target => Directive::Target(target),
        }
    }

    pub fn parse(line: &'a str) -> Option<Self> {
        parse_directive(line).map(Self::from_payload)
    }
}
