use crate::models::{ClassifiedLine, DefaultTargets, Segment};

use super::directive::{Directive, unindent};

/// What kind of run the classifier is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Prose. The initial mode.
    #[default]
    Text,
    /// Code woven into the docs and tangled into the current target.
    Code,
    /// Code tangled into the current target but left out of the docs.
    Boilerplate,
    /// Code shown in the docs but never tangled.
    Example,
}

/// Local facts about a single non-directive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with a tab or four spaces.
    Indented,
    /// Not indented and empty once whitespace is stripped.
    Blank,
    /// Anything else.
    Prose,
}

impl LineKind {
    pub fn of(line: &str) -> Self {
        if unindent(line).is_some() {
            LineKind::Indented
        } else if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Prose
        }
    }
}

/// Which streams receive a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    CodeAndText,
    CodeOnly,
    TextOnly,
}

/// The classifier's transition table.
///
/// A blank line continues whatever run is active; only prose ends a run.
/// Runs can only be entered from `Text` as plain `Code`; boilerplate and
/// example runs need a directive.
pub fn transition(mode: Mode, kind: LineKind) -> (Mode, Routing) {
    use LineKind::*;

    match (mode, kind) {
        (Mode::Text, Indented) => (Mode::Code, Routing::CodeAndText),
        (Mode::Text, Blank | Prose) => (Mode::Text, Routing::TextOnly),
        (Mode::Code, Indented | Blank) => (Mode::Code, Routing::CodeAndText),
        (Mode::Boilerplate, Indented | Blank) => (Mode::Boilerplate, Routing::CodeOnly),
        (Mode::Example, Indented | Blank) => (Mode::Example, Routing::TextOnly),
        (Mode::Code | Mode::Boilerplate | Mode::Example, Prose) => {
            (Mode::Text, Routing::TextOnly)
        }
    }
}

/// Splits the lines of one literate document into code and documentation.
///
/// Owns all state for a single document; feed it lines in order. Independent
/// documents each get their own classifier.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    targets: DefaultTargets,
    mode: Mode,
    current_target: String,
    line_number: usize,
}

impl LineClassifier {
    pub fn new(targets: DefaultTargets) -> Self {
        let current_target = targets.code().to_string();
        Self {
            targets,
            mode: Mode::Text,
            current_target,
            line_number: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_target(&self) -> &str {
        &self.current_target
    }

    pub fn targets(&self) -> &DefaultTargets {
        &self.targets
    }

    /// Classifies the next line of the document.
    ///
    /// Directive lines update the state and return `None`; every other line
    /// returns exactly one record.
    pub fn push(&mut self, line: &str) -> Option<ClassifiedLine> {
        self.line_number += 1;

        if let Some(directive) = Directive::parse(line) {
            log::debug!("line {}: directive {directive:?}", self.line_number);
            self.apply(directive);
            return None;
        }

        let kind = LineKind::of(line);
        let (mode, routing) = transition(self.mode, kind);
        self.mode = mode;

        let code = || Segment::new(unindent(line).unwrap_or(line), self.current_target.as_str());
        let text = || Segment::new(line, self.targets.text());

        let (code, text) = match routing {
            Routing::CodeAndText => (Some(code()), Some(text())),
            Routing::CodeOnly => (Some(code()), None),
            Routing::TextOnly => (None, Some(text())),
        };

        Some(ClassifiedLine {
            line_number: self.line_number,
            code,
            text,
        })
    }

    fn apply(&mut self, directive: Directive<'_>) {
        match directive {
            Directive::Example => self.mode = Mode::Example,
            Directive::Boilerplate => self.mode = Mode::Boilerplate,
            Directive::DefaultTarget => {
                self.mode = Mode::Code;
                self.current_target = self.targets.code().to_string();
            }
            Directive::Target(target) => {
                self.mode = Mode::Code;
                self.current_target = target.to_string();
            }
        }
    }
}

/// Lazily classifies `lines`, skipping directive lines.
pub fn classify_lines<'a, I>(
    targets: DefaultTargets,
    lines: I,
) -> impl Iterator<Item = ClassifiedLine> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    let mut classifier = LineClassifier::new(targets);
    lines.into_iter().filter_map(move |line| classifier.push(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classifier() -> LineClassifier {
        LineClassifier::new(DefaultTargets::from_file_name("foo.cpp.md", "md"))
    }

    fn code_and_text(line_number: usize, code: &str, target: &str, text: &str) -> ClassifiedLine {
        ClassifiedLine {
            line_number,
            code: Some(Segment::new(code, target)),
            text: Some(Segment::new(text, "foo.md")),
        }
    }

    fn text_only(line_number: usize, text: &str) -> ClassifiedLine {
        ClassifiedLine {
            line_number,
            code: None,
            text: Some(Segment::new(text, "foo.md")),
        }
    }

    fn code_only(line_number: usize, code: &str, target: &str) -> ClassifiedLine {
        ClassifiedLine {
            line_number,
            code: Some(Segment::new(code, target)),
            text: None,
        }
    }

    fn run(lines: &[&str]) -> Vec<ClassifiedLine> {
        let mut c = classifier();
        lines.iter().filter_map(|line| c.push(line)).collect()
    }

    #[rstest]
    #[case(Mode::Text, LineKind::Indented, Mode::Code, Routing::CodeAndText)]
    #[case(Mode::Text, LineKind::Blank, Mode::Text, Routing::TextOnly)]
    #[case(Mode::Text, LineKind::Prose, Mode::Text, Routing::TextOnly)]
    #[case(Mode::Code, LineKind::Indented, Mode::Code, Routing::CodeAndText)]
    #[case(Mode::Code, LineKind::Blank, Mode::Code, Routing::CodeAndText)]
    #[case(Mode::Code, LineKind::Prose, Mode::Text, Routing::TextOnly)]
    #[case(Mode::Boilerplate, LineKind::Indented, Mode::Boilerplate, Routing::CodeOnly)]
    #[case(Mode::Boilerplate, LineKind::Blank, Mode::Boilerplate, Routing::CodeOnly)]
    #[case(Mode::Boilerplate, LineKind::Prose, Mode::Text, Routing::TextOnly)]
    #[case(Mode::Example, LineKind::Indented, Mode::Example, Routing::TextOnly)]
    #[case(Mode::Example, LineKind::Blank, Mode::Example, Routing::TextOnly)]
    #[case(Mode::Example, LineKind::Prose, Mode::Text, Routing::TextOnly)]
    fn transition_table(
        #[case] mode: Mode,
        #[case] kind: LineKind,
        #[case] next: Mode,
        #[case] routing: Routing,
    ) {
        assert_eq!(transition(mode, kind), (next, routing));
    }

    #[rstest]
    #[case("\tint x;", LineKind::Indented)]
    #[case("    int x;", LineKind::Indented)]
    #[case("    ", LineKind::Indented)]
    #[case("", LineKind::Blank)]
    #[case("  \n", LineKind::Blank)]
    #[case("\n", LineKind::Blank)]
    #[case("   int x;", LineKind::Prose)]
    #[case("# Title", LineKind::Prose)]
    fn line_kinds(#[case] line: &str, #[case] kind: LineKind) {
        assert_eq!(LineKind::of(line), kind);
    }

    #[test]
    fn title_code_blank_text_scenario() {
        let records = run(&["# Title", "", "\tint x = 1;", "", "More text."]);

        assert_eq!(
            records,
            vec![
                text_only(1, "# Title"),
                text_only(2, ""),
                code_and_text(3, "int x = 1;", "foo.cpp", "\tint x = 1;"),
                code_and_text(4, "", "foo.cpp", ""),
                text_only(5, "More text."),
            ]
        );
    }

    #[test]
    fn strips_exactly_one_indent() {
        let records = run(&["        deep();\n", "\t\ttabbed();\n"]);

        assert_eq!(records[0].code(), Some("    deep();\n"));
        assert_eq!(records[1].code(), Some("\ttabbed();\n"));
    }

    #[test]
    fn three_spaces_is_prose() {
        let records = run(&["   not code\n"]);
        assert_eq!(records, vec![text_only(1, "   not code\n")]);
    }

    #[test]
    fn directive_lines_produce_no_records() {
        let records = run(&["\t<<out.h>>\n", "\tint y;\n"]);

        assert_eq!(
            records,
            vec![code_and_text(2, "int y;\n", "out.h", "\tint y;\n")]
        );
    }

    #[test]
    fn boilerplate_keeps_blank_lines_out_of_docs() {
        let records = run(&[
            "\t<<#-->>\n",
            "\t#include <stdio.h>\n",
            "\n",
            "\t#include <stdlib.h>\n",
            "Prose again.\n",
        ]);

        assert_eq!(
            records,
            vec![
                code_only(2, "#include <stdio.h>\n", "foo.cpp"),
                code_only(3, "\n", "foo.cpp"),
                code_only(4, "#include <stdlib.h>\n", "foo.cpp"),
                text_only(5, "Prose again.\n"),
            ]
        );
    }

    #[test]
    fn example_is_documentation_only() {
        let records = run(&["\t<<!-->>\n", "\tshow_me();\n", "\n", "\tand_me();\n", "Done.\n"]);

        assert_eq!(
            records,
            vec![
                text_only(2, "\tshow_me();\n"),
                text_only(3, "\n"),
                text_only(4, "\tand_me();\n"),
                text_only(5, "Done.\n"),
            ]
        );
    }

    #[test]
    fn prose_always_returns_to_text() {
        for directive in ["\t<<!-->>", "\t<<#-->>", "\t<<>>", "\t<<x.c>>"] {
            let mut c = classifier();
            c.push(directive);
            c.push("\tcode");
            c.push("prose");
            assert_eq!(c.mode(), Mode::Text, "after {directive:?}");
        }
    }

    #[test]
    fn empty_directive_restores_default_target() {
        let mut c = classifier();
        c.push("\t<<custom.ext>>");
        assert_eq!(c.current_target(), "custom.ext");
        assert_eq!(c.mode(), Mode::Code);

        c.push("\t<<>>");
        assert_eq!(c.current_target(), "foo.cpp");
        assert_eq!(c.mode(), Mode::Code);
    }

    #[test]
    fn target_survives_example_and_boilerplate() {
        let mut c = classifier();
        c.push("\t<<lib.rs>>");
        c.push("\t<<!-->>");
        c.push("\t<<#-->>");
        assert_eq!(c.current_target(), "lib.rs");

        let record = c.push("\tfn hidden() {}").unwrap();
        assert_eq!(record, code_only(4, "fn hidden() {}", "lib.rs"));
    }

    #[test]
    fn target_directive_leaves_example_mode() {
        let records = run(&["\t<<!-->>", "\tdemo();", "\t<<main.c>>", "\treal();"]);

        assert_eq!(
            records,
            vec![
                text_only(2, "\tdemo();"),
                code_and_text(4, "real();", "main.c", "\treal();"),
            ]
        );
    }

    #[test]
    fn directive_must_be_indented() {
        let records = run(&["<<out.h>>\n"]);
        assert_eq!(records, vec![text_only(1, "<<out.h>>\n")]);
    }

    #[test]
    fn text_stream_round_trips_without_directives() {
        let source = "# Doc\n\n\t<<a.c>>\n\tint a;\n\n\t<<#-->>\n\tint hidden;\nEnd\n";
        let records: Vec<_> =
            classify_lines(classifier().targets().clone(), source.split_inclusive('\n'))
                .collect();

        let woven: String = records.iter().filter_map(|r| r.text()).collect();
        assert_eq!(woven, "# Doc\n\n\tint a;\n\nEnd\n");

        let tangled: String = records.iter().filter_map(|r| r.code()).collect();
        assert_eq!(tangled, "int a;\n\nint hidden;\n");
    }
}
