use std::path::Path;

/// Extension given to woven documentation files.
pub const DEFAULT_TEXT_EXTENSION: &str = "md";

/// Output names derived from a literate document's file name.
///
/// `foo.cpp.md` tangles to `foo.cpp` and weaves to `foo.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTargets {
    code: String,
    text: String,
}

impl DefaultTargets {
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }

    /// Derive targets from a document path. Only the file name is used; the
    /// directory is applied later when targets are resolved for writing.
    pub fn from_document(path: &Path, text_extension: &str) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_file_name(&name, text_extension)
    }

    pub fn from_file_name(name: &str, text_extension: &str) -> Self {
        let code = strip_extension(name).to_string();
        let text = format!(
            "{}.{}",
            strip_all_extensions(name),
            text_extension.trim_start_matches('.')
        );
        Self { code, text }
    }

    /// Code target used until a directive redirects it.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Documentation target for every woven line of the document.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Removes the final extension. A leading dot does not start an extension,
/// so `.envrc` is left alone.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

fn strip_all_extensions(name: &str) -> &str {
    let mut stem = name;
    loop {
        let next = strip_extension(stem);
        if next == stem {
            return stem;
        }
        stem = next;
    }
}
