pub mod output;

pub use output::{OutputTable, Stream};

use crate::models::{ClassifiedLine, DefaultTargets};
use crate::parsing::classify_lines;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Refusing to overwrite source document {0}")]
    OverwritesSource(PathBuf),
}

/// A literate source document held in memory.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    source: String,
}

impl Document {
    /// Read a literate document from disk.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing
    /// the run; a warning names the document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::NotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|source| IoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let source = match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(e) => {
                log::warn!(
                    "{} is not valid UTF-8, replacing invalid bytes",
                    path.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Self::from_source(path, source))
    }

    pub fn from_source(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative output targets are resolved against.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Lines with their terminators (`\n` or `\r\n`) kept, so that written
    /// output reproduces the source byte for byte.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.split_inclusive('\n')
    }

    pub fn default_targets(&self, text_extension: &str) -> DefaultTargets {
        DefaultTargets::from_document(&self.path, text_extension)
    }

    /// Lazily classify every line of the document with a fresh classifier.
    pub fn classify(&self, text_extension: &str) -> impl Iterator<Item = ClassifiedLine> + '_ {
        classify_lines(self.default_targets(text_extension), self.lines())
    }
}
