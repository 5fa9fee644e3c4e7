use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::IoError;
use crate::models::{ClassifiedLine, Segment};

/// Which half of a classified line is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Code,
    Documentation,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Code => write!(f, "code"),
            Stream::Documentation => write!(f, "documentation"),
        }
    }
}

/// Output files opened during one run.
///
/// The first write to a path creates (or truncates) it; every later write,
/// from any document, appends to the same handle. Writes land in call order.
///
/// Paths registered with [`OutputTable::protect`] are never opened for
/// writing, however the target names them.
#[derive(Debug, Default)]
pub struct OutputTable {
    output_dir: Option<PathBuf>,
    files: HashMap<PathBuf, BufWriter<File>>,
    opened: Vec<PathBuf>,
    /// Canonical paths of the run's source documents.
    sources: HashSet<PathBuf>,
}

impl OutputTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative targets against `dir` instead of each document's directory.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Absolute targets are used as-is; relative ones are joined onto the
    /// output directory, or the source document's directory when none is set.
    pub fn resolve(&self, source_dir: &Path, target: &str) -> PathBuf {
        let target = Path::new(target);
        if target.is_absolute() {
            return target.to_path_buf();
        }
        match &self.output_dir {
            Some(dir) => dir.join(target),
            None => source_dir.join(target),
        }
    }

    /// Marks a source document as off limits for output.
    ///
    /// Paths that do not exist on disk have nothing to protect and are ignored.
    pub fn protect(&mut self, source: &Path) {
        match fs::canonicalize(source) {
            Ok(canonical) => {
                self.sources.insert(canonical);
            }
            Err(e) => log::trace!("Not protecting {}: {e}", source.display()),
        }
    }

    /// Whether `path` names a protected source, through any alias.
    pub fn is_source(&self, path: &Path) -> bool {
        is_protected(&self.sources, path)
    }

    /// Appends the code half of `line`. Returns whether anything was written.
    pub fn write_code(&mut self, source_dir: &Path, line: &ClassifiedLine) -> Result<bool, IoError> {
        self.write_segment(Stream::Code, source_dir, line.code.as_ref())
    }

    /// Appends the documentation half of `line`. Returns whether anything was written.
    pub fn write_text(&mut self, source_dir: &Path, line: &ClassifiedLine) -> Result<bool, IoError> {
        self.write_segment(Stream::Documentation, source_dir, line.text.as_ref())
    }

    /// Paths opened so far, in the order they were first written.
    pub fn opened(&self) -> &[PathBuf] {
        &self.opened
    }

    /// Flushes every output and returns the paths written during the run.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, IoError> {
        for path in &self.opened {
            if let Some(writer) = self.files.get_mut(path) {
                writer.flush().map_err(|source| IoError::Write {
                    path: path.clone(),
                    source,
                })?;
            }
        }
        Ok(self.opened)
    }

    fn write_segment(
        &mut self,
        stream: Stream,
        source_dir: &Path,
        segment: Option<&Segment>,
    ) -> Result<bool, IoError> {
        let Some(segment) = segment else {
            return Ok(false);
        };

        let path = self.resolve(source_dir, &segment.target);
        let writer = match self.files.entry(path.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if is_protected(&self.sources, &path) {
                    return Err(IoError::OverwritesSource(path));
                }
                let file = create_output(&path)?;
                log::info!("Writing {stream} to {}", path.display());
                self.opened.push(path.clone());
                entry.insert(BufWriter::new(file))
            }
        };

        writer
            .write_all(segment.content.as_bytes())
            .map_err(|source| IoError::Write { path, source })?;
        Ok(true)
    }
}

/// Compares canonical paths, so `./notes.md`, `dir/sub/../notes.md` and
/// symlinks all match the document they point at.
fn is_protected(sources: &HashSet<PathBuf>, path: &Path) -> bool {
    !sources.is_empty()
        && fs::canonicalize(path).is_ok_and(|canonical| sources.contains(&canonical))
}

fn create_output(path: &Path) -> Result<File, IoError> {
    let create_error = |source: std::io::Error| IoError::Create {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(create_error)?;
    }
    File::create(path).map_err(create_error)
}
