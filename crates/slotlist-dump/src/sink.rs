//! Numbered dump files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use slotlist::Snapshot;
use tracing::debug;

use crate::dot::render_dot;
use crate::error::DumpError;
use crate::text::render_text;

/// Output format for a dump file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DumpFormat {
    /// Plain-text slot table ([`crate::TextDump`]).
    Text,
    /// Graphviz digraph ([`crate::DotDump`]).
    Dot,
}

impl DumpFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Dot => "dot",
        }
    }

    /// Render `snap` in this format.
    pub fn render(self, snap: Snapshot<'_>) -> String {
        match self {
            Self::Text => render_text(snap),
            Self::Dot => render_dot(snap),
        }
    }
}

/// Writes `<stem>-<NNNN>.<ext>` files into a directory, one number per
/// [`write`](Self::write) call.
///
/// The counter belongs to the sink. Two sinks pointed at the same
/// directory with the same stem will overwrite each other's files.
#[derive(Debug)]
pub struct DumpSink {
    dir: PathBuf,
    stem: String,
    formats: Vec<DumpFormat>,
    counter: u32,
}

impl DumpSink {
    /// A sink writing both formats with stem `"list"`, numbering from 0.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stem: "list".to_string(),
            formats: vec![DumpFormat::Text, DumpFormat::Dot],
            counter: 0,
        }
    }

    /// Set the file name stem.
    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    /// Restrict output to the given formats.
    pub fn with_formats(mut self, formats: &[DumpFormat]) -> Self {
        self.formats = formats.to_vec();
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number the next [`write`](Self::write) will use.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Render `snap` in every configured format and write the files.
    ///
    /// Creates the directory on first use. The counter advances only when
    /// every file was written.
    ///
    /// # Errors
    ///
    /// [`DumpError::Io`] naming the path that could not be created or written.
    pub fn write(&mut self, snap: Snapshot<'_>) -> Result<Vec<PathBuf>, DumpError> {
        fs::create_dir_all(&self.dir).map_err(|source| DumpError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(self.formats.len());
        for &format in &self.formats {
            let path = self.dir.join(format!(
                "{}-{:04}.{}",
                self.stem,
                self.counter,
                format.extension()
            ));
            fs::write(&path, format.render(snap)).map_err(|source| DumpError::Io {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        debug!(
            dir = %self.dir.display(),
            counter = self.counter,
            files = written.len(),
            "wrote list dump"
        );
        self.counter += 1;
        Ok(written)
    }
}
