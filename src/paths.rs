//! Results directory resolution.

use std::io;
use std::path::{Path, PathBuf};

/// Name of the output directory created next to the program.
pub const RESULTS_DIR_NAME: &str = "results";

/// Output directory for the report and chart images.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    root: PathBuf,
}

/// A path inside the results directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    /// True when this call had to create the directory.
    pub created_dir: bool,
}

impl ResultsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `file_name` inside the directory, creating the directory
    /// (and any missing parents) first when needed.
    pub fn resolve(&self, file_name: &str) -> io::Result<ResolvedPath> {
        let created_dir = if self.root.is_dir() {
            false
        } else {
            std::fs::create_dir_all(&self.root)?;
            tracing::debug!(dir = %self.root.display(), "created results directory");
            true
        };

        Ok(ResolvedPath {
            path: self.root.join(file_name),
            created_dir,
        })
    }
}

/// Directory holding the running executable, falling back to the working
/// directory when it cannot be determined.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
