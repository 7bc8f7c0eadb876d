//! Project root: the single directory the external agent writes into.
//!
//! Everything the studio shows about generated output goes through [`ProjectRoot`]:
//! the recursive file listing, the file viewer and the HTML check. Paths handed back
//! to the UI are relative to the root and always use `/` separators.

use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{GenesisError, GenesisResult};

/// Explicit handle to the generated project directory.
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Handle without touching the filesystem. Call [`ProjectRoot::init`] before use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the root directory (and parents) if absent and pin it to an absolute path. Idempotent.
    pub fn init(path: impl Into<PathBuf>) -> GenesisResult<Self> {
        let root = Self::new(path);
        root.init_project_root()?;
        let path = root.path.canonicalize().unwrap_or(root.path);
        Ok(Self { path })
    }

    pub fn init_project_root(&self) -> GenesisResult<()> {
        std::fs::create_dir_all(&self.path)?;
        tracing::debug!(root = %self.path.display(), "project root ready");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All files under the root, relative and sorted. Directories are not listed.
    ///
    /// Symlinks are not followed; a link counts as a file unless it points at a directory, so a
    /// dangling link is still listed. Unreadable entries are skipped. Only an unreadable root fails.
    pub fn list_files(&self) -> GenesisResult<Vec<String>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.path).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(root = %self.path.display(), error = %e, "skipping unreadable project entry");
                    continue;
                }
            };
            let file_type = entry.file_type();
            let is_file = if file_type.is_symlink() {
                !entry.path().is_dir()
            } else {
                file_type.is_file()
            };
            if !is_file {
                continue;
            }
            if let Some(rel) = self.relative(entry.path()) {
                files.push(rel);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Listing for display: a walk failure becomes a single `Error listing files: ...` entry.
    pub fn list_generated_files(&self) -> Vec<String> {
        match self.list_files() {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(root = %self.path.display(), error = %e, "listing project files failed");
                vec![format!("Error listing files: {}", e)]
            }
        }
    }

    /// Read a file under the root as UTF-8 text.
    pub fn read_file(&self, relative: &str) -> GenesisResult<String> {
        let full = self.resolve(relative)?;
        Ok(std::fs::read_to_string(full)?)
    }

    /// Text of the file, or `Error reading file: ...`. Never fails.
    pub fn read_file_content(&self, relative: &str) -> String {
        self.read_file(relative)
            .unwrap_or_else(|e| format!("Error reading file: {}", e))
    }

    /// Collect `.html`/`.htm` files and whether the root has an `index.html`.
    pub fn check_html_files(&self) -> GenesisResult<HtmlReport> {
        let html_files: Vec<String> = self
            .list_files()?
            .into_iter()
            .filter(|f| {
                Path::new(f)
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
                    .unwrap_or(false)
            })
            .collect();
        let has_index = html_files.iter().any(|f| f == "index.html");
        Ok(HtmlReport {
            html_files,
            has_index,
        })
    }

    /// Status string for the "Check HTML Files" action.
    pub fn html_status(&self) -> String {
        match self.check_html_files() {
            Ok(report) => report.summary(),
            Err(e) => format!("Error checking HTML files: {}", e),
        }
    }

    /// Join a user-supplied relative path onto the root, rejecting anything that climbs out.
    fn resolve(&self, relative: &str) -> GenesisResult<PathBuf> {
        let rel = Path::new(relative);
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(GenesisError::PathEscape(rel.to_path_buf()));
        }
        Ok(self.path.join(rel))
    }

    fn relative(&self, full: &Path) -> Option<String> {
        let rel = full.strip_prefix(&self.path).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

/// Result of scanning the project for HTML entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlReport {
    pub html_files: Vec<String>,
    pub has_index: bool,
}

impl HtmlReport {
    pub fn summary(&self) -> String {
        if self.html_files.is_empty() {
            return "No HTML files found in the generated project.".to_string();
        }
        let index_note = if self.has_index {
            "index.html is present and will be served at the preview root."
        } else {
            "No index.html at the project root; open a file path directly in the preview."
        };
        format!(
            "Found {} HTML file(s): {}. {}",
            self.html_files.len(),
            self.html_files.join(", "),
            index_note
        )
    }
}
