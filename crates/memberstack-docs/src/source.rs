/// Document discovery and loading.
///
/// The catalog only sees the corpus through [`DocumentSource`], so everything
/// above this layer can be exercised against an in-memory corpus.
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use mcp_common::error::CommonError;

pub const DOC_EXTENSION: &str = "md";

pub trait DocumentSource: Send + Sync {
    /// Relative paths (with `/` separators) of every markdown file, sorted.
    fn list_markdown_files(&self) -> Result<Vec<String>, CommonError>;

    /// Reads one document by the relative path returned from `list_markdown_files`.
    fn read_document(&self, relative_path: &str) -> Result<String, CommonError>;

    /// Human readable location of the corpus, for status output.
    fn describe(&self) -> String;
}

/// Markdown files under a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for FsSource {
    fn list_markdown_files(&self) -> Result<Vec<String>, CommonError> {
        let metadata =
            std::fs::metadata(&self.root).map_err(|e| CommonError::io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(CommonError::Walk {
                root: self.root.clone(),
                message: "corpus root is not a directory".to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %self.root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !has_doc_extension(entry.path()) {
                continue;
            }

            let Ok(rel_path) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            files.push(to_relative_string(rel_path));
        }

        files.sort();
        debug!(root = %self.root.display(), count = files.len(), "listed markdown files");
        Ok(files)
    }

    fn read_document(&self, relative_path: &str) -> Result<String, CommonError> {
        let path = self.root.join(relative_path);
        std::fs::read_to_string(&path).map_err(|e| CommonError::io(path, e))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

fn has_doc_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOC_EXTENSION))
}

fn to_relative_string(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Fixed set of documents held in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: std::collections::BTreeMap<String, Option<String>>,
}

#[cfg(test)]
impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, relative_path: &str, content: &str) -> Self {
        self.files
            .insert(relative_path.to_string(), Some(content.to_string()));
        self
    }

    /// A file that is listed but fails to read.
    pub fn with_unreadable(mut self, relative_path: &str) -> Self {
        self.files.insert(relative_path.to_string(), None);
        self
    }
}

#[cfg(test)]
impl DocumentSource for MemorySource {
    fn list_markdown_files(&self) -> Result<Vec<String>, CommonError> {
        Ok(self
            .files
            .keys()
            .filter(|path| has_doc_extension(Path::new(path)))
            .cloned()
            .collect())
    }

    fn read_document(&self, relative_path: &str) -> Result<String, CommonError> {
        match self.files.get(relative_path) {
            Some(Some(content)) => Ok(content.clone()),
            _ => Err(CommonError::io(
                relative_path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
            )),
        }
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_markdown_recursively_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("guides/nested")).unwrap();
        std::fs::write(root.join("rest-api.md"), "# REST").unwrap();
        std::fs::write(root.join("dom-package.md"), "# DOM").unwrap();
        std::fs::write(root.join("guides/nested/deep.MD"), "# Deep").unwrap();
        std::fs::write(root.join("guides/notes.txt"), "not markdown").unwrap();
        std::fs::write(root.join("guides/readme.markdown"), "other extension").unwrap();

        let source = FsSource::new(root);
        let files = source.list_markdown_files().unwrap();

        assert_eq!(
            files,
            vec!["dom-package.md", "guides/nested/deep.MD", "rest-api.md"]
        );
        assert_eq!(source.read_document("dom-package.md").unwrap(), "# DOM");
    }

    #[test]
    fn memory_source_matches_extension_rule() {
        let source = MemorySource::new()
            .with("guide.md", "# Guide")
            .with("LEGACY.MD", "# Legacy")
            .with("notes.txt", "text");
        assert_eq!(
            source.list_markdown_files().unwrap(),
            vec!["LEGACY.MD", "guide.md"]
        );
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = FsSource::new(temp_dir.path().join("does-not-exist"));

        let err = source.list_markdown_files().unwrap_err();
        assert!(matches!(err, CommonError::Io { .. }));
    }

    #[test]
    fn file_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("single.md");
        std::fs::write(&file, "# Single").unwrap();

        let err = FsSource::new(&file).list_markdown_files().unwrap_err();
        assert!(matches!(err, CommonError::Walk { .. }));
    }

    #[test]
    fn empty_root_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let files = FsSource::new(temp_dir.path()).list_markdown_files().unwrap();
        assert!(files.is_empty());
    }
}
