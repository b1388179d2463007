use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::category::categorize;
use crate::markdown;
use crate::model::{Document, DocumentRecord};
use crate::source::DocumentSource;

/// Snapshot of every readable document in the corpus, in scan order.
///
/// Built fresh for each request and dropped with the response.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    documents: Vec<Document>,
}

impl Catalog {
    /// Never fails: an unreadable root yields an empty catalog and unreadable
    /// files are skipped, both with a warning.
    pub fn build(source: &dyn DocumentSource) -> Self {
        let paths = match source.list_markdown_files() {
            Ok(paths) => paths,
            Err(e) => {
                warn!(root = %source.describe(), error = %e, "corpus unavailable, continuing with no documents");
                Vec::new()
            }
        };

        let mut documents = Vec::with_capacity(paths.len());
        for relative_path in paths {
            let content = match source.read_document(&relative_path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %relative_path, error = %e, "skipping unreadable document");
                    continue;
                }
            };

            let title = markdown::first_title(&content)
                .map(str::to_string)
                .unwrap_or_else(|| file_stem(&relative_path).to_string());

            documents.push(Document {
                record: DocumentRecord {
                    category: categorize(&relative_path),
                    relative_path,
                    title,
                },
                content,
            });
        }

        debug!(documents = documents.len(), "catalog built");
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, relative_path: &str) -> Option<&Document> {
        self.documents
            .iter()
            .find(|d| d.record.relative_path == relative_path)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// SHA-256 over every path and content in scan order, hex encoded.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for doc in &self.documents {
            hasher.update(doc.record.relative_path.as_bytes());
            hasher.update([0u8]);
            hasher.update(doc.content.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

fn file_stem(relative_path: &str) -> &str {
    let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}
