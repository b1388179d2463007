use crate::category::Category;

/// One markdown document discovered under the corpus root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Path relative to the corpus root with `/` separators, e.g. "dom-package.md"
    pub relative_path: String,
    /// Category derived from `relative_path`
    pub category: Category,
    /// First level-1 heading, else the file name without extension
    pub title: String,
}

/// A catalogued document together with the content it was read from.
#[derive(Debug, Clone)]
pub struct Document {
    pub record: DocumentRecord,
    pub content: String,
}

/// Search hits for a single document, in the order they occur in the file.
#[derive(Debug, Clone)]
pub struct SearchMatch<'a> {
    pub document: &'a DocumentRecord,
    /// Context windows: previous line, matched line, next line joined by `\n`.
    pub windows: Vec<String>,
}

/// An addressable view of a catalogued document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub identifier: String,
    pub title: String,
    pub description: String,
}
