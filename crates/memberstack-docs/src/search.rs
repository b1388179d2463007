use crate::catalog::Catalog;
use crate::category::Category;
use crate::model::SearchMatch;

/// Hard cap on context windows collected per document.
pub const MAX_WINDOWS_PER_DOCUMENT: usize = 5;

/// Case-insensitive substring search over every line of every document.
///
/// Results follow catalog order; documents without a hit are left out. A blank
/// query matches nothing.
pub fn search<'a>(
    catalog: &'a Catalog,
    query: &str,
    category: Option<Category>,
) -> Vec<SearchMatch<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    catalog
        .documents()
        .iter()
        .filter(|doc| category.map_or(true, |c| doc.record.category == c))
        .filter_map(|doc| {
            let windows = context_windows(&doc.content, &needle);
            (!windows.is_empty()).then(|| SearchMatch {
                document: &doc.record,
                windows,
            })
        })
        .collect()
}

/// `needle` must already be lowercased.
fn context_windows(content: &str, needle: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut windows = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if windows.len() == MAX_WINDOWS_PER_DOCUMENT {
            break;
        }
        if !line.to_lowercase().contains(needle) {
            continue;
        }

        let start = idx.saturating_sub(1);
        let end = (idx + 2).min(lines.len());
        windows.push(lines[start..end].join("\n"));
    }

    windows
}
