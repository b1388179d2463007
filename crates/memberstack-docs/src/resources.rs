use crate::catalog::Catalog;
use crate::error::AppError;
use crate::model::ResourceHandle;

pub const URI_SCHEME: &str = "memberstack-docs://";
pub const MIME_TYPE: &str = "text/markdown";

pub fn identifier_for(relative_path: &str) -> String {
    format!("{URI_SCHEME}{relative_path}")
}

/// One handle per catalogued document, in catalog order.
pub fn list(catalog: &Catalog) -> Vec<ResourceHandle> {
    catalog
        .documents()
        .iter()
        .map(|doc| ResourceHandle {
            identifier: identifier_for(&doc.record.relative_path),
            title: doc.record.title.clone(),
            description: doc.record.category.description().to_string(),
        })
        .collect()
}

/// Raw content of the document an identifier points at.
pub fn read<'a>(catalog: &'a Catalog, identifier: &str) -> Result<&'a str, AppError> {
    identifier
        .trim()
        .strip_prefix(URI_SCHEME)
        .and_then(|relative_path| catalog.get(relative_path))
        .map(|doc| doc.content.as_str())
        .ok_or_else(|| AppError::NotFound(identifier.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown;
    use crate::source::MemorySource;

    fn catalog() -> Catalog {
        Catalog::build(
            &MemorySource::new()
                .with("dom-package.md", "# DOM Package\n### `logoutMember`\n")
                .with("guides/quick-start.md", "# Quick Start\nInstall it.\n")
                .with("untitled.md", "no heading at all\n"),
        )
    }

    #[test]
    fn handles_use_scheme_and_category_description() {
        let handles = list(&catalog());
        assert_eq!(handles.len(), 3);
        assert_eq!(handles[0].identifier, "memberstack-docs://dom-package.md");
        assert_eq!(handles[0].title, "DOM Package");
        assert_eq!(handles[0].description, "DOM package (browser) API reference");
        assert_eq!(handles[1].identifier, "memberstack-docs://guides/quick-start.md");
        assert_eq!(handles[2].title, "untitled");
    }

    #[test]
    fn every_listed_handle_reads_back() {
        let catalog = catalog();
        for handle in list(&catalog) {
            let content = read(&catalog, &handle.identifier).unwrap();
            let title = markdown::first_title(content).unwrap_or("untitled");
            assert_eq!(title, handle.title);
        }
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let catalog = catalog();
        for identifier in [
            "memberstack-docs://missing.md",
            "dom-package.md",
            "other://dom-package.md",
        ] {
            let err = read(&catalog, identifier).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
            assert!(err.to_string().contains(identifier));
        }
    }
}
