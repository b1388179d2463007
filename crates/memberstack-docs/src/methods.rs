use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::markdown;

/// Depth of the headings that name a method in the package references.
const METHOD_HEADING_DEPTH: usize = 3;

/// Packages with a method reference document in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    Dom,
    Admin,
    Rest,
}

impl Package {
    pub const ALL: [Package; 3] = [Package::Dom, Package::Admin, Package::Rest];

    pub fn as_str(self) -> &'static str {
        match self {
            Package::Dom => "dom",
            Package::Admin => "admin",
            Package::Rest => "rest",
        }
    }

    /// Relative path of the reference document for this package.
    pub fn document_path(self) -> &'static str {
        match self {
            Package::Dom => "dom-package.md",
            Package::Admin => "admin-package.md",
            Package::Rest => "rest-api.md",
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Package {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Package::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(id))
            .ok_or_else(|| {
                let valid: Vec<&str> = Package::ALL.iter().map(|p| p.as_str()).collect();
                AppError::Validation(format!(
                    "unknown package '{id}'. Valid packages: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Method names of a package in document order, duplicates kept.
///
/// Empty when the package's reference document is not in the catalog.
pub fn list_methods(catalog: &Catalog, package: Package) -> Vec<String> {
    catalog
        .get(package.document_path())
        .map(|doc| extract_signatures(&doc.content))
        .unwrap_or_default()
}

pub fn extract_signatures(content: &str) -> Vec<String> {
    markdown::headings(content)
        .filter(|h| h.depth == METHOD_HEADING_DEPTH)
        .filter_map(|h| h.code_span())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    const DOM_REFERENCE: &str = r#"# DOM Package

## Authentication

### `loginMemberEmailPassword`

Logs in a member.

### `logoutMember`

## Members

### Not a method
#### `tooDeep`
### `getCurrentMember()` and more
```js
### `inExample`
```
### `loginMemberEmailPassword`
"#;

    #[test]
    fn extracts_in_document_order() {
        let content = "### `loginMemberEmailPassword`\n\n### `logoutMember`\n";
        assert_eq!(
            extract_signatures(content),
            vec!["loginMemberEmailPassword", "logoutMember"]
        );
    }

    #[test]
    fn trailing_summary_after_code_span_is_ignored() {
        let content = "### `getCurrentMember()` - returns the logged in member\n### `logoutMember`\n";
        assert_eq!(
            extract_signatures(content),
            vec!["getCurrentMember()", "logoutMember"]
        );
    }

    #[test]
    fn only_depth_three_code_span_headings_count() {
        assert_eq!(
            extract_signatures(DOM_REFERENCE),
            vec![
                "loginMemberEmailPassword",
                "logoutMember",
                "getCurrentMember()",
                "loginMemberEmailPassword",
            ]
        );
    }

    #[test]
    fn list_methods_reads_the_package_document() {
        let catalog = Catalog::build(
            &MemorySource::new()
                .with("dom-package.md", DOM_REFERENCE)
                .with("admin-package.md", "# Admin\n### `verifyToken`\n"),
        );

        assert_eq!(list_methods(&catalog, Package::Dom).len(), 4);
        assert_eq!(list_methods(&catalog, Package::Admin), vec!["verifyToken"]);
        assert!(list_methods(&catalog, Package::Rest).is_empty());
    }

    #[test]
    fn empty_corpus_lists_nothing() {
        let catalog = Catalog::build(&MemorySource::new());
        for package in Package::ALL {
            assert!(list_methods(&catalog, package).is_empty());
        }
    }

    #[test]
    fn unknown_package_names_valid_set() {
        let err = "billing".parse::<Package>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().ends_with("Valid packages: dom, admin, rest"));

        assert_eq!("DOM".parse::<Package>().unwrap(), Package::Dom);
    }
}
