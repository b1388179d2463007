use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Fixed set of tags used to group corpus documents for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    DomApi,
    AdminApi,
    RestApi,
    Authentication,
    QuickStart,
    ErrorHandling,
    IntegrationPatterns,
    DecisionTrees,
    General,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::DomApi,
        Category::AdminApi,
        Category::RestApi,
        Category::Authentication,
        Category::QuickStart,
        Category::ErrorHandling,
        Category::IntegrationPatterns,
        Category::DecisionTrees,
        Category::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::DomApi => "dom-api",
            Category::AdminApi => "admin-api",
            Category::RestApi => "rest-api",
            Category::Authentication => "authentication",
            Category::QuickStart => "quick-start",
            Category::ErrorHandling => "error-handling",
            Category::IntegrationPatterns => "integration-patterns",
            Category::DecisionTrees => "decision-trees",
            Category::General => "general",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::DomApi => "DOM package (browser) API reference",
            Category::AdminApi => "Admin package (server-side Node.js) API reference",
            Category::RestApi => "Admin REST API reference",
            Category::Authentication => "Authentication flows and session handling",
            Category::QuickStart => "Quick start and installation guide",
            Category::ErrorHandling => "Error codes and error handling guidance",
            Category::IntegrationPatterns => "Integration patterns and worked examples",
            Category::DecisionTrees => "Decision trees for choosing an approach",
            Category::General => "General documentation",
        }
    }

    fn valid_tags() -> String {
        Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "unknown category '{tag}'. Valid categories: {}",
                    Category::valid_tags()
                ))
            })
    }
}

enum Rule {
    /// Anywhere in the lowercased relative path.
    PathContains(&'static str),
    /// File name without the `.md` extension, exact.
    StemEquals(&'static str),
    /// File name without the `.md` extension, substring.
    StemContains(&'static str),
}

impl Rule {
    fn matches(&self, path: &str, stem: &str) -> bool {
        match self {
            Rule::PathContains(needle) => path.contains(needle),
            Rule::StemEquals(name) => stem == *name,
            Rule::StemContains(needle) => stem.contains(needle),
        }
    }
}

// Evaluated top to bottom; the first match wins.
const RULES: &[(Rule, Category)] = &[
    (Rule::PathContains("dom-package"), Category::DomApi),
    (Rule::PathContains("admin-package"), Category::AdminApi),
    (Rule::PathContains("rest-api"), Category::RestApi),
    (Rule::StemEquals("authentication-flows"), Category::Authentication),
    (Rule::StemContains("quick-start"), Category::QuickStart),
    (Rule::StemContains("error-handling"), Category::ErrorHandling),
    (Rule::StemContains("integration-patterns"), Category::IntegrationPatterns),
    (Rule::PathContains("decision-trees"), Category::DecisionTrees),
];

/// Maps a relative document path to its category. Total and deterministic.
pub fn categorize(relative_path: &str) -> Category {
    let path = relative_path.replace('\\', "/").to_lowercase();
    let file_name = path.rsplit('/').next().unwrap_or(&path);
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);

    RULES
        .iter()
        .find(|(rule, _)| rule.matches(&path, stem))
        .map(|(_, category)| *category)
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_paths_map_to_api_categories() {
        assert_eq!(categorize("dom-package.md"), Category::DomApi);
        assert_eq!(categorize("reference/admin-package.md"), Category::AdminApi);
        assert_eq!(categorize("rest-api.md"), Category::RestApi);
        assert_eq!(categorize("Reference/DOM-Package/members.md"), Category::DomApi);
    }

    #[test]
    fn stem_rules() {
        assert_eq!(categorize("authentication-flows.md"), Category::Authentication);
        assert_eq!(categorize("guides/authentication-flows.md"), Category::Authentication);
        // exact stem only
        assert_eq!(categorize("authentication-flows-legacy.md"), Category::General);
        assert_eq!(categorize("00-quick-start.md"), Category::QuickStart);
        assert_eq!(categorize("error-handling.md"), Category::ErrorHandling);
        assert_eq!(categorize("integration-patterns.md"), Category::IntegrationPatterns);
        assert_eq!(categorize("decision-trees/which-package.md"), Category::DecisionTrees);
    }

    #[test]
    fn first_matching_rule_wins() {
        // Both dom-package and error-handling match; dom-package comes first.
        assert_eq!(categorize("dom-package/error-handling.md"), Category::DomApi);
        assert_eq!(categorize("rest-api/quick-start.md"), Category::RestApi);
    }

    #[test]
    fn categorize_is_total_and_deterministic() {
        for path in ["", "/", ".md", "README.md", "a/b/c/d.md", "no-extension", "ü/ñ.md"] {
            let first = categorize(path);
            assert_eq!(first, categorize(path));
            assert!(Category::ALL.contains(&first));
        }
        assert_eq!(categorize("README.md"), Category::General);
    }

    #[test]
    fn windows_separators_are_normalized() {
        assert_eq!(categorize(r"api\dom-package.md"), Category::DomApi);
    }

    #[test]
    fn parse_category_tags() {
        assert_eq!("dom-api".parse::<Category>().unwrap(), Category::DomApi);
        assert_eq!(" Quick-Start ".parse::<Category>().unwrap(), Category::QuickStart);

        let err = "billing".parse::<Category>().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, AppError::Validation(_)));
        for category in Category::ALL {
            assert!(message.contains(category.as_str()));
        }
    }
}
