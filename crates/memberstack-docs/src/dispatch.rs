/// Request dispatcher: the single entry point shared by every transport.
///
/// Each call validates the operation name, rebuilds the catalog from the
/// source, routes to the matching component and renders one text block. No
/// state survives between calls.
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::category::Category;
use crate::error::AppError;
use crate::methods::{self, Package};
use crate::model::{ResourceHandle, SearchMatch};
use crate::resources;
use crate::search;
use crate::source::DocumentSource;
use mcp_common::mcp_api::{ListMethodsParams, ReadResourceParams, SearchDocsParams};

pub const SERVER_NAME: &str = "memberstack-docs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    ListMethods,
    GetInfo,
    ListResources,
    ReadResource,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Search,
        Operation::ListMethods,
        Operation::GetInfo,
        Operation::ListResources,
        Operation::ReadResource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::ListMethods => "listMethods",
            Operation::GetInfo => "getInfo",
            Operation::ListResources => "listResources",
            Operation::ReadResource => "readResource",
        }
    }
}

impl FromStr for Operation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Operation::ALL.iter().map(|op| op.as_str()).collect();
                AppError::Validation(format!(
                    "unknown operation '{s}'. Valid operations: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Text response for one request. Failures are replies too, flagged with `is_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub is_error: bool,
}

impl Reply {
    fn ok(text: String) -> Self {
        Self {
            text,
            is_error: false,
        }
    }

    fn error(text: String) -> Self {
        Self {
            text,
            is_error: true,
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    source: Arc<dyn DocumentSource>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }

    /// Fresh snapshot of the corpus.
    pub fn catalog(&self) -> Catalog {
        Catalog::build(self.source.as_ref())
    }

    pub fn handle(&self, operation: &str, args: &Value) -> Reply {
        match self.try_handle(operation, args) {
            Ok(text) => Reply::ok(text),
            Err(e) => {
                warn!(operation, error = %e, "request failed");
                Reply::error(e.to_string())
            }
        }
    }

    fn try_handle(&self, operation: &str, args: &Value) -> Result<String, AppError> {
        let operation: Operation = operation.parse()?;
        debug!(operation = operation.as_str(), "dispatching");

        match operation {
            Operation::Search => {
                let params: SearchDocsParams = parse_args(operation, args)?;
                let category = params
                    .category
                    .as_deref()
                    .filter(|c| !c.trim().is_empty())
                    .map(Category::from_str)
                    .transpose()?;
                let catalog = self.catalog();
                let results = search::search(&catalog, &params.query, category);
                Ok(format_search(&params.query, category, &results))
            }
            Operation::ListMethods => {
                let params: ListMethodsParams = parse_args(operation, args)?;
                let package: Package = params.package.parse()?;
                let catalog = self.catalog();
                let signatures = methods::list_methods(&catalog, package);
                Ok(format_methods(package, &signatures))
            }
            Operation::GetInfo => {
                let catalog = self.catalog();
                Ok(format_info(&catalog, &self.source.describe()))
            }
            Operation::ListResources => {
                let catalog = self.catalog();
                Ok(format_resources(&resources::list(&catalog)))
            }
            Operation::ReadResource => {
                let params: ReadResourceParams = parse_args(operation, args)?;
                let catalog = self.catalog();
                resources::read(&catalog, &params.identifier).map(str::to_string)
            }
        }
    }
}

fn parse_args<T: DeserializeOwned>(operation: Operation, args: &Value) -> Result<T, AppError> {
    if args.is_null() {
        return Err(AppError::Validation(format!(
            "missing arguments for {}",
            operation.as_str()
        )));
    }
    T::deserialize(args).map_err(|e| {
        AppError::Validation(format!("invalid arguments for {}: {e}", operation.as_str()))
    })
}

fn format_search(query: &str, category: Option<Category>, results: &[SearchMatch<'_>]) -> String {
    let scope = category
        .map(|c| format!(" in category '{c}'"))
        .unwrap_or_default();

    if query.trim().is_empty() {
        return "No matches found: the query is empty.".to_string();
    }
    if results.is_empty() {
        return format!("No matches found for \"{query}\"{scope}.");
    }

    let mut out = format!(
        "Found matches for \"{query}\"{scope} in {} document(s):\n",
        results.len()
    );
    for result in results {
        let doc = result.document;
        let _ = write!(
            out,
            "\n## {} ({}) [{}]\n",
            doc.title, doc.relative_path, doc.category
        );
        for window in &result.windows {
            let fence = snippet_fence(window);
            let _ = write!(out, "\n{fence}\n{window}\n{fence}\n");
        }
    }
    out
}

/// A backtick fence longer than any backtick run inside `text`.
fn snippet_fence(text: &str) -> String {
    let longest = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

fn format_methods(package: Package, signatures: &[String]) -> String {
    if signatures.is_empty() {
        return format!(
            "No methods found for package '{package}' (expected in {}).",
            package.document_path()
        );
    }

    let mut out = format!(
        "Methods documented for package '{package}' ({}):\n",
        signatures.len()
    );
    for signature in signatures {
        let _ = writeln!(out, "- {signature}");
    }
    out
}

fn format_info(catalog: &Catalog, root: &str) -> String {
    let mut out = format!(
        "{SERVER_NAME} v{}\nCorpus root: {root}\nDocuments: {}\n",
        env!("CARGO_PKG_VERSION"),
        catalog.len()
    );

    out.push_str("\nCategories:\n");
    for category in Category::ALL {
        let count = catalog
            .documents()
            .iter()
            .filter(|d| d.record.category == category)
            .count();
        let _ = writeln!(out, "- {category}: {count}");
    }

    out.push_str("\nPackages:\n");
    for package in Package::ALL {
        let path = package.document_path();
        if catalog.get(path).is_some() {
            let count = methods::list_methods(catalog, package).len();
            let _ = writeln!(out, "- {package}: {count} method(s) in {path}");
        } else {
            let _ = writeln!(out, "- {package}: reference missing ({path})");
        }
    }

    let _ = write!(out, "\nFingerprint: sha256:{}", catalog.fingerprint());
    out
}

fn format_resources(handles: &[ResourceHandle]) -> String {
    if handles.is_empty() {
        return "No resources available.".to_string();
    }

    let mut out = format!("{} resource(s):\n", handles.len());
    for handle in handles {
        let _ = writeln!(
            out,
            "- {} | {} | {}",
            handle.identifier, handle.title, handle.description
        );
    }
    out
}
