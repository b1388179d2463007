use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchDocsParams {
    /// Text to look for; matched case-insensitively against each line.
    pub query: String,
    /// Restrict results to one category, e.g. "dom-api", "admin-api",
    /// "rest-api", "authentication", "quick-start", "error-handling",
    /// "integration-patterns", "decision-trees" or "general".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListMethodsParams {
    /// Package whose reference document is scanned: "dom", "admin" or "rest".
    pub package: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadResourceParams {
    /// Resource identifier as returned by listResources.
    pub identifier: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_category_is_optional() {
        let params: SearchDocsParams =
            serde_json::from_value(serde_json::json!({ "query": "login" })).unwrap();
        assert_eq!(params.query, "login");
        assert!(params.category.is_none());

        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("category").is_none());
    }

    #[test]
    fn list_methods_params_require_package() {
        let result: Result<ListMethodsParams, _> = serde_json::from_value(serde_json::json!({}));
        assert!(result.is_err());
    }
}
