/// MCP server for the Memberstack documentation corpus.
///
/// Exposes five tools, all routed through [`Dispatcher::handle`]:
/// - `search`: Keyword search with context snippets
/// - `listMethods`: Method names documented for a package
/// - `getInfo`: Corpus size and coverage
/// - `listResources`: Every document as an addressable resource
/// - `readResource`: Raw markdown for one resource
///
/// The same documents are also served through the native MCP resources API.
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::dispatch::{Dispatcher, Operation, SERVER_NAME};
use crate::error::AppError;
use crate::resources;
use mcp_common::mcp_api::{ListMethodsParams, ReadResourceParams, SearchDocsParams};

#[derive(Clone)]
pub struct MemberstackDocsServer {
    dispatcher: Dispatcher,
    tool_router: ToolRouter<MemberstackDocsServer>,
}

impl MemberstackDocsServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            tool_router: Self::tool_router(),
        }
    }

    /// Runs one request on the blocking pool; the catalog build reads the disk.
    async fn dispatch(&self, operation: Operation, args: Value) -> Result<CallToolResult, McpError> {
        let dispatcher = self.dispatcher.clone();
        let reply = tokio::task::spawn_blocking(move || dispatcher.handle(operation.as_str(), &args))
            .await
            .map_err(|e| McpError::internal_error(format!("request task failed: {e}"), None))?;

        let content = vec![Content::text(reply.text)];
        Ok(if reply.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}

fn to_args<T: serde::Serialize>(params: &T) -> Result<Value, McpError> {
    serde_json::to_value(params)
        .map_err(|e| McpError::internal_error(format!("failed to encode arguments: {e}"), None))
}

#[tool_router]
impl MemberstackDocsServer {
    #[tool(
        name = "search",
        description = "Search the Memberstack documentation for a keyword or phrase (case-insensitive). Returns each matching document with up to 5 snippets showing the matched line and its neighbours. Optionally filter by category: dom-api, admin-api, rest-api, authentication, quick-start, error-handling, integration-patterns, decision-trees, general."
    )]
    async fn search_docs(
        &self,
        Parameters(params): Parameters<SearchDocsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::Search, to_args(&params)?).await
    }

    #[tool(
        name = "listMethods",
        description = "List the method names documented for a Memberstack package: 'dom' (browser), 'admin' (Node.js) or 'rest' (REST API)."
    )]
    async fn list_methods(
        &self,
        Parameters(params): Parameters<ListMethodsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::ListMethods, to_args(&params)?).await
    }

    #[tool(
        name = "getInfo",
        description = "Summarize the documentation corpus: server version, document counts per category, methods per package and a content fingerprint."
    )]
    async fn corpus_info(&self) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::GetInfo, Value::Null).await
    }

    #[tool(
        name = "listResources",
        description = "List every documentation file with its resource identifier, title and description."
    )]
    async fn list_resource_handles(&self) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::ListResources, Value::Null).await
    }

    #[tool(
        name = "readResource",
        description = "Return the full markdown of one documentation file by its resource identifier (e.g. 'memberstack-docs://dom-package.md')."
    )]
    async fn read_resource_text(
        &self,
        Parameters(params): Parameters<ReadResourceParams>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(Operation::ReadResource, to_args(&params)?).await
    }
}

#[tool_handler]
impl ServerHandler for MemberstackDocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Memberstack documentation MCP server. Use search for keyword lookups with \
                 context snippets, listMethods to enumerate the methods of the dom, admin or \
                 rest package, getInfo for corpus coverage, and listResources/readResource \
                 to fetch whole documents. The corpus is re-read on every call."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let dispatcher = self.dispatcher.clone();
        let handles = tokio::task::spawn_blocking(move || resources::list(&dispatcher.catalog()))
            .await
            .map_err(|e| McpError::internal_error(format!("request task failed: {e}"), None))?;

        let listed = handles
            .into_iter()
            .map(|handle| {
                let mut raw = RawResource::new(handle.identifier, handle.title);
                raw.description = Some(handle.description);
                raw.mime_type = Some(resources::MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect();

        Ok(ListResourcesResult {
            resources: listed,
            next_cursor: None,
            ..Default::default()
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let dispatcher = self.dispatcher.clone();
        let uri = request.uri;
        let lookup = uri.clone();
        let content = tokio::task::spawn_blocking(move || {
            resources::read(&dispatcher.catalog(), &lookup).map(str::to_string)
        })
        .await
        .map_err(|e| McpError::internal_error(format!("request task failed: {e}"), None))?
        .map_err(|e| match e {
            AppError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
            other => McpError::internal_error(other.to_string(), None),
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MemberstackDocsServer;
    use crate::dispatch::Operation;

    #[test]
    fn tools_match_operations() {
        let tools = MemberstackDocsServer::tool_router().list_all();
        assert_eq!(tools.len(), Operation::ALL.len());
        for operation in Operation::ALL {
            let name = operation.as_str();
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.description.is_some(),
                "tool {name} should have a description"
            );
        }
    }

    #[test]
    fn argument_tools_publish_input_properties() {
        let tools = MemberstackDocsServer::tool_router().list_all();
        for (name, field) in [
            ("search", "query"),
            ("listMethods", "package"),
            ("readResource", "identifier"),
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            let properties = tool
                .input_schema
                .get("properties")
                .and_then(|p| p.as_object())
                .unwrap_or_else(|| panic!("tool {name} has no properties"));
            assert!(properties.contains_key(field), "tool {name} should accept {field}");
        }
    }
}
