//! MCP Server handler for the Grafana datasource API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    mcp::{OrgParams, Selector, TargetParams},
    Datasource, DatasourceType, Delete, Get, GrafanaClient, GrafanaError, List,
};

/// Grafana MCP Server.
///
/// Implements the MCP ServerHandler trait, providing tools to interact
/// with datasources through the Model Context Protocol.
///
/// # Tools
///
/// - `get` - Fetch a datasource by ID or name
/// - `list` - List all datasources
/// - `types` - List available datasource plugin types
/// - `delete` - Delete a datasource by ID or name
#[derive(Clone)]
pub struct GrafanaServer {
    client: Arc<GrafanaClient>,
}

impl GrafanaServer {
    /// Create a new GrafanaServer from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials are configured.
    pub fn from_env() -> crate::Result<Self> {
        let client = GrafanaClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Create a new GrafanaServer with an existing client.
    pub fn new(client: GrafanaClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Generate JSON Schema for a type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        let schema = schemars::schema_for!(T);
        let value = serde_json::to_value(&schema).unwrap_or(serde_json::json!({}));
        match value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        }
    }

    /// Convert GrafanaError to McpError.
    fn to_mcp_error(err: GrafanaError) -> McpError {
        match &err {
            GrafanaError::Status { status_code: 404, body } => {
                McpError::resource_not_found(format!("datasource not found: {body}"), None)
            }
            GrafanaError::ConfigMissing(msg) | GrafanaError::InvalidArgument(msg) => {
                McpError::invalid_params(msg.clone(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Handle the `get` tool.
    ///
    /// # Errors
    ///
    /// Returns an MCP error if the selector is invalid or the API call fails.
    pub async fn handle_get(&self, params: TargetParams) -> Result<CallToolResult, McpError> {
        let org = params.org();
        let ds = match params.selector().map_err(Self::to_mcp_error)? {
            Selector::Id(id) => Datasource::get(&self.client, id, org).await,
            Selector::Name(name) => Datasource::get_by_name(&self.client, &name, org).await,
        }
        .map_err(Self::to_mcp_error)?;
        Self::json_result(&ds)
    }

    /// Handle the `list` tool.
    pub async fn handle_list(&self, params: OrgParams) -> Result<CallToolResult, McpError> {
        let items = Datasource::list(&self.client, params.org())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&items)
    }

    /// Handle the `types` tool.
    pub async fn handle_types(&self, params: OrgParams) -> Result<CallToolResult, McpError> {
        let types: BTreeMap<String, DatasourceType> =
            DatasourceType::list_all(&self.client, params.org())
                .await
                .map_err(Self::to_mcp_error)?
                .into_iter()
                .collect();
        Self::json_result(&types)
    }

    /// Handle the `delete` tool.
    pub async fn handle_delete(&self, params: TargetParams) -> Result<CallToolResult, McpError> {
        let org = params.org();
        let status = match params.selector().map_err(Self::to_mcp_error)? {
            Selector::Id(id) => Datasource::delete(&self.client, id, org).await,
            Selector::Name(name) => Datasource::delete_by_name(&self.client, &name, org).await,
        }
        .map_err(Self::to_mcp_error)?;
        Self::json_result(&status)
    }
}

impl ServerHandler for GrafanaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "grafapi".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Grafana MCP Server - Inspect datasources and plugin types, delete datasources."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "get",
                "Fetch a single Grafana datasource by numeric id or by name. \
                 Optional org selects the organization.",
                Self::schema::<TargetParams>(),
            ),
            Tool::new(
                "list",
                "List every datasource in an organization.",
                Self::schema::<OrgParams>(),
            ),
            Tool::new(
                "types",
                "List installed datasource plugin types, keyed by plugin name.",
                Self::schema::<OrgParams>(),
            ),
            Tool::new(
                "delete",
                "Delete a Grafana datasource by numeric id or by name.",
                Self::schema::<TargetParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request
            .arguments
            .map(serde_json::Value::Object)
            .unwrap_or(serde_json::json!({}));

        match request.name.as_ref() {
            "get" => self.handle_get(parse_args(args)?).await,
            "list" => self.handle_list(parse_args(args)?).await,
            "types" => self.handle_types(parse_args(args)?).await,
            "delete" => self.handle_delete(parse_args(args)?).await,
            other => Err(McpError::invalid_params(
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(args: serde_json::Value) -> Result<T, McpError> {
    serde_json::from_value(args).map_err(|e| McpError::invalid_params(e.to_string(), None))
}
