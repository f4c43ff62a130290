//! Tool system for agent-callable lookup tools
//!
//! A tool is a named operation with a declared input shape and a single
//! `execute` entry point that returns a serialized result string. The
//! [`ToolSystem`] owns the configured tools and dispatches calls to them.

use crate::config::ToolConfig;
use crate::tool_span;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, Instrument};

pub mod adapter;
pub mod builtin;
pub mod normalize;
pub mod shape;
pub mod upstream;

pub use adapter::{LookupAdapter, LookupTool, RequestContext};
pub use shape::{Constraints, FieldDefault, FieldKind, FieldSpec, InputShape, ValidatedInput};
pub use upstream::{Disposition, Upstream, UpstreamClient, UpstreamOutcome};

/// Tool interface consumed by a host runtime
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name, description and JSON Schema of its input
    fn describe(&self) -> ToolDescription;

    /// Receives the per-tool configuration table, called once before first use
    async fn initialize(&mut self, config: Option<&Value>) -> Result<(), ToolError>;

    /// Runs one invocation and returns the serialized result
    async fn execute(&self, parameters: &Value) -> Result<String, ToolError>;

    /// Releases resources held by the tool
    async fn shutdown(&mut self) -> Result<(), ToolError> {
        Ok(())
    }
}

/// Tool description handed to the host runtime
#[derive(Debug, Clone)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool system for managing and executing lookup tools
pub struct ToolSystem {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolSystem {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Initialize tool system from the `[tools]` configuration table
    pub async fn initialize(
        &mut self,
        tool_configs: &HashMap<String, ToolConfig>,
    ) -> Result<(), ToolError> {
        for (tool_name, tool_config) in tool_configs {
            let mut tool = self.create_tool(tool_name, tool_config)?;

            let config = match tool_config {
                ToolConfig::Simple(_) => None,
                ToolConfig::Complex { config, .. } => Some(
                    serde_json::to_value(config)
                        .map_err(|e| ToolError::InitializationError(e.to_string()))?,
                ),
            };

            tool.initialize(config.as_ref()).await?;
            self.register_initialized(tool_name, tool)?;
        }

        Ok(())
    }

    /// Register an already initialized tool under its described name
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.describe().name;
        self.register_initialized(&name, tool)
    }

    fn register_initialized(&mut self, name: &str, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let description = tool.describe();

        // Hosts consume the schema directly, so it has to compile
        jsonschema::validator_for(&description.parameters).map_err(|e| {
            ToolError::SchemaError(format!("Schema compilation error for {name}: {e}"))
        })?;

        debug!(tool = name, "Registered tool");
        self.tools.insert(name.to_string(), tool);
        Ok(())
    }

    /// Create tool instance based on configuration
    fn create_tool(
        &self,
        tool_name: &str,
        config: &ToolConfig,
    ) -> Result<Box<dyn Tool>, ToolError> {
        match config.implementation() {
            "builtin" => builtin::create_builtin_tool(tool_name)
                .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string())),
            other => Err(ToolError::UnknownImplementation(other.to_string())),
        }
    }

    /// Get tool description
    pub fn describe_tool(&self, tool_name: &str) -> Option<ToolDescription> {
        self.tools.get(tool_name).map(|tool| tool.describe())
    }

    /// Execute a tool; argument validation is the tool's own first step
    pub async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &Value,
    ) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        tool.execute(parameters)
            .instrument(tool_span!(tool = tool_name))
            .await
    }

    /// Get sorted list of available tools
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Shutdown all tools
    pub async fn shutdown(&mut self) -> Result<(), ToolError> {
        for tool in self.tools.values_mut() {
            tool.shutdown().await?;
        }
        Ok(())
    }
}

impl Default for ToolSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool system errors
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Unknown tool implementation: {0}")]
    UnknownImplementation(String),
    #[error("Tool initialization failed: {0}")]
    InitializationError(String),
    #[error("Tool not initialized: {0}")]
    NotInitialized(String),
    #[error("Invalid argument '{field}': {reason}")]
    Validation { field: String, reason: String },
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("{service} error {status}{}: {}", detail_suffix(.detail), body_or_placeholder(.body))]
    Upstream {
        service: String,
        status: u16,
        /// Tool-supplied context such as reason phrase and subject
        detail: Option<String>,
        body: String,
    },
    #[error("Unexpected data from {service}: {reason}: {payload}")]
    MalformedUpstreamData {
        service: String,
        reason: String,
        payload: String,
    },
    #[error("Request to upstream failed: {0}")]
    Transport(String),
    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
}

impl ToolError {
    /// Create a validation error naming the offending field
    pub fn validation<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-data error embedding the raw payload
    pub fn malformed<S: Into<String>, R: Into<String>, P: Into<String>>(
        service: S,
        reason: R,
        payload: P,
    ) -> Self {
        Self::MalformedUpstreamData {
            service: service.into(),
            reason: reason.into(),
            payload: payload.into(),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" {detail}"),
        None => String::new(),
    }
}

fn body_or_placeholder(body: &str) -> &str {
    if body.is_empty() {
        "no body"
    } else {
        body
    }
}
