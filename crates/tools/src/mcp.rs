//! MCP-compatible tool interface.
//!
//! The external dialogue layer drives the catalog exclusively through
//! these contracts. Every tool is side-effect free and safe to retry from
//! the caller's perspective.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shop_agent_core::StoreError;

/// Tool invocation input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    /// Tool arguments as loose JSON; numeric fields may arrive as strings.
    #[serde(default)]
    pub arguments: Value,
}

impl ToolInput {
    pub fn new(arguments: Value) -> Self {
        Self { arguments }
    }

    /// Deserialize the arguments into a typed struct.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ToolError> {
        serde_json::from_value(self.arguments.clone())
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))
    }
}

/// Tool invocation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
}

impl ToolOutput {
    /// A single structured JSON payload.
    pub fn json(payload: Value) -> Self {
        Self {
            content: vec![ContentBlock::Json { json: payload }],
        }
    }

    /// A single plain-text payload.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// First JSON payload, if any.
    pub fn first_json(&self) -> Option<&Value> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Json { json } => Some(json),
            _ => None,
        })
    }
}

/// One block of tool output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Json { json: Value },
}

/// Tool schema advertised to the dialogue layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// JSON-Schema-shaped description of the arguments object.
    pub parameters: Value,
}

/// Tool execution errors.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Store failure that survived the retry budget.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<ToolError> for shop_agent_core::Error {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Store(e) => shop_agent_core::Error::Store(e),
            other => shop_agent_core::Error::Tool(other.to_string()),
        }
    }
}

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn schema(&self) -> ToolSchema;

    async fn execute(&self, input: ToolInput) -> Result<ToolOutput, ToolError>;
}
