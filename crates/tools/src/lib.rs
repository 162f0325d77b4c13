//! Catalog tools for the mobile shopping agent
//!
//! Implements an MCP (Model Context Protocol) compatible tool interface
//! with the read-only catalog tools consumed by the dialogue layer.

mod flex;
pub mod mcp;
pub mod phones;
pub mod reference;
pub mod registry;

pub use mcp::{ContentBlock, Tool, ToolError, ToolInput, ToolOutput, ToolSchema};
pub use phones::{
    catalog_tools, ComparePhonesTool, ExplainFeatureTool, GetPhoneDetailsTool, ListAllPhonesTool,
    SearchPhonesTool,
};
pub use reference::PhoneReferenceCache;
pub use registry::{ToolExecutor, ToolRegistry};
