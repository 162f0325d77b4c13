//! Shared application state.

use std::sync::Arc;

use shop_agent_config::Settings;
use shop_agent_tools::{PhoneReferenceCache, ToolRegistry};

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub registry: Arc<ToolRegistry>,
    pub reference: Arc<PhoneReferenceCache>,
}
