//! HTTP server for the mobile shopping agent
//!
//! Exposes the catalog tool surface over REST for the external dialogue
//! layer, plus health probes and the rendered phone-ID reference. The
//! dialogue/chat endpoint itself lives with the LLM orchestration, not
//! here.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
