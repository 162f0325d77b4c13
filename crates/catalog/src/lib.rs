//! Catalog query layer
//!
//! Turns loosely-specified, partially free-text criteria into
//! deterministic results over the remote phone catalog:
//! - REST store client with bounded retry and jittered backoff
//! - Derived-field extraction from free-text spec fields
//! - Filter engine with permissive missing-data semantics
//! - Identity resolution and multi-record comparison

pub mod client;
pub mod compare;
pub mod extract;
pub mod memory;
pub mod resolve;
pub mod retry;
pub mod search;

pub use client::{StoreClient, StoreOptions};
pub use compare::{compare, CompareError, ComparisonSet};
pub use memory::StaticStore;
pub use resolve::resolve;
pub use retry::RetryPolicy;
pub use search::{search, FilterCriteria};
