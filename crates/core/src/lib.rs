//! Core types and traits for the mobile shopping agent
//!
//! This crate provides foundational types used across all other crates:
//! - Canonical catalog record shape
//! - Store trait for pluggable catalog backends
//! - Feature glossary for technical-term explanations
//! - Error types

pub mod error;
pub mod glossary;
pub mod record;
pub mod traits;

pub use error::{Error, Result, StoreError};
pub use glossary::{FeatureExplanation, FeatureGlossary, GlossaryEntry};
pub use record::{CatalogRecord, SpecEntry};
pub use traits::PhoneStore;
