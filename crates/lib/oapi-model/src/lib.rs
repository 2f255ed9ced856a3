//! Data model and result records for oapi-mcp.
//!
//! This crate defines the loaded-spec representation shared by the loader,
//! the registry, and the query engine, plus the serialized shapes returned by
//! every query.

pub mod models;
pub mod schema;

pub use models::*;
