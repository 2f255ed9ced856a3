//! MCP tool modules.
//!
//! Tools are grouped by domain: catalog access (loading, listing, raw specs,
//! provenance), cross-spec analysis, and contextual help.

pub mod analysis;
pub mod catalog;
mod context;
