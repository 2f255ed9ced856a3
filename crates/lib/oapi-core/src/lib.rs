//! Core types and services for oapi-mcp.
//!
//! This crate owns the spec loaders (local folder, individual URLs, registry
//! discovery), the in-memory spec registry, the read-only query engine, and the
//! catalog service that ties them together behind a fixed set of tool calls.

pub mod dispatch;
pub mod engine;
pub mod loaders;
pub mod registry;
pub mod services;
