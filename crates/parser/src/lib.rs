//! OpenAPI specification normalization
//!
//! This crate turns an OpenAPI description (Swagger 2.0 or OpenAPI 3.x, in
//! JSON or YAML) into a [`NormalizedSpec`]: one [`OperationDescriptor`] per
//! (path, HTTP method) pair plus a single document-wide base URL.
//!
//! ## Normalization Pipeline
//!
//! - Detect the version family from the top-level `openapi` field
//! - Walk every path item and recognized HTTP method, merging path-level
//!   parameters into each operation
//! - Partition parameters into path/query/header groups, resolving local
//!   `$ref`s through a reference table
//! - Extract the request body and first 2xx response schema
//! - Resolve or synthesize the operation id, rejecting collisions
//! - Build one unified input schema per operation
//!
//! Normalization performs no I/O and never logs. Non-fatal problems come back
//! as [`Diagnostic`]s on the result.
//!
//! [`NormalizedSpec`]: openapi_mcp_generator_common::NormalizedSpec
//! [`OperationDescriptor`]: openapi_mcp_generator_common::OperationDescriptor
//! [`Diagnostic`]: openapi_mcp_generator_common::Diagnostic

pub mod openapi;

pub use openapi::{load_file, load_str, normalize, OpenApiParser};
