//! OpenAPI v2/v3 specification normalizer
//!
//! Converts Swagger 2.0 and OpenAPI 3.x documents into the same
//! version-independent list of operation descriptors.
//!
//! ## Version Differences Reconciled
//!
//! | concept        | v2 (Swagger)                      | v3                                   |
//! |----------------|-----------------------------------|--------------------------------------|
//! | request body   | parameter with `in: body`         | `requestBody.content.*.schema`       |
//! | response body  | `responses.2xx.schema`            | `responses.2xx.content.*.schema`     |
//! | base URL       | `schemes` + `host` + `basePath`   | `servers[].url`                      |
//! | shared params  | `#/parameters/*`                  | `#/components/parameters/*`          |
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_mcp_generator_parser::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("petstore.yaml")?;
//! let spec = parser.parse()?;
//! for op in &spec.operations {
//!     println!("{} {}", op.id, op.locator());
//! }
//! ```

mod base_url;
mod converter;
mod input_schema;
mod loader;
mod operation_id;
mod params;
mod parser;
mod refs;
mod schema;
mod version;
mod walker;

pub use base_url::{resolve_base_url, PLACEHOLDER_BASE_URL};
pub use converter::normalize;
pub use input_schema::build_input_schema;
pub use loader::{load_file, load_str};
pub use operation_id::{resolve_operation_id, OperationIdRegistry};
pub use params::{classify_parameters, ClassifiedParameters, ParameterIssue};
pub use parser::OpenApiParser;
pub use refs::{RefError, ReferenceTable};
pub use schema::{extract_request_body_schema, extract_response_schema};
pub use version::detect_version;
pub use walker::{walk_operations, OperationWalk, RawOperation};
