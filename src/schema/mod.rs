//! Module for validating the fixed-shape mappings in setup.yaml.
//!
//! Every block of setup.yaml with a known shape is described by a [Schema]:
//! an ordered list of the keys that must be present, and a predicate that every value must satisfy.
//! The checks are performed in this order:
//! - every key in the mapping must be an expected key ([crate::SchemaError::UnexpectedKey]).
//! - every expected key must be present ([crate::SchemaError::MissingKey]).
//! - every key/value pair must satisfy the predicate ([crate::SchemaError::ValidationFailed]).
//!
//! On success, the values are returned in the order of the expected keys,
//! so the caller can destructure them positionally.
//!
//! The schema functionality is called from:
//! - [crate::setup::Config::new] (the root, `cluster` and `addresses` blocks)
//! - [crate::node::Node::new] (each entry of `nodes`)
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
