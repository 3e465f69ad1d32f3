//! Module for the entries of `nodes` in setup.yaml.
//!
//! A node is one machine in the cluster:
//! ```text
//! nodes:
//!   - hostname: eggs-benedict
//!     ip: 18.4.60.150
//!     kind: supervisor
//! ```
//! The kind is one of `master`, `worker` or `supervisor` ([NodeKind]).
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
