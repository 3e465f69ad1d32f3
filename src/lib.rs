//! spire: validate a cluster's setup.yaml, and generate the configuration derived from it.
//!
//! [setup::Config::load_from_project] reads and validates setup.yaml,
//! the functions in [artifacts] derive `cluster.conf`, the local kubeconfig, `prometheus.yaml` and the kube specs from it.
//!
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod error;
pub mod schema;
pub mod network;
pub mod node;
pub mod setup;
pub mod project;
pub mod template;
pub mod artifacts;
pub mod utility;

pub use error::{Result, SchemaError, SpireError};
pub use node::{Node, NodeKind};
pub use setup::Config;
pub use project::Project;
