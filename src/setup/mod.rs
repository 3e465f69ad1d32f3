//! Module for loading and validating setup.yaml into a [Config].
//!
//! setup.yaml is the single declarative description of a cluster:
//! ```text
//! cluster:
//!   external-domain: mit.edu
//!   internal-domain: hyades.local
//!   etcd-token: hyades-etcd-0
//!   kerberos-realm: ATHENA.MIT.EDU
//!   mirror: homeworld.private
//!   user-grant-domain: mit.edu
//!   user-grant-email-domain: mit.edu
//! addresses:
//!   cidr-nodes: 18.4.60.0/23
//!   cidr-pods: 172.18.0.0/16
//!   cidr-services: 172.28.0.0/16
//!   service-api: 172.28.0.1
//!   service-dns: 172.28.0.2
//! dns-upstreams:
//!   - 18.70.0.160
//! dns-bootstrap:
//!   homeworld.private: 18.4.60.150
//! root-admins:
//!   - cela
//! nodes:
//!   - hostname: eggs-benedict
//!     ip: 18.4.60.150
//!     kind: supervisor
//! ```
//! Loading is all-or-nothing: every check is performed while the [Config] is constructed,
//! and the first failure aborts the load. A loaded [Config] is never modified.
//! Nothing is cached: every load reads and validates the document again.
//!
//! The setup functionality is called from:
//! - [crate::artifacts] (every derivation starts from a loaded [Config])
//! - the `spire config show` commands in the binary.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
