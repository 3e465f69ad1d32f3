//! The structs
//!
use std::net::Ipv4Addr;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Master,
    Worker,
    /// The node holding the keyserver. At most one per cluster.
    Supervisor,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub hostname: String,
    pub ip: Ipv4Addr,
    pub kind: NodeKind,
}
