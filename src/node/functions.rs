//! The impls and functions
//!
use std::{fmt, str::FromStr};
use serde_yaml::Value;
use crate::error::{Result, SpireError};
use crate::network::parse_address;
use crate::node::{Node, NodeKind};
use crate::schema::{display_value, Schema};

const NODE: Schema = Schema::new("nodes", &["hostname", "ip", "kind"]);

impl NodeKind {
    pub const VALID_NODE_KINDS: [NodeKind; 3] = [NodeKind::Master, NodeKind::Worker, NodeKind::Supervisor];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Master => "master",
            NodeKind::Worker => "worker",
            NodeKind::Supervisor => "supervisor",
        }
    }
}

impl FromStr for NodeKind {
    type Err = SpireError;

    fn from_str(kind: &str) -> Result<Self> {
        NodeKind::VALID_NODE_KINDS
            .into_iter()
            .find(|valid| valid.as_str() == kind)
            .ok_or_else(|| SpireError::InvalidNodeKind(kind.to_string()))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    /// Build a node from one entry of `nodes`: exactly `hostname`, `ip` and `kind`.
    /// Values are taken as rendered, so a non-string `kind` is an invalid kind.
    pub fn new(
        config: &Value,
    ) -> Result<Self>
    {
        let values = NODE.check(config)?;
        let (hostname, ip, kind) = (display_value(values[0]), display_value(values[1]), display_value(values[2]));
        Ok(Node {
            hostname,
            ip: parse_address(&ip)?,
            kind: kind.parse()?,
        })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} node {} ({})", self.kind, self.hostname, self.ip)
    }
}
