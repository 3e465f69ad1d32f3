//! The structs
//!
use std::{collections::BTreeMap, net::Ipv4Addr};
use crate::network::Ipv4Network;
use crate::node::Node;

/// The validated contents of setup.yaml.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // cluster
    pub external_domain: String,
    pub internal_domain: String,
    pub etcd_token: String,
    pub realm: String,
    pub mirror: String,
    pub user_grant_domain: String,
    pub user_grant_email_domain: String,
    // addresses
    pub cidr_nodes: Ipv4Network,
    pub cidr_pods: Ipv4Network,
    pub cidr_services: Ipv4Network,
    pub service_api: Ipv4Addr,
    pub service_dns: Ipv4Addr,
    pub dns_upstreams: Vec<Ipv4Addr>,
    /// hostname -> address
    pub dns_bootstrap: BTreeMap<String, Ipv4Addr>,
    pub root_admins: Vec<String>,
    /// In the order of setup.yaml; the first master is the default apiserver.
    pub nodes: Vec<Node>,
    /// The supervisor node, if one is configured; read it with [Config::keyserver].
    pub(super) keyserver: Option<Node>,
}
