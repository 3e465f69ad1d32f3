//! The impls and functions
//!
use std::{collections::BTreeMap, net::Ipv4Addr, path::Path};
use log::*;
use serde_yaml::Value;
use crate::error::{Result, SpireError};
use crate::network::{parse_address, Ipv4Network};
use crate::node::{Node, NodeKind};
use crate::project::Project;
use crate::schema::{as_mapping, as_sequence, as_string_list, display_value, is_string, Schema};
use crate::setup::Config;
use crate::utility;

const ROOT: Schema = Schema::new(
    "setup.yaml",
    &["cluster", "addresses", "dns-upstreams", "dns-bootstrap", "root-admins", "nodes"],
);
const CLUSTER: Schema = Schema::with_validator(
    "cluster",
    &["external-domain", "internal-domain", "etcd-token", "kerberos-realm", "mirror", "user-grant-domain", "user-grant-email-domain"],
    is_string,
);
const ADDRESSES: Schema = Schema::with_validator(
    "addresses",
    &["cidr-nodes", "cidr-pods", "cidr-services", "service-api", "service-dns"],
    is_string,
);

impl Config {
    /// Validate the parsed document and build the configuration.
    /// The checks are performed in document order, and the first failure is returned.
    pub fn new(
        kv: &Value,
    ) -> Result<Self>
    {
        let root = ROOT.check(kv)?;
        let (v_cluster, v_addresses, v_dns_upstreams, v_dns_bootstrap, v_root_admins, v_nodes) =
            (root[0], root[1], root[2], root[3], root[4], root[5]);

        let cluster = strings(CLUSTER.check(v_cluster)?);
        let addresses = strings(ADDRESSES.check(v_addresses)?);
        let cidr_nodes: Ipv4Network = addresses[0].parse()?;
        let cidr_pods: Ipv4Network = addresses[1].parse()?;
        let cidr_services: Ipv4Network = addresses[2].parse()?;
        let service_api = parse_address(addresses[3])?;
        let service_dns = parse_address(addresses[4])?;

        for address in [service_api, service_dns] {
            if !cidr_services.contains(&address) {
                return Err(SpireError::ServiceAddressOutOfRange { address: address.to_string(), cidr: cidr_services.to_string() });
            }
        }

        let dns_upstreams = as_sequence(v_dns_upstreams, "dns-upstreams")?
            .iter()
            .map(|server| parse_address(&display_value(server)))
            .collect::<Result<Vec<Ipv4Addr>>>()?;

        let dns_bootstrap = as_mapping(v_dns_bootstrap, "dns-bootstrap")?
            .iter()
            .map(|(hostname, ip)| -> Result<(String, Ipv4Addr)> {
                Ok((display_value(hostname), parse_address(&display_value(ip))?))
            })
            .collect::<Result<BTreeMap<String, Ipv4Addr>>>()?;

        let root_admins = as_string_list(v_root_admins, "root-admins")?;

        let nodes = as_sequence(v_nodes, "nodes")?
            .iter()
            .map(Node::new)
            .collect::<Result<Vec<Node>>>()?;
        debug!("{} nodes configured", nodes.len());

        let mut keyserver: Option<Node> = None;
        for node in nodes.iter().filter(|node| node.kind == NodeKind::Supervisor) {
            if keyserver.is_some() {
                return Err(SpireError::MultipleSupervisorsUnsupported);
            }
            keyserver = Some(node.clone());
        }
        match &keyserver {
            Some(node) => debug!("keyserver: {}", node),
            None => debug!("no supervisor node configured, keyserver not available"),
        }

        Ok(Config {
            external_domain: cluster[0].to_string(),
            internal_domain: cluster[1].to_string(),
            etcd_token: cluster[2].to_string(),
            realm: cluster[3].to_string(),
            mirror: cluster[4].to_string(),
            user_grant_domain: cluster[5].to_string(),
            user_grant_email_domain: cluster[6].to_string(),
            cidr_nodes,
            cidr_pods,
            cidr_services,
            service_api,
            service_dns,
            dns_upstreams,
            dns_bootstrap,
            root_admins,
            nodes,
            keyserver,
        })
    }
    pub fn load_from_string(
        contents: &[u8],
    ) -> Result<Self>
    {
        let kv: Value = serde_yaml::from_slice(contents)?;
        Config::new(&kv)
    }
    pub fn load_from_file(
        filepath: &Path,
    ) -> Result<Self>
    {
        info!("loading {}", filepath.display());
        Config::load_from_string(&utility::readfile(filepath)?)
    }
    pub fn load_from_project(
        project: &Project,
    ) -> Result<Self>
    {
        Config::load_from_file(&project.setup_path())
    }
    /// The supervisor node, if one is configured.
    pub fn keyserver(&self) -> Option<&Node> {
        self.keyserver.as_ref()
    }
    // TODO: make kerberos an explicit setting instead of deriving it from root-admins
    pub fn is_kerberos_enabled(&self) -> bool {
        !self.root_admins.is_empty()
    }
    pub fn has_node(
        &self,
        node_name: &str,
    ) -> bool
    {
        self.nodes.iter().any(|node| node.hostname == node_name)
    }
    pub fn get_node(
        &self,
        node_name: &str,
    ) -> Result<&Node>
    {
        self.nodes
            .iter()
            .find(|node| node.hostname == node_name)
            .ok_or_else(|| SpireError::NoSuchNode(node_name.to_string()))
    }
    /// The first node of `kind`, in the order of setup.yaml.
    pub fn get_any_node(
        &self,
        kind: NodeKind,
    ) -> Result<&Node>
    {
        self.nodes
            .iter()
            .find(|node| node.kind == kind)
            .ok_or_else(|| SpireError::NoNodeOfKind(kind.to_string()))
    }
    pub fn nodes_of_kind(
        &self,
        kind: NodeKind,
    ) -> impl Iterator<Item = &Node>
    {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }
    /// Normalize a bare, internal or external node name to `<hostname>.<external-domain>`.
    ///
    /// The external domain suffix is stripped first, then the internal one; the first result that is
    /// a configured hostname is used, so an internal domain that is a subdomain of the external domain
    /// still resolves. A name is only taken as is when neither suffix matches.
    pub fn get_fqdn(
        &self,
        name: &str,
    ) -> Result<String>
    {
        let external_suffix = format!(".{}", self.external_domain);
        let internal_suffix = format!(".{}", self.internal_domain);
        let mut candidates: Vec<&str> = [name.strip_suffix(&external_suffix), name.strip_suffix(&internal_suffix)]
            .into_iter()
            .flatten()
            .collect();
        if candidates.is_empty() {
            candidates.push(name);
        }
        let hostname = candidates
            .into_iter()
            .find(|candidate| self.has_node(candidate))
            .ok_or_else(|| SpireError::NoSuchNode(name.to_string()))?;
        Ok(format!("{}.{}", hostname, self.external_domain))
    }
}

// the CLUSTER and ADDRESSES validators guarantee strings.
fn strings(values: Vec<&Value>) -> Vec<&str> {
    values.into_iter().map(|value| value.as_str().unwrap_or_default()).collect()
}
