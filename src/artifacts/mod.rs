//! Module for the artifacts derived from a loaded [crate::setup::Config].
//!
//! Every function here is pure: it only reads the configuration it is handed,
//! and produces the same output for the same configuration.
//! - `cluster.conf` ([get_cluster_conf]): the cluster parameters as `KEY=VALUE` lines, sorted by key.
//! - the local kubeconfig ([get_local_kubeconfig]): points at the default apiserver, with the project's access certificates.
//! - `prometheus.yaml` ([get_prometheus_yaml]): the node, pull and etcd scrape targets.
//! - kube specs ([get_single_kube_spec]): the `clustered/<name>` resources, rendered with [get_kube_spec_vars].
//!
//! The default apiserver is the first master node in the order of setup.yaml.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
