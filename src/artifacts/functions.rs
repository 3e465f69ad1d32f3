//! The impls and functions
//!
use std::fmt;
use itertools::Itertools;
use log::*;
use crate::artifacts::EnvFile;
use crate::error::{Result, SpireError};
use crate::node::{Node, NodeKind};
use crate::project::Project;
use crate::setup::Config;
use crate::template::{ResourceLookup, Templater, Variables};

pub const CLUSTER_CONF_HEADER: &str = "# generated by spire from setup.yaml";
pub const KUBECONFIG_TEMPLATE: &str = "kubeconfig-local.yaml";
pub const PROMETHEUS_TEMPLATE: &str = "prometheus.yaml";

const ETCD_CLIENT_PORT: u16 = 2379;
const ETCD_PEER_PORT: u16 = 2380;
const APISERVER_PORT: u16 = 443;
const NODE_EXPORTER_PORT: u16 = 9100;
const ETCD_METRICS_PORT: u16 = 9101;
const PULL_MONITOR_PORT: u16 = 9103;

impl EnvFile {
    pub fn new(header: &str) -> Self {
        EnvFile { header: header.to_string(), entries: Default::default() }
    }
    pub fn insert(
        &mut self,
        key: &str,
        value: impl fmt::Display,
    )
    {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl fmt::Display for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for (key, value) in &self.entries {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Render targets as a literal list: `['a.example.com:9100','b.example.com:9100']`.
pub fn quoted_list<I, T>(
    items: I,
) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    format!("[{}]", items.into_iter().map(|item| format!("'{}'", item)).join(","))
}

fn masters(config: &Config) -> Vec<&Node> {
    config.nodes_of_kind(NodeKind::Master).collect()
}

fn scrape_targets<'a>(
    config: &'a Config,
    nodes: impl Iterator<Item = &'a Node> + 'a,
    port: u16,
) -> String
{
    quoted_list(nodes.map(|node| format!("{}.{}:{}", node.hostname, config.external_domain, port)))
}

/// `<keyserver hostname>.<external-domain>`; fails if no supervisor node is configured.
pub fn get_keyserver_domain(
    config: &Config,
) -> Result<String>
{
    config.keyserver()
        .map(|keyserver| format!("{}.{}", keyserver.hostname, config.external_domain))
        .ok_or(SpireError::NoSupervisor)
}

pub fn get_etcd_endpoints(
    config: &Config,
) -> String
{
    masters(config)
        .iter()
        .map(|node| format!("https://{}:{}", node.ip, ETCD_CLIENT_PORT))
        .join(",")
}

// TODO: remove the single default apiserver once every consumer accepts the full list of masters
pub fn get_apiserver_default_as_node(
    config: &Config,
) -> Result<&Node>
{
    config.get_any_node(NodeKind::Master)
        .map_err(|_| SpireError::NoMasterNodes)
}

pub fn get_apiserver_default(
    config: &Config,
) -> Result<String>
{
    Ok(format!("https://{}:{}", get_apiserver_default_as_node(config)?.ip, APISERVER_PORT))
}

pub fn cluster_conf(
    config: &Config,
) -> Result<EnvFile>
{
    let apiservers = masters(config);

    let mut cconf = EnvFile::new(CLUSTER_CONF_HEADER);
    cconf.insert("APISERVER", get_apiserver_default(config)?);
    cconf.insert("APISERVER_COUNT", apiservers.len());
    cconf.insert("CLUSTER_CIDR", config.cidr_pods);
    cconf.insert("CLUSTER_DOMAIN", &config.internal_domain);
    cconf.insert("DOMAIN", &config.external_domain);
    cconf.insert("ETCD_CLUSTER", apiservers
        .iter()
        .map(|node| format!("{}=https://{}:{}", node.hostname, node.ip, ETCD_PEER_PORT))
        .join(","));
    cconf.insert("ETCD_ENDPOINTS", get_etcd_endpoints(config));
    cconf.insert("ETCD_TOKEN", &config.etcd_token);
    cconf.insert("SERVICE_API", config.service_api);
    cconf.insert("SERVICE_CIDR", config.cidr_services);
    cconf.insert("SERVICE_DNS", config.service_dns);
    debug!("cluster.conf: {} entries", cconf.entries.len());
    Ok(cconf)
}

/// The generated `cluster.conf`.
pub fn get_cluster_conf(
    config: &Config,
) -> Result<String>
{
    Ok(cluster_conf(config)?.to_string())
}

pub fn get_kubeconfig_vars(
    config: &Config,
    project: &Project,
) -> Result<Variables>
{
    let paths = project.kube_cert_paths();
    let mut kconf = Variables::new();
    kconf.insert("APISERVER".to_string(), get_apiserver_default(config)?);
    kconf.insert("AUTHORITY-PATH".to_string(), paths.authority.display().to_string());
    kconf.insert("CERT-PATH".to_string(), paths.cert.display().to_string());
    kconf.insert("KEY-PATH".to_string(), paths.key.display().to_string());
    Ok(kconf)
}

pub fn get_local_kubeconfig(
    config: &Config,
    project: &Project,
    templater: &dyn Templater,
) -> Result<String>
{
    templater.template(KUBECONFIG_TEMPLATE, &get_kubeconfig_vars(config, project)?)
}

pub fn get_prometheus_vars(
    config: &Config,
) -> Result<Variables>
{
    let mut kcli = Variables::new();
    kcli.insert("APISERVER".to_string(), get_apiserver_default_as_node(config)?.ip.to_string());
    kcli.insert("NODE-TARGETS".to_string(), scrape_targets(config, config.nodes.iter(), NODE_EXPORTER_PORT));
    kcli.insert("PULL-TARGETS".to_string(), scrape_targets(
        config,
        config.nodes.iter().filter(|node| node.kind != NodeKind::Supervisor),
        PULL_MONITOR_PORT,
    ));
    kcli.insert("ETCD-TARGETS".to_string(), scrape_targets(config, config.nodes_of_kind(NodeKind::Master), ETCD_METRICS_PORT));
    Ok(kcli)
}

pub fn get_prometheus_yaml(
    config: &Config,
    templater: &dyn Templater,
) -> Result<String>
{
    templater.template(PROMETHEUS_TEMPLATE, &get_prometheus_vars(config)?)
}

/// The variables for the kube specs; `extra_kvs` take precedence over the base variables.
pub fn get_kube_spec_vars(
    config: &Config,
    extra_kvs: Option<&Variables>,
) -> Result<Variables>
{
    let mut kvs = Variables::new();
    kvs.insert("INTERNAL_DOMAIN".to_string(), config.internal_domain.clone());
    kvs.insert("NETWORK".to_string(), config.cidr_pods.to_string());
    kvs.insert("SERVIP_API".to_string(), config.service_api.to_string());
    kvs.insert("SERVIP_DNS".to_string(), config.service_dns.to_string());
    kvs.insert("SOME_APISERVER".to_string(), get_apiserver_default_as_node(config)?.ip.to_string());
    if let Some(extra_kvs) = extra_kvs {
        kvs.extend(extra_kvs.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    Ok(kvs)
}

/// Render the `clustered/<name>` resource.
pub fn get_single_kube_spec(
    config: &Config,
    name: &str,
    extra_kvs: Option<&Variables>,
    resources: &dyn ResourceLookup,
    templater: &dyn Templater,
) -> Result<String>
{
    let resource_name = format!("clustered/{}", name);
    let templ = String::from_utf8(resources.get_resource(&resource_name)?)
        .map_err(|e| SpireError::template(&resource_name, e.to_string()))?;
    templater.template_text(&resource_name, &templ, &get_kube_spec_vars(config, extra_kvs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use crate::template::render_placeholders;

    const SETUP_YAML: &str = r#"
cluster:
  external-domain: example.com
  internal-domain: internal.example.com
  etcd-token: example-etcd-0
  kerberos-realm: EXAMPLE.COM
  mirror: mirror.example.com
  user-grant-domain: example.com
  user-grant-email-domain: example.com
addresses:
  cidr-nodes: 10.0.1.0/24
  cidr-pods: 172.18.0.0/16
  cidr-services: 10.0.0.0/24
  service-api: 10.0.0.1
  service-dns: 10.0.0.2
dns-upstreams: [8.8.8.8]
dns-bootstrap: {}
root-admins: []
nodes:
  - hostname: keys
    ip: 10.0.1.9
    kind: supervisor
  - hostname: node1
    ip: 10.0.1.1
    kind: master
  - hostname: node2
    ip: 10.0.1.2
    kind: master
  - hostname: node3
    ip: 10.0.1.3
    kind: worker
"#;

    fn config() -> Config {
        Config::load_from_string(SETUP_YAML.as_bytes()).unwrap()
    }

    /// Renders the variables back as `KEY=VALUE` lines, without reading resources.
    struct EchoTemplater;

    impl Templater for EchoTemplater {
        fn template(&self, name: &str, variables: &Variables) -> Result<String> {
            Ok(format!("{}\n{}", name, variables.iter().map(|(k, v)| format!("{}={}", k, v)).join("\n")))
        }
        fn template_text(&self, name: &str, text: &str, variables: &Variables) -> Result<String> {
            render_placeholders(name, text, variables)
        }
    }

    struct OneResource(&'static str, &'static str);

    impl ResourceLookup for OneResource {
        fn get_resource(&self, name: &str) -> Result<Vec<u8>> {
            if name == self.0 { Ok(self.1.as_bytes().to_vec()) } else { Err(SpireError::ResourceNotFound(name.to_string())) }
        }
    }

    #[test]
    fn unit_apiserver_is_first_master() {
        let config = config();
        assert_eq!(get_apiserver_default_as_node(&config).unwrap().hostname, "node1");
        assert_eq!(get_apiserver_default(&config).unwrap(), "https://10.0.1.1:443");
    }

    #[test]
    fn unit_no_masters() {
        let config = Config::load_from_string(SETUP_YAML.replace("kind: master", "kind: worker").as_bytes()).unwrap();
        assert!(matches!(get_apiserver_default(&config), Err(SpireError::NoMasterNodes)));
        assert!(matches!(get_cluster_conf(&config), Err(SpireError::NoMasterNodes)));
        assert!(matches!(get_kube_spec_vars(&config, None), Err(SpireError::NoMasterNodes)));
        assert_eq!(get_etcd_endpoints(&config), "");
    }

    #[test]
    fn unit_etcd_endpoints() {
        assert_eq!(get_etcd_endpoints(&config()), "https://10.0.1.1:2379,https://10.0.1.2:2379");
    }

    #[test]
    fn unit_keyserver_domain() {
        assert_eq!(get_keyserver_domain(&config()).unwrap(), "keys.example.com");
        let config = Config::load_from_string(SETUP_YAML.replace("kind: supervisor", "kind: worker").as_bytes()).unwrap();
        assert!(matches!(get_keyserver_domain(&config), Err(SpireError::NoSupervisor)));
    }

    #[test]
    fn unit_cluster_conf() {
        let expected = "# generated by spire from setup.yaml
APISERVER=https://10.0.1.1:443
APISERVER_COUNT=2
CLUSTER_CIDR=172.18.0.0/16
CLUSTER_DOMAIN=internal.example.com
DOMAIN=example.com
ETCD_CLUSTER=node1=https://10.0.1.1:2380,node2=https://10.0.1.2:2380
ETCD_ENDPOINTS=https://10.0.1.1:2379,https://10.0.1.2:2379
ETCD_TOKEN=example-etcd-0
SERVICE_API=10.0.0.1
SERVICE_CIDR=10.0.0.0/24
SERVICE_DNS=10.0.0.2
";
        assert_eq!(get_cluster_conf(&config()).unwrap(), expected);
    }

    #[test]
    fn unit_env_file_sorts_keys() {
        let mut env_file = EnvFile::new("# header");
        env_file.insert("ZED", 1);
        env_file.insert("ALPHA", "a");
        env_file.insert("MID", 2.5);
        assert_eq!(env_file.to_string(), "# header\nALPHA=a\nMID=2.5\nZED=1\n");
    }

    #[test]
    fn unit_quoted_list() {
        assert_eq!(quoted_list(["a:1", "b:2"]), "['a:1','b:2']");
        assert_eq!(quoted_list(Vec::<String>::new()), "[]");
    }

    #[test]
    fn unit_prometheus_vars() {
        let vars = get_prometheus_vars(&config()).unwrap();
        assert_eq!(vars["APISERVER"], "10.0.1.1");
        assert_eq!(vars["NODE-TARGETS"], "['keys.example.com:9100','node1.example.com:9100','node2.example.com:9100','node3.example.com:9100']");
        assert_eq!(vars["PULL-TARGETS"], "['node1.example.com:9103','node2.example.com:9103','node3.example.com:9103']");
        assert_eq!(vars["ETCD-TARGETS"], "['node1.example.com:9101','node2.example.com:9101']");
    }

    #[test]
    fn unit_kubeconfig_vars() {
        let project = Project { directory: PathBuf::from("/srv/cluster") };
        let rendered = get_local_kubeconfig(&config(), &project, &EchoTemplater).unwrap();
        assert_eq!(rendered, "kubeconfig-local.yaml
APISERVER=https://10.0.1.1:443
AUTHORITY-PATH=/srv/cluster/kube-ca.pem
CERT-PATH=/srv/cluster/kube-access.pem
KEY-PATH=/srv/cluster/kube-access.key");
    }

    #[test]
    fn unit_kube_spec_vars_with_extras() {
        let config = config();
        let base = get_kube_spec_vars(&config, None).unwrap();
        assert_eq!(base["INTERNAL_DOMAIN"], "internal.example.com");
        assert_eq!(base["NETWORK"], "172.18.0.0/16");
        assert_eq!(base["SERVIP_API"], "10.0.0.1");
        assert_eq!(base["SERVIP_DNS"], "10.0.0.2");
        assert_eq!(base["SOME_APISERVER"], "10.0.1.1");

        let mut extra = Variables::new();
        extra.insert("NETWORK".to_string(), "override".to_string());
        extra.insert("REPLICAS".to_string(), "3".to_string());
        let merged = get_kube_spec_vars(&config, Some(&extra)).unwrap();
        assert_eq!(merged["NETWORK"], "override");
        assert_eq!(merged["REPLICAS"], "3");
        assert_eq!(merged.len(), base.len() + 1);
    }

    #[test]
    fn unit_single_kube_spec() {
        let resources = OneResource("clustered/dns.yaml", "clusterIP: {{SERVIP_DNS}}\ndomain: {{INTERNAL_DOMAIN}}\n");
        let rendered = get_single_kube_spec(&config(), "dns.yaml", None, &resources, &EchoTemplater).unwrap();
        assert_eq!(rendered, "clusterIP: 10.0.0.2\ndomain: internal.example.com\n");
        assert!(matches!(get_single_kube_spec(&config(), "flannel.yaml", None, &resources, &EchoTemplater), Err(SpireError::ResourceNotFound(_))));
    }
}
