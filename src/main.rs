//! spire: the command line interface.
//!
//! Every command resolves the project directory, loads setup.yaml from it,
//! and prints what is derived from it. Failures are printed and exit with a non-zero status.
//!
use std::{env, path::PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use log::*;

use spire::artifacts;
use spire::project;
use spire::template::{BundledResources, DirectoryResources, PlaceholderTemplater, ResourceLookup, Variables};
use spire::{Config, NodeKind, Project};

const DEFAULT_EDITOR: &str = "nano";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    /// Project directory holding setup.yaml (default: HOMEWORLD_DIR)
    #[arg(short = 'd', long, value_name = "directory")]
    project_dir: Option<PathBuf>,
    /// Directory holding the templates and initial setup.yaml (default: SPIRE_RESOURCES, or the resources built into spire)
    #[arg(short, long, value_name = "directory")]
    resource_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// commands about cluster configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// initialize the cluster's setup.yaml with the template
    Populate,
    /// open $EDITOR (defaults to nano) to edit the project's setup.yaml
    Edit,
    /// commands about showing different aspects of the configuration
    Show {
        #[command(subcommand)]
        what: ShowCommands,
    },
    /// print the fully qualified name of a node
    Fqdn { name: String },
    /// print the keyserver domain
    Keyserver,
    /// print the etcd client endpoints
    EtcdEndpoints,
    /// print the default apiserver
    Apiserver,
    /// render a kube spec from the clustered resources, with extra KEY=VALUE variables
    KubeSpec {
        name: String,
        extra: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ShowCommands {
    /// display the generated cluster.conf
    #[command(name = "cluster.conf")]
    ClusterConf,
    /// display the generated local kubeconfig
    Kubeconfig,
    /// display the generated prometheus.yaml
    #[command(name = "prometheus.yaml")]
    PrometheusYaml,
    /// display the configured nodes
    Nodes,
    /// display the loaded setup.yaml as json
    Json,
}

fn main() -> Result<()>
{
    dotenv::dotenv().ok();
    env_logger::init();

    let options = Opts::parse();
    match &options.command {
        Commands::Config { command } => run_config_command(command, &options),
    }
}

fn set_project_dir(
    option: &Option<PathBuf>,
) -> Result<PathBuf>
{
    // is --project-dir/-d set?
    if let Some(directory) = option {
        info!("project-dir argument set: using: {}", directory.display());
        return Ok(directory.clone());
    }
    // is the environment variable HOMEWORLD_DIR set (via dotenv().ok())?
    match env::var("HOMEWORLD_DIR") {
        Ok(set_var) => {
            info!("project-dir not set: set via HOMEWORLD_DIR: {}", set_var);
            Ok(PathBuf::from(set_var))
        }
        Err(_e) => Err(spire::SpireError::ProjectNotSet.into()),
    }
}

fn set_resource_dir(
    option: &Option<PathBuf>,
) -> Box<dyn ResourceLookup>
{
    if let Some(directory) = option {
        info!("resource-dir argument set: using: {}", directory.display());
        return Box::new(DirectoryResources::new(directory));
    }
    match env::var("SPIRE_RESOURCES") {
        Ok(set_var) => {
            info!("resource-dir not set: set via SPIRE_RESOURCES: {}", set_var);
            Box::new(DirectoryResources::new(set_var))
        }
        Err(_e) => {
            info!("resource-dir not set: and not set via SPIRE_RESOURCES: using bundled resources");
            Box::new(BundledResources)
        }
    }
}

fn get_editor() -> String {
    env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string())
}

fn parse_extra_kvs(
    extra: &[String],
) -> Result<Variables>
{
    let mut kvs = Variables::new();
    for pair in extra {
        match pair.split_once('=') {
            Some((key, value)) => { kvs.insert(key.to_string(), value.to_string()); },
            None => bail!("expected KEY=VALUE, got: {}", pair),
        }
    }
    Ok(kvs)
}

fn run_config_command(
    command: &ConfigCommands,
    options: &Opts,
) -> Result<()>
{
    let project_dir = set_project_dir(&options.project_dir)?;
    let create_dir_if_missing = matches!(command, ConfigCommands::Populate);
    let project = Project::open(project_dir, create_dir_if_missing)?;
    let resources = set_resource_dir(&options.resource_dir);
    let templater = PlaceholderTemplater::new(&*resources);

    match command {
        ConfigCommands::Populate => {
            project::populate(&project, &*resources)?;
            println!("filled out setup.yaml");
        }
        ConfigCommands::Edit => {
            project::edit(&project, &get_editor())?;
        }
        ConfigCommands::Show { what } => {
            let config = Config::load_from_project(&project)?;
            match what {
                ShowCommands::ClusterConf => println!("{}", artifacts::get_cluster_conf(&config)?),
                ShowCommands::Kubeconfig => println!("{}", artifacts::get_local_kubeconfig(&config, &project, &templater)?),
                ShowCommands::PrometheusYaml => println!("{}", artifacts::get_prometheus_yaml(&config, &templater)?),
                ShowCommands::Nodes => print_nodes(&config)?,
                ShowCommands::Json => println!("{}", serde_json::to_string_pretty(&config)
                    .with_context(|| "Unable to serialize setup.yaml as json")?),
            }
        }
        ConfigCommands::Fqdn { name } => {
            let config = Config::load_from_project(&project)?;
            println!("{}", config.get_fqdn(name)?);
        }
        ConfigCommands::Keyserver => {
            let config = Config::load_from_project(&project)?;
            println!("{}", artifacts::get_keyserver_domain(&config)?);
        }
        ConfigCommands::EtcdEndpoints => {
            let config = Config::load_from_project(&project)?;
            println!("{}", artifacts::get_etcd_endpoints(&config));
        }
        ConfigCommands::Apiserver => {
            let config = Config::load_from_project(&project)?;
            println!("{}", artifacts::get_apiserver_default(&config)?);
        }
        ConfigCommands::KubeSpec { name, extra } => {
            let config = Config::load_from_project(&project)?;
            let extra_kvs = parse_extra_kvs(extra)?;
            let spec = artifacts::get_single_kube_spec(&config, name, Some(&extra_kvs), &*resources, &templater)
                .with_context(|| format!("Unable to render kube spec: {}", name))?;
            println!("{}", spec);
        }
    }
    Ok(())
}

fn print_nodes(
    config: &Config,
) -> Result<()>
{
    for node in &config.nodes {
        let kind = match node.kind {
            NodeKind::Master => node.kind.as_str().green(),
            NodeKind::Worker => node.kind.as_str().normal(),
            NodeKind::Supervisor => node.kind.as_str().yellow(),
        };
        println!("{:30} {:15} {}", config.get_fqdn(&node.hostname)?, node.ip.to_string(), kind);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parse_extra_kvs() {
        let kvs = parse_extra_kvs(&["REPLICAS=3".to_string(), "ARGS=a=b".to_string()]).unwrap();
        assert_eq!(kvs["REPLICAS"], "3");
        assert_eq!(kvs["ARGS"], "a=b");
        assert!(parse_extra_kvs(&["REPLICAS".to_string()]).is_err());
    }

    #[test]
    fn unit_parse_show_cluster_conf() {
        let options = Opts::try_parse_from(["spire", "-d", "/tmp/cluster", "config", "show", "cluster.conf"]).unwrap();
        assert_eq!(options.project_dir, Some(PathBuf::from("/tmp/cluster")));
        assert!(matches!(options.command, Commands::Config { command: ConfigCommands::Show { what: ShowCommands::ClusterConf } }));
    }

    #[test]
    fn unit_resource_dir_argument_wins() {
        let resources = set_resource_dir(&Some(PathBuf::from("/nonexistent/spire-resources")));
        assert!(matches!(resources.get_resource("setup.yaml"), Err(spire::SpireError::ResourceNotFound(_))));
    }

    #[test]
    fn unit_parse_kube_spec_extras() {
        let options = Opts::try_parse_from(["spire", "config", "kube-spec", "dns.yaml", "A=1", "B=2"]).unwrap();
        match options.command {
            Commands::Config { command: ConfigCommands::KubeSpec { name, extra } } => {
                assert_eq!(name, "dns.yaml");
                assert_eq!(extra, vec!["A=1", "B=2"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
