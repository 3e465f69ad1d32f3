//! Error types for loading setup.yaml and deriving configuration from it.
//!
//! Every failure is raised where it is detected and travels back to the caller unmodified.
//! The binary prints the message and exits with a non-zero status.
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the key-set and predicate checks in [crate::schema].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unexpected key {0} in config")]
    UnexpectedKey(String),
    #[error("could not find expected key {0} in config")]
    MissingKey(String),
    #[error("config failed validation: key {key} had invalid value {value}")]
    ValidationFailed { key: String, value: String },
    #[error("in config: expected {0} to be a mapping")]
    NotAMapping(String),
    #[error("in config: expected {0} to be a list")]
    NotAList(String),
    #[error("in config: expected every element of {0} to be a string")]
    NotAString(String),
}

#[derive(Debug, Error)]
pub enum SpireError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("invalid IPv4 address: {0}")]
    AddressParse(String),
    #[error("invalid IPv4 network: {0}")]
    CidrParse(String),
    #[error("could not parse setup.yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid node kind: {0}")]
    InvalidNodeKind(String),
    #[error("in config: expected service IPs to be in the correct CIDR ({address} not in {cidr})")]
    ServiceAddressOutOfRange { address: String, cidr: String },
    #[error("in config: multiple supervisors not yet supported")]
    MultipleSupervisorsUnsupported,
    #[error("no such node: {0}")]
    NoSuchNode(String),
    #[error("cannot find any nodes of kind {0}")]
    NoNodeOfKind(String),
    #[error("no apiserver to select, because no master nodes were configured")]
    NoMasterNodes,
    #[error("no keyserver available, because no supervisor node was configured")]
    NoSupervisor,

    #[error("io error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("no HOMEWORLD_DIR environment variable declared")]
    ProjectNotSet,
    #[error("HOMEWORLD_DIR ({}) is not a directory that exists", .0.display())]
    ProjectNotADirectory(PathBuf),
    #[error("setup.yaml already exists")]
    SetupExists,
    #[error("setup.yaml does not exist (run spire config populate first?)")]
    SetupMissing,
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("template {name}: {message}")]
    Template { name: String, message: String },
    #[error("editor {editor} failed: {message}")]
    Editor { editor: String, message: String },
}

impl SpireError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpireError::Io { path: path.into(), source }
    }
    pub fn template(name: &str, message: impl Into<String>) -> Self {
        SpireError::Template { name: name.to_string(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, SpireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_schema_error_names_key() {
        let error: SpireError = SchemaError::UnexpectedKey("bogus".to_string()).into();
        assert_eq!(error.to_string(), "unexpected key bogus in config");
        let error: SpireError = SchemaError::MissingKey("nodes".to_string()).into();
        assert_eq!(error.to_string(), "could not find expected key nodes in config");
    }

    #[test]
    fn unit_validation_failed_message() {
        let error = SchemaError::ValidationFailed { key: "mirror".to_string(), value: "3".to_string() };
        assert_eq!(error.to_string(), "config failed validation: key mirror had invalid value 3");
    }
}
