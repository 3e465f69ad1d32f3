//! The structs
//!
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub directory: PathBuf,
}

/// The paths of the kube access key, certificate and authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubeCertPaths {
    pub key: PathBuf,
    pub cert: PathBuf,
    pub authority: PathBuf,
}
