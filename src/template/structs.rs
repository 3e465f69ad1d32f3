//! The structs and traits
//!
use std::{collections::BTreeMap, path::PathBuf};
use crate::error::Result;

/// Template variables: name -> rendered value.
pub type Variables = BTreeMap<String, String>;

pub trait ResourceLookup {
    fn get_resource(&self, name: &str) -> Result<Vec<u8>>;
}

pub trait Templater {
    /// Render the template named `name` with `variables`.
    fn template(&self, name: &str, variables: &Variables) -> Result<String>;
    /// Render a template that was already read.
    fn template_text(&self, name: &str, text: &str, variables: &Variables) -> Result<String>;
}

/// Resources stored as files under `directory`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    pub directory: PathBuf,
}

/// The resources shipped inside the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

pub struct PlaceholderTemplater<'a> {
    pub resources: &'a dyn ResourceLookup,
}
