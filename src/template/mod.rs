//! Module for rendering generated files from templates and resources.
//!
//! Templates and the initial setup.yaml are resources, looked up by name through [ResourceLookup].
//! A template is rendered through [Templater] with a set of [Variables].
//! The provided implementations are:
//! - [BundledResources]: the `resources/` directory of this package, compiled into the binary. This is the default.
//! - [DirectoryResources]: resources are files in a directory, `clustered/<name>` is a subdirectory.
//! - [PlaceholderTemplater]: replaces `{{KEY}}` with the value of `KEY`.
//!
//! Any other implementation of the traits can be handed to the functions in [crate::artifacts].
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
