//! Module for the project directory, which holds setup.yaml and the kube access certificates.
//!
//! The project directory is set with `HOMEWORLD_DIR` (which can be set in `.env`),
//! or with the `--project-dir` switch.
//! Only the binary resolves the environment; the library functions are handed a [Project].
//!
//! The project functionality is called from:
//! - [crate::setup::Config::load_from_project]
//! - [crate::artifacts::get_kubeconfig_vars] (certificate paths)
//! - the `spire config populate` and `spire config edit` commands ([populate], [edit]).
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
