//! The impls and functions
//!
use std::{fs, path::{Path, PathBuf}, process::Command};
use log::*;
use crate::error::{Result, SpireError};
use crate::project::{KubeCertPaths, Project};
use crate::template::ResourceLookup;
use crate::utility;

pub const SETUP_YAML: &str = "setup.yaml";

impl Project {
    /// Use `directory` as the project directory.
    /// If it doesn't exist, it is created when `create_dir_if_missing` is set, otherwise this fails.
    pub fn open(
        directory: impl Into<PathBuf>,
        create_dir_if_missing: bool,
    ) -> Result<Self>
    {
        let directory = directory.into();
        if !directory.is_dir() {
            if create_dir_if_missing {
                info!("creating project directory {}", directory.display());
                fs::create_dir(&directory)
                    .map_err(|e| SpireError::io(&directory, e))?;
            } else {
                return Err(SpireError::ProjectNotADirectory(directory));
            }
        }
        Ok(Project { directory })
    }
    pub fn setup_path(&self) -> PathBuf {
        self.directory.join(SETUP_YAML)
    }
    pub fn kube_cert_paths(&self) -> KubeCertPaths {
        KubeCertPaths {
            key: self.directory.join("kube-access.key"),
            cert: self.directory.join("kube-access.pem"),
            authority: self.directory.join("kube-ca.pem"),
        }
    }
}

/// Initialize the project's setup.yaml from the `setup.yaml` resource.
pub fn populate(
    project: &Project,
    resources: &dyn ResourceLookup,
) -> Result<PathBuf>
{
    let setup_yaml = project.setup_path();
    if setup_yaml.exists() {
        return Err(SpireError::SetupExists);
    }
    utility::writefile(&setup_yaml, &resources.get_resource(SETUP_YAML)?)?;
    info!("filled out {}", setup_yaml.display());
    Ok(setup_yaml)
}

/// Open `editor` on the project's setup.yaml, and wait for it to finish.
pub fn edit(
    project: &Project,
    editor: &str,
) -> Result<()>
{
    let setup_yaml = project.setup_path();
    if !setup_yaml.exists() {
        return Err(SpireError::SetupMissing);
    }
    run_editor(editor, &setup_yaml)
}

fn run_editor(
    editor: &str,
    path: &Path,
) -> Result<()>
{
    debug!("running {} -- {}", editor, path.display());
    let status = Command::new(editor)
        .arg("--")
        .arg(path)
        .status()
        .map_err(|e| SpireError::Editor { editor: editor.to_string(), message: e.to_string() })?;
    if !status.success() {
        return Err(SpireError::Editor { editor: editor.to_string(), message: status.to_string() });
    }
    Ok(())
}
