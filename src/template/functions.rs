//! The impls and functions
//!
use std::{io::ErrorKind, path::PathBuf, fs};
use log::*;
use regex::Regex;
use crate::error::{Result, SpireError};
use crate::template::{BundledResources, DirectoryResources, PlaceholderTemplater, ResourceLookup, Templater, Variables};

static BUNDLED: [(&str, &[u8]); 4] = [
    ("setup.yaml", include_bytes!("../../resources/setup.yaml")),
    ("kubeconfig-local.yaml", include_bytes!("../../resources/kubeconfig-local.yaml")),
    ("prometheus.yaml", include_bytes!("../../resources/prometheus.yaml")),
    ("clustered/dns-service.yaml", include_bytes!("../../resources/clustered/dns-service.yaml")),
];

impl DirectoryResources {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        DirectoryResources { directory: directory.into() }
    }
}

impl ResourceLookup for DirectoryResources {
    fn get_resource(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.directory.join(name);
        debug!("resource {}: {}", name, path.display());
        fs::read(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SpireError::ResourceNotFound(name.to_string()),
                _ => SpireError::io(&path, e),
            })
    }
}

impl BundledResources {
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(name, _)| *name)
    }
}

impl ResourceLookup for BundledResources {
    fn get_resource(&self, name: &str) -> Result<Vec<u8>> {
        debug!("resource {}: bundled", name);
        BUNDLED
            .iter()
            .find(|(bundled, _)| *bundled == name)
            .map(|(_, contents)| contents.to_vec())
            .ok_or_else(|| SpireError::ResourceNotFound(name.to_string()))
    }
}

impl<'a> PlaceholderTemplater<'a> {
    pub fn new(resources: &'a dyn ResourceLookup) -> Self {
        PlaceholderTemplater { resources }
    }
}

impl Templater for PlaceholderTemplater<'_> {
    fn template(&self, name: &str, variables: &Variables) -> Result<String> {
        let contents = self.resources.get_resource(name)?;
        let text = String::from_utf8(contents)
            .map_err(|e| SpireError::template(name, e.to_string()))?;
        self.template_text(name, &text, variables)
    }
    fn template_text(&self, name: &str, text: &str, variables: &Variables) -> Result<String> {
        render_placeholders(name, text, variables)
    }
}

/// Replace every `{{KEY}}` in `text`. A placeholder without a variable is an error.
pub fn render_placeholders(
    name: &str,
    text: &str,
    variables: &Variables,
) -> Result<String>
{
    let placeholder = Regex::new(r"\{\{([A-Za-z0-9_.-]+)\}\}")
        .map_err(|e| SpireError::template(name, e.to_string()))?;
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for captures in placeholder.captures_iter(text) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else { continue };
        let value = variables
            .get(key.as_str())
            .ok_or_else(|| SpireError::template(name, format!("no value for placeholder {}", key.as_str())))?;
        output.push_str(&text[last..whole.start()]);
        output.push_str(value);
        last = whole.end();
    }
    output.push_str(&text[last..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn variables(pairs: &[(&str, &str)]) -> Variables {
        pairs.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
    }

    #[test]
    fn unit_render_placeholders() {
        let vars = variables(&[("APISERVER", "https://10.0.1.1:443"), ("KEY-PATH", "/p/kube-access.key")]);
        let result = render_placeholders("kubeconfig", "server: {{APISERVER}}\nkey: {{KEY-PATH}}\nagain: {{APISERVER}}\n", &vars).unwrap();
        assert_eq!(result, "server: https://10.0.1.1:443\nkey: /p/kube-access.key\nagain: https://10.0.1.1:443\n");
    }

    #[test]
    fn unit_render_leaves_other_braces() {
        let vars = variables(&[("A", "1")]);
        assert_eq!(render_placeholders("t", "{a: {{A}}} {{ not a placeholder }}", &vars).unwrap(), "{a: 1} {{ not a placeholder }}");
    }

    #[test]
    fn unit_render_unknown_placeholder() {
        let result = render_placeholders("prometheus.yaml", "{{MISSING}}", &Variables::new());
        assert!(matches!(result, Err(SpireError::Template { name, .. }) if name == "prometheus.yaml"));
    }

    #[test]
    fn unit_directory_resources() {
        let scratch = TempDir::new().unwrap();
        let directory = scratch.path();
        fs::create_dir_all(directory.join("clustered")).unwrap();
        fs::write(directory.join("clustered").join("dns.yaml"), "ip: {{SERVIP_DNS}}\n").unwrap();

        let resources = DirectoryResources::new(directory);
        let templater = PlaceholderTemplater::new(&resources);
        let result = templater.template("clustered/dns.yaml", &variables(&[("SERVIP_DNS", "10.0.0.2")])).unwrap();
        assert_eq!(result, "ip: 10.0.0.2\n");
        assert!(matches!(resources.get_resource("missing.yaml"), Err(SpireError::ResourceNotFound(name)) if name == "missing.yaml"));
    }

    #[test]
    fn unit_bundled_resources() {
        let resources = BundledResources;
        for name in BundledResources::names() {
            assert!(!resources.get_resource(name).unwrap().is_empty(), "{} is empty", name);
        }
        let setup_yaml = String::from_utf8(resources.get_resource("setup.yaml").unwrap()).unwrap();
        assert!(setup_yaml.contains("external-domain: mit.edu"));
        assert!(matches!(resources.get_resource("clustered/missing.yaml"), Err(SpireError::ResourceNotFound(name)) if name == "clustered/missing.yaml"));
    }

    #[test]
    fn unit_bundled_template_renders() {
        let templater = PlaceholderTemplater::new(&BundledResources);
        let result = templater.template("clustered/dns-service.yaml", &variables(&[("SERVIP_DNS", "10.0.0.2"), ("INTERNAL_DOMAIN", "cluster.local")]));
        assert!(matches!(result, Ok(spec) if spec.contains("10.0.0.2")));
    }
}
