//! Generator configuration, loaded from `ftgen.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{GenerateError, GenerateResult};

/// Name of the configuration file looked up in the starting directory.
pub const CONFIG_FILE: &str = "ftgen.toml";

/// Configuration stored in `ftgen.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub source: SourceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Directory name that identifies the output root.
    #[serde(default = "default_module_dir")]
    pub module_dir: String,
    /// Registration namespace whose types are indexed.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Container running the search engine; `${VAR}` expands from the environment.
    #[serde(default = "default_container")]
    pub container: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            module_dir: default_module_dir(),
            namespace: default_namespace(),
            container: default_container(),
        }
    }
}

fn default_module_dir() -> String {
    "document-analysis-service".to_string()
}

fn default_namespace() -> String {
    "document_analysis".to_string()
}

fn default_container() -> String {
    "proceduralnexus-redis-stack-1".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_shell_dir")]
    pub shell_dir: String,
    #[serde(default = "default_powershell_dir")]
    pub powershell_dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            shell_dir: default_shell_dir(),
            powershell_dir: default_powershell_dir(),
        }
    }
}

fn default_shell_dir() -> String {
    "src/main/resources/redis/scripts/sh".to_string()
}

fn default_powershell_dir() -> String {
    "src/main/resources/redis/scripts/ps1".to_string()
}

/// Where type descriptors come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Types compiled into this binary via `#[derive(SearchIndexed)]`.
    #[default]
    Registry,
    /// Rust sources under `scan_dir`, parsed at generation time.
    Scan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    /// Relative to the output root.
    #[serde(default = "default_scan_dir")]
    pub scan_dir: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            scan_dir: default_scan_dir(),
        }
    }
}

fn default_scan_dir() -> String {
    "src/domain".to_string()
}

impl GeneratorConfig {
    /// Load `ftgen.toml` from `dir`, falling back to defaults when it does not exist.
    pub fn load_from(dir: &Path) -> GenerateResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|err| GenerateError::Config {
            message: format!("failed to read {}: {err}", path.display()),
        })?;
        Self::parse(&content).map_err(|err| match err {
            GenerateError::Config { message } => GenerateError::Config {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    pub fn parse(content: &str) -> GenerateResult<Self> {
        toml::from_str(content).map_err(|err| GenerateError::Config {
            message: err.to_string(),
        })
    }

    /// Container name with `${VAR}` expanded.
    pub fn container(&self) -> GenerateResult<String> {
        expand_env(&self.generator.container)
    }

    pub fn shell_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.output.shell_dir)
    }

    pub fn powershell_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.output.powershell_dir)
    }

    pub fn scan_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.source.scan_dir)
    }
}

fn expand_env(value: &str) -> GenerateResult<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).map_err(|_| GenerateError::Config {
            message: format!("environment variable {var_name} not set"),
        })
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.generator.module_dir, "document-analysis-service");
        assert_eq!(config.generator.namespace, "document_analysis");
        assert_eq!(config.generator.container, "proceduralnexus-redis-stack-1");
        assert_eq!(config.output.shell_dir, "src/main/resources/redis/scripts/sh");
        assert_eq!(config.source.kind, SourceKind::Registry);
    }

    #[test]
    fn test_partial_override() {
        let config = GeneratorConfig::parse(
            r#"
            [generator]
            namespace = "billing"

            [source]
            kind = "scan"
            "#,
        )
        .unwrap();
        assert_eq!(config.generator.namespace, "billing");
        assert_eq!(config.generator.module_dir, "document-analysis-service");
        assert_eq!(config.source.kind, SourceKind::Scan);
        assert_eq!(config.source.scan_dir, "src/domain");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = GeneratorConfig::parse("[generator\nnamespace = 1").unwrap_err();
        assert!(matches!(err, GenerateError::Config { .. }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = GeneratorConfig::load_from(temp.path()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "[output]\nshell_dir = \"scripts/sh\"\n",
        )
        .unwrap();
        let config = GeneratorConfig::load_from(temp.path()).unwrap();
        assert_eq!(config.shell_dir(Path::new("/root")), Path::new("/root/scripts/sh"));
        assert_eq!(config.output.powershell_dir, "src/main/resources/redis/scripts/ps1");
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string_pretty(&GeneratorConfig::default()).unwrap();
        assert!(toml_str.contains("module_dir"));
        assert!(toml_str.contains("powershell_dir"));
        assert!(toml_str.contains("kind = \"registry\""));
    }

    #[test]
    #[serial]
    fn test_container_expands_environment() {
        let mut config = GeneratorConfig::default();
        config.generator.container = "${FTGEN_TEST_CONTAINER}".to_string();

        // SAFETY: serialised with the other environment-mutating tests.
        unsafe { std::env::set_var("FTGEN_TEST_CONTAINER", "redis-stack") };
        assert_eq!(config.container().unwrap(), "redis-stack");

        unsafe { std::env::remove_var("FTGEN_TEST_CONTAINER") };
        assert!(matches!(config.container(), Err(GenerateError::Config { .. })));
    }
}
