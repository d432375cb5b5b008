use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use teardown::{BackendMode, DEFAULT_NAMESPACE};
use thiserror::Error;

/// Errors loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(home.join(".config").join("appctl"))
}

/// Get the default config file path
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Config File
// ============================================================================

/// Contents of config.toml. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Use the cluster backend by default
    pub cluster: Option<bool>,
    /// Default namespace
    pub namespace: Option<String>,
    /// kubectl executable
    pub kubectl: Option<String>,
    /// docker executable
    pub docker: Option<String>,
}

impl FileConfig {
    /// Parse config contents
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from an explicit path (must exist) or the default path (may be absent)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path()?, false),
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if required {
                    Err(ConfigError::NotFound(path))
                } else {
                    log::debug!("No config file at {}", path.display());
                    Ok(Self::default())
                }
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Resolved, immutable configuration for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mode: BackendMode,
    pub dry_run: bool,
    pub namespace: String,
    pub kubectl: String,
    pub docker: String,
}

/// Flag values that override the config file
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub cluster: Option<bool>,
    pub dry_run: bool,
}

impl Settings {
    /// Merge defaults, the config file and command-line flags
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let cluster = overrides.cluster.or(file.cluster).unwrap_or(false);

        Self {
            mode: BackendMode::from_cluster_flag(cluster),
            dry_run: overrides.dry_run,
            namespace: file
                .namespace
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            kubectl: expand(file.kubectl.as_deref().unwrap_or("kubectl")),
            docker: expand(file.docker.as_deref().unwrap_or("docker")),
        }
    }

    /// Namespace from a command option, falling back to the configured one
    pub fn namespace_or(&self, option: Option<&str>) -> String {
        option.map_or_else(|| self.namespace.clone(), str::to_string)
    }
}

fn expand(program: &str) -> String {
    shellexpand::tilde(program).into_owned()
}
