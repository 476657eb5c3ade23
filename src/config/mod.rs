// ABOUTME: Configuration types and parsing for skopos.yml.
// ABOUTME: Handles YAML parsing, target shorthand, and env-var configuration.

mod retry;
mod target;

pub use retry::RetryConfig;
pub use target::DeploymentTarget;

use crate::error::{Error, Result};
use nonempty::NonEmpty;
use serde::Deserialize;
use std::env;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "skopos.yml";
pub const CONFIG_FILENAME_ALT: &str = "skopos.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".skopos/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Region override for the control plane client. Falls back to the
    /// ambient AWS environment when unset.
    #[serde(default)]
    pub region: Option<String>,

    #[serde(deserialize_with = "deserialize_targets")]
    pub targets: NonEmpty<DeploymentTarget>,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Build a single-target configuration from environment variables.
    /// This is how the serverless form of the watcher is configured.
    pub fn from_env() -> Result<Self> {
        let target = DeploymentTarget::from_parts(
            &require_env("SKOPOS_REPOSITORY")?,
            &require_env("SKOPOS_TAG")?,
            &require_env("SKOPOS_CLUSTER")?,
            &require_env("SKOPOS_SERVICE")?,
        )
        .map_err(Error::InvalidConfig)?;

        let mut retry = RetryConfig::default();
        if let Ok(value) = env::var("SKOPOS_RETRIES") {
            retry.retries = value
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("invalid SKOPOS_RETRIES: {}", value)))?;
        }

        Ok(Config {
            region: env::var("SKOPOS_REGION").ok(),
            targets: NonEmpty::new(target),
            retry,
        })
    }

    /// All configured targets watching the given repository.
    /// More than one match fans out; each target is updated independently.
    pub fn targets_for(&self, repository: &str) -> Vec<&DeploymentTarget> {
        self.targets
            .iter()
            .filter(|t| t.repository.matches(repository))
            .collect()
    }

    pub fn template() -> Self {
        Config {
            region: None,
            targets: NonEmpty::new(
                DeploymentTarget::from_parts("my-app", "release", "my-cluster", "my-service")
                    .unwrap(),
            ),
            retry: RetryConfig::default(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::MissingEnvVar(key.to_string()))
}

pub fn init_config(
    dir: &Path,
    repository: Option<&str>,
    tag: Option<&str>,
    cluster: Option<&str>,
    service: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let template = Config::template();
    let defaults = template.targets.first();

    let target = DeploymentTarget::from_parts(
        repository.unwrap_or(defaults.repository.as_str()),
        tag.unwrap_or(defaults.tag.as_str()),
        cluster.unwrap_or(defaults.cluster.as_str()),
        service.unwrap_or(defaults.service.as_str()),
    )
    .map_err(Error::InvalidConfig)?;

    let yaml = generate_template_yaml(&target);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(target: &DeploymentTarget) -> String {
    format!(
        r#"# region: us-east-1
targets:
  - repository: {}
    tag: {}
    cluster: {}
    service: {}
"#,
        target.repository, target.tag, target.cluster, target.service
    )
}

// Custom deserializers

/// Targets accept both the shorthand string form and the detailed mapping.
/// Dispatching on the value shape keeps validation messages intact, which an
/// untagged enum would swallow.
fn deserialize_targets<'de, D>(
    deserializer: D,
) -> std::result::Result<NonEmpty<DeploymentTarget>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<serde_yaml::Value> = Vec::deserialize(deserializer)?;
    let targets = values
        .into_iter()
        .map(|value| match value {
            serde_yaml::Value::String(s) => {
                DeploymentTarget::parse(&s).map_err(serde::de::Error::custom)
            }
            other => DeploymentTarget::deserialize(other)
                .map_err(|e| serde::de::Error::custom(e.to_string())),
        })
        .collect::<std::result::Result<Vec<_>, D::Error>>()?;

    NonEmpty::from_vec(targets)
        .ok_or_else(|| serde::de::Error::custom("at least one target is required"))
}
