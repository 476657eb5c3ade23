// ABOUTME: Deployment target configuration.
// ABOUTME: Parses formats like "repository:tag -> cluster/service".

use crate::types::{ClusterId, ImageTag, RepositoryName, ServiceId};
use serde::Deserialize;

/// A mapping from a watched repository/tag to the service that should be
/// redeployed when that tag is pushed. Static for the watcher's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentTarget {
    #[serde(deserialize_with = "deserialize_repository")]
    pub repository: RepositoryName,

    #[serde(deserialize_with = "deserialize_tag")]
    pub tag: ImageTag,

    pub cluster: ClusterId,

    pub service: ServiceId,
}

impl DeploymentTarget {
    pub fn from_parts(
        repository: &str,
        tag: &str,
        cluster: &str,
        service: &str,
    ) -> Result<Self, String> {
        Ok(DeploymentTarget {
            repository: RepositoryName::new(repository).map_err(|e| e.to_string())?,
            tag: ImageTag::new(tag).map_err(|e| e.to_string())?,
            cluster: ClusterId::new(cluster).map_err(|e| e.to_string())?,
            service: ServiceId::new(service).map_err(|e| e.to_string())?,
        })
    }

    /// Parse the shorthand form `repository:tag -> cluster/service`.
    /// Cluster and service must be short names here; use the detailed mapping
    /// form for ARNs.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("target cannot be empty".to_string());
        }

        let (image_part, dest_part) = s
            .split_once("->")
            .ok_or_else(|| format!("missing '->' in target: {}", s))?;

        let (repository, tag) = image_part
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| format!("missing ':tag' in target: {}", s))?;

        let (cluster, service) = dest_part
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("missing 'cluster/service' in target: {}", s))?;

        Self::from_parts(repository, tag, cluster, service)
    }
}

fn deserialize_repository<'de, D>(deserializer: D) -> Result<RepositoryName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    RepositoryName::new(&s).map_err(serde::de::Error::custom)
}

fn deserialize_tag<'de, D>(deserializer: D) -> Result<ImageTag, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ImageTag::new(&s).map_err(serde::de::Error::custom)
}
