// ABOUTME: Registry push event types and parsing.
// ABOUTME: Accepts bare image events and the event-bus envelope form.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event is not a successful image push")]
    NotAnImagePush,
}

/// A notification that a container image was published to a registry.
///
/// Fields arrive as plain strings from the external event source; the watcher
/// validates them at handling time. Consumed once per invocation, immutable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImagePublishedEvent {
    #[serde(alias = "repository-name", alias = "repositoryName")]
    pub repository: String,

    #[serde(alias = "image-tag", alias = "imageTag")]
    pub tag: String,

    #[serde(default, alias = "pushed-at", alias = "pushedAt")]
    pub pushed_at: Option<DateTime<Utc>>,

    #[serde(default, alias = "image-digest", alias = "imageDigest")]
    pub digest: Option<String>,
}

impl ImagePublishedEvent {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
            pushed_at: None,
            digest: None,
        }
    }

    /// Parse an event from JSON. Accepts either a bare event object or a full
    /// event-bus envelope (detected by the presence of a `detail` field).
    pub fn from_json(input: &str) -> Result<Self, EventError> {
        let value: serde_json::Value = serde_json::from_str(input)?;

        if value.get("detail").is_some() {
            let envelope: EventEnvelope = serde_json::from_value(value)?;
            return envelope.image_published().ok_or(EventError::NotAnImagePush);
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// The event-bus envelope carrying a registry image action.
///
/// Only successful PUSH actions from the container registry source translate
/// into an `ImagePublishedEvent`; deletes, scan results, and failed pushes
/// are filtered out.
#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "detail-type")]
    pub detail_type: String,

    pub source: String,

    #[serde(default)]
    pub time: Option<DateTime<Utc>>,

    pub detail: EventDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    #[serde(rename = "repository-name")]
    pub repository_name: String,

    #[serde(default, rename = "image-tag")]
    pub image_tag: Option<String>,

    #[serde(default, rename = "image-digest")]
    pub image_digest: Option<String>,

    #[serde(default, rename = "action-type")]
    pub action_type: Option<String>,

    #[serde(default)]
    pub result: Option<String>,
}

impl EventEnvelope {
    /// Extract the image push this envelope describes, if it is one.
    pub fn image_published(&self) -> Option<ImagePublishedEvent> {
        if self.source != "aws.ecr" || self.detail_type != "ECR Image Action" {
            return None;
        }

        if self.detail.action_type.as_deref() != Some("PUSH") {
            return None;
        }

        // Failed pushes carry result FAILURE; absent result is treated as success.
        if matches!(self.detail.result.as_deref(), Some(r) if r != "SUCCESS") {
            return None;
        }

        Some(ImagePublishedEvent {
            repository: self.detail.repository_name.clone(),
            tag: self.detail.image_tag.clone().unwrap_or_default(),
            pushed_at: self.time,
            digest: self.detail.image_digest.clone(),
        })
    }
}
