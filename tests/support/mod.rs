// ABOUTME: Shared test support for watcher integration tests.
// ABOUTME: Provides a recording control plane with scriptable results.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use skopos::plane::{ControlPlane, ControlPlaneError};
use skopos::types::{ClusterId, ServiceId};
use std::collections::VecDeque;

/// A control plane double that records every call and replays scripted
/// results, falling back to a fixed result once the script is exhausted.
pub struct RecordingPlane {
    calls: Mutex<Vec<(String, String)>>,
    script: Mutex<VecDeque<Result<(), ControlPlaneError>>>,
    fallback: Result<(), ControlPlaneError>,
}

impl RecordingPlane {
    pub fn succeeding() -> Self {
        Self::scripted(Vec::new(), Ok(()))
    }

    pub fn failing(error: ControlPlaneError) -> Self {
        Self::scripted(Vec::new(), Err(error))
    }

    pub fn scripted(
        script: Vec<Result<(), ControlPlaneError>>,
        fallback: Result<(), ControlPlaneError>,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(script.into()),
            fallback,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ControlPlane for RecordingPlane {
    async fn force_new_deployment(
        &self,
        cluster: &ClusterId,
        service: &ServiceId,
    ) -> Result<(), ControlPlaneError> {
        self.calls
            .lock()
            .push((cluster.to_string(), service.to_string()));

        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
