// ABOUTME: Amazon ECS control plane implementation.
// ABOUTME: Issues UpdateService with forceNewDeployment via the AWS SDK.

use super::error::ControlPlaneError;
use super::traits::ControlPlane;
use crate::types::{ClusterId, ServiceId};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecs::Client;
use aws_sdk_ecs::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ecs::operation::update_service::UpdateServiceError;
use tracing::debug;

/// Control plane backed by the Amazon ECS management API.
pub struct EcsControlPlane {
    client: Client,
}

impl EcsControlPlane {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient credential chain, optionally pinning
    /// the region. Credentials are resolved by the environment (profile,
    /// instance role, or execution role); the watcher assumes they are valid.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }

        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl ControlPlane for EcsControlPlane {
    async fn force_new_deployment(
        &self,
        cluster: &ClusterId,
        service: &ServiceId,
    ) -> Result<(), ControlPlaneError> {
        debug!(cluster = %cluster, service = %service, "issuing UpdateService");

        self.client
            .update_service()
            .cluster(cluster.as_str())
            .service(service.as_str())
            .force_new_deployment(true)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| map_update_service_error(e, cluster, service))
    }
}

fn map_update_service_error(
    e: SdkError<UpdateServiceError>,
    cluster: &ClusterId,
    service: &ServiceId,
) -> ControlPlaneError {
    match &e {
        SdkError::ServiceError(ctx) => {
            let err = ctx.err();

            // Throttling and authorization failures surface through error
            // metadata, not dedicated variants.
            if err.code() == Some("ThrottlingException") {
                return ControlPlaneError::Throttled(err.to_string());
            }
            if matches!(
                err.code(),
                Some("AccessDeniedException") | Some("UnauthorizedOperation")
            ) {
                return ControlPlaneError::AccessDenied(err.to_string());
            }

            match err {
                UpdateServiceError::ClusterNotFoundException(_) => {
                    ControlPlaneError::ClusterNotFound(cluster.to_string())
                }
                UpdateServiceError::ServiceNotFoundException(_) => {
                    ControlPlaneError::ServiceNotFound(service.to_string())
                }
                UpdateServiceError::ServiceNotActiveException(_) => {
                    ControlPlaneError::ServiceNotActive(service.to_string())
                }
                UpdateServiceError::InvalidParameterException(_)
                | UpdateServiceError::ClientException(_) => {
                    ControlPlaneError::InvalidRequest(err.to_string())
                }
                UpdateServiceError::ServerException(_) => {
                    ControlPlaneError::Unavailable(err.to_string())
                }
                _ => ControlPlaneError::Api(err.to_string()),
            }
        }
        SdkError::TimeoutError(_) => {
            ControlPlaneError::Unavailable("request timed out in transit".to_string())
        }
        SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            ControlPlaneError::Unavailable(e.to_string())
        }
        _ => ControlPlaneError::Api(e.to_string()),
    }
}
