use std::sync::Arc;
use thiserror::Error;

use crate::models::{GraphSnapshot, ProfileId};
use crate::services::appwrite::{AppwriteClient, AppwriteError};

/// Errors that can occur while assembling a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Appwrite error: {0}")]
    Appwrite(#[from] AppwriteError),
}

/// Data-access seam: anything able to assemble a snapshot for a caller
///
/// Computation only starts once the returned snapshot is complete, so an
/// abandoned load never leaves partial suggestion state behind.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load_snapshot(&self, profile_id: &ProfileId) -> Result<Arc<GraphSnapshot>, SnapshotError>;
}

#[async_trait::async_trait]
impl SnapshotSource for AppwriteClient {
    async fn load_snapshot(&self, profile_id: &ProfileId) -> Result<Arc<GraphSnapshot>, SnapshotError> {
        Ok(Arc::new(self.fetch_snapshot(profile_id).await?))
    }
}

/// Snapshot seen from the owner of `role_id`'s project
///
/// Sources only return blocks touching the profile they load for, so ranking
/// candidates from another caller's snapshot would miss the owner's blocks.
/// Falls back to the requester's snapshot when the role, project or owner is
/// unknown.
pub async fn load_role_snapshot(
    source: &dyn SnapshotSource,
    requester: &ProfileId,
    role_id: &str,
) -> Result<Arc<GraphSnapshot>, SnapshotError> {
    let snapshot = source.load_snapshot(requester).await?;
    let owner = snapshot
        .role(role_id)
        .and_then(|role| snapshot.project(&role.project_id))
        .and_then(|project| project.owner_id.clone());

    match owner {
        Some(owner) if &owner != requester => {
            tracing::debug!(role_id, owner = %owner, "Loading project owner's snapshot");
            source.load_snapshot(&owner).await
        }
        _ => Ok(snapshot),
    }
}

/// Snapshot source backed by a fixed, in-memory snapshot
///
/// Every caller sees the same graph. Handy for demos and tests.
pub struct StaticSnapshotSource {
    snapshot: Arc<GraphSnapshot>,
}

impl StaticSnapshotSource {
    pub fn new(snapshot: GraphSnapshot) -> Self {
        Self { snapshot: Arc::new(snapshot) }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for StaticSnapshotSource {
    async fn load_snapshot(&self, _profile_id: &ProfileId) -> Result<Arc<GraphSnapshot>, SnapshotError> {
        Ok(Arc::clone(&self.snapshot))
    }
}
