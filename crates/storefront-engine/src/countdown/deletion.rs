//! Deletion service boundary.

use crate::error::CommerceError;
use crate::ids::EventId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reply from the deletion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionAck {
    pub success: bool,
}

/// Deletes expired timed entities on the server side.
#[async_trait]
pub trait EntityDeletionService: Send + Sync {
    async fn delete_entity(&self, id: &EventId) -> Result<DeletionAck, CommerceError>;
}

#[async_trait]
impl<T: EntityDeletionService + ?Sized> EntityDeletionService for Arc<T> {
    async fn delete_entity(&self, id: &EventId) -> Result<DeletionAck, CommerceError> {
        (**self).delete_entity(id).await
    }
}
