//! File-backed stand-ins for the order and event services.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_engine::checkout::{OrderRequest, OrderResponse, OrderService};
use storefront_engine::countdown::{DeletionAck, EntityDeletionService, TimedEntity};
use storefront_engine::ids::{EventId, OrderId};
use storefront_engine::CommerceError;
use tokio::io::AsyncWriteExt;

/// Appends each order as one JSON line.
pub struct FileOrderService {
    path: PathBuf,
}

#[derive(Serialize)]
struct OrderRecord<'a> {
    id: OrderId,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    request: &'a OrderRequest,
}

impl FileOrderService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderService for FileOrderService {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, CommerceError> {
        let record = OrderRecord {
            id: OrderId::generate(),
            created_at: Utc::now(),
            request,
        };
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_failure)?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_failure)?;
        file.write_all(&line).await.map_err(io_failure)?;
        file.flush().await.map_err(io_failure)?;

        tracing::info!(order_id = %record.id, path = %self.path.display(), "order recorded");
        Ok(OrderResponse { success: true })
    }
}

/// Removes expired events from the events file.
pub struct FileEventDeletionService {
    path: PathBuf,
}

impl FileEventDeletionService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EntityDeletionService for FileEventDeletionService {
    async fn delete_entity(&self, id: &EventId) -> Result<DeletionAck, CommerceError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(io_failure)?;
        let mut events: Vec<TimedEntity> = serde_json::from_str(&content)?;

        let before = events.len();
        events.retain(|e| &e.id != id);
        if events.len() == before {
            return Ok(DeletionAck { success: false });
        }

        let json = serde_json::to_vec_pretty(&events)?;
        tokio::fs::write(&self.path, json).await.map_err(io_failure)?;
        Ok(DeletionAck { success: true })
    }
}

fn io_failure(e: std::io::Error) -> CommerceError {
    CommerceError::NetworkFailure(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_engine::cart::CartLine;
    use storefront_engine::checkout::{Address, Customer, PaymentMethod};
    use storefront_engine::money::{Currency, Money};

    fn request() -> OrderRequest {
        OrderRequest {
            cart_items: Vec::<CartLine>::new(),
            shipping_address: Address::new("123 Main St", "New York", "US", "10001"),
            user: Customer::new("user-1", "John Doe"),
            total_price: Money::zero(Currency::USD),
            payment_method: PaymentMethod::CashOnDelivery.tag().to_string(),
            payment_info: PaymentMethod::CashOnDelivery.info(),
        }
    }

    #[tokio::test]
    async fn test_orders_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("orders.jsonl");
        let service = FileOrderService::new(&path);

        assert!(service.create_order(&request()).await.unwrap().success);
        assert!(service.create_order(&request()).await.unwrap().success);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["paymentInfo"]["type"], "Cash On Delivery");
        assert_ne!(lines[0]["id"], lines[1]["id"]);
    }

    #[tokio::test]
    async fn test_delete_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let events = vec![
            TimedEntity::new("a", Utc::now()),
            TimedEntity::new("b", Utc::now()),
        ];
        std::fs::write(&path, serde_json::to_vec(&events).unwrap()).unwrap();

        let service = FileEventDeletionService::new(&path);
        assert!(service.delete_entity(&EventId::new("a")).await.unwrap().success);
        assert!(!service.delete_entity(&EventId::new("a")).await.unwrap().success);

        let remaining: Vec<TimedEntity> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, EventId::new("b"));
    }

    #[tokio::test]
    async fn test_missing_events_file_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let service = FileEventDeletionService::new(dir.path().join("missing.json"));
        let err = service.delete_entity(&EventId::new("a")).await.unwrap_err();
        assert!(matches!(err, CommerceError::NetworkFailure(_)));
    }
}
