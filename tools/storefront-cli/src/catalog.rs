//! Product and event files.

use std::path::Path;

use anyhow::{Context, Result};
use storefront_engine::catalog::Product;
use storefront_engine::countdown::TimedEntity;
use storefront_engine::ids::{EventId, ProductId};

/// Products available to the CLI, read from a JSON array.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read product catalog: {}", path.display()))?;
        let products = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse product catalog: {}", path.display()))?;
        Ok(Self { products })
    }

    pub fn find(&self, id: &ProductId) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .with_context(|| format!("Unknown product: {id}"))
    }
}

/// Read the events file. A missing file means no events.
pub fn load_events(path: &Path) -> Result<Vec<TimedEntity>> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse events file: {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read events file: {}", path.display())),
    }
}

pub fn find_event(path: &Path, id: &EventId) -> Result<TimedEntity> {
    load_events(path)?
        .into_iter()
        .find(|e| &e.id == id)
        .with_context(|| format!("Unknown event: {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "1",
                "name": "Test Product",
                "original_price": {"amount_cents": 12000, "currency": "USD"},
                "discount_price": {"amount_cents": 10000, "currency": "USD"},
                "stock": 5
            }]"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        let product = catalog.find(&ProductId::new("1")).unwrap();
        assert_eq!(product.stock, 5);
        assert!(catalog.find(&ProductId::new("2")).is_err());
    }

    #[test]
    fn test_missing_events_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_events(&dir.path().join("events.json")).unwrap().is_empty());
    }
}
