//! Catalog Service - price lookup collaborator
//!
//! The engine consults the catalog only when an order is created or its
//! lines are replaced; prices are snapshotted into the order lines and
//! later catalog changes never touch existing orders.

use async_trait::async_trait;

use crate::booking::{BookingError, BookingResult};
use crate::db::repository::CatalogRepository;

/// Name + price snapshot returned by the lookup
#[derive(Debug, Clone)]
pub struct PricedItem {
    pub name: String,
    pub price: f64,
}

/// Price lookup seam between the order engine and the catalog subsystem
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn food(&self, id: &str) -> BookingResult<PricedItem>;
    async fn combo(&self, id: &str) -> BookingResult<PricedItem>;
}

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &CatalogRepository {
        &self.repo
    }
}

#[async_trait]
impl PriceSource for CatalogService {
    async fn food(&self, id: &str) -> BookingResult<PricedItem> {
        let item = self
            .repo
            .find_food(id)
            .await?
            .filter(|f| f.is_active)
            .ok_or_else(|| {
                BookingError::InconsistentReference(format!("Food item {} does not exist", id))
            })?;
        Ok(PricedItem {
            name: item.name,
            price: item.price,
        })
    }

    async fn combo(&self, id: &str) -> BookingResult<PricedItem> {
        let combo = self
            .repo
            .find_combo(id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| {
                BookingError::InconsistentReference(format!("Combo {} does not exist", id))
            })?;
        Ok(PricedItem {
            name: combo.name,
            price: combo.price,
        })
    }
}
