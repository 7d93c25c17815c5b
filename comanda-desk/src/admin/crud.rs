//! Admin list
//!
//! One list surface for every [`Record`] type: the cached records behind the
//! "Produtos" and "Garçons" screens. Writes go to the repository first and
//! then replace, insert or remove the matching element by id.

use crate::error::DeskResult;
use crate::repository::{CrudRepository, Record};
use serde::Serialize;
use shared::models::{Product, Waiter};
use std::sync::Arc;

pub struct AdminList<T: Record> {
    repo: Arc<dyn CrudRepository<T>>,
    records: Vec<T>,
}

pub type ProductAdmin = AdminList<Product>;
pub type WaiterAdmin = AdminList<Waiter>;

impl<T: Record> AdminList<T> {
    pub fn new(repo: Arc<dyn CrudRepository<T>>) -> Self {
        Self {
            repo,
            records: Vec::new(),
        }
    }

    pub async fn load(repo: Arc<dyn CrudRepository<T>>) -> DeskResult<Self> {
        let mut list = Self::new(repo);
        list.refresh().await?;
        Ok(list)
    }

    /// Reload from the repository; on failure the cached records are kept
    pub async fn refresh(&mut self) -> DeskResult<()> {
        let records = self.repo.list().await.inspect_err(|e| {
            tracing::warn!(resource = T::RESOURCE, error = %e, "Failed to load records");
        })?;
        tracing::debug!(resource = T::RESOURCE, count = records.len(), "Records loaded");
        self.records = records;
        Ok(())
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn list(&self, filter: &T::Filter) -> Vec<&T> {
        self.records.iter().filter(|r| r.matches(filter)).collect()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub async fn create(&mut self, data: &T::Create) -> DeskResult<T> {
        let created = self.repo.create(data).await?;
        tracing::info!(resource = T::RESOURCE, id = created.id(), name = created.display_name(), "Record created");
        self.records.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, data: &T::Update) -> DeskResult<T> {
        self.require(id)?;
        let updated = self.repo.update(id, data).await?;
        tracing::info!(resource = T::RESOURCE, id, "Record updated");
        Ok(self.replace(updated))
    }

    /// Flip the active flag
    pub async fn toggle_active(&mut self, id: i64) -> DeskResult<T> {
        let active = !self.require(id)?.is_active();
        let updated = self.repo.set_active(id, active).await?;
        tracing::info!(resource = T::RESOURCE, id, active, "Record status changed");
        Ok(self.replace(updated))
    }

    pub async fn delete(&mut self, id: i64) -> DeskResult<()> {
        self.require(id)?;
        self.repo.delete(id).await?;
        self.records.retain(|r| r.id() != id);
        tracing::info!(resource = T::RESOURCE, id, "Record deleted");
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_active()).count()
    }

    fn require(&self, id: i64) -> DeskResult<&T> {
        self.get(id).ok_or_else(|| T::not_found(id).into())
    }

    fn replace(&mut self, updated: T) -> T {
        match self.records.iter_mut().find(|r| r.id() == updated.id()) {
            Some(slot) => *slot = updated.clone(),
            None => self.records.push(updated.clone()),
        }
        updated
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProductStats {
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WaiterStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl AdminList<Product> {
    pub fn stats(&self) -> ProductStats {
        ProductStats {
            total: self.records.len(),
            active: self.active_count(),
        }
    }
}

impl AdminList<Waiter> {
    pub fn stats(&self) -> WaiterStats {
        let active = self.active_count();
        WaiterStats {
            total: self.records.len(),
            active,
            inactive: self.records.len() - active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryCrudRepository;
    use rust_decimal::Decimal;
    use shared::error::ErrorCode;
    use shared::models::{
        ProductCategory, ProductCreate, ProductFilter, ProductUpdate, WaiterCreate, WaiterFilter,
    };
    use shared::seed;

    async fn products() -> ProductAdmin {
        AdminList::<Product>::load(Arc::new(MemoryCrudRepository::new(seed::products())))
            .await
            .unwrap()
    }

    async fn waiters() -> WaiterAdmin {
        AdminList::<Waiter>::load(Arc::new(MemoryCrudRepository::new(seed::waiters())))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_product_filter_by_category_and_name() {
        let admin = products().await;
        let drinks = admin.list(&ProductFilter {
            search_term: String::new(),
            category: Some(ProductCategory::Drinks),
        });
        assert_eq!(drinks.len(), 2);

        let named = admin.list(&ProductFilter {
            search_term: "HAMBÚRGUER".into(),
            category: None,
        });
        assert_eq!(named.len(), 1);
        assert_eq!(admin.list(&ProductFilter::default()).len(), 5);
    }

    #[tokio::test]
    async fn test_product_lifecycle_and_stats() {
        let mut admin = products().await;
        assert_eq!(admin.stats(), ProductStats { total: 5, active: 4 });

        let created = admin
            .create(&ProductCreate {
                name: "Suco Natural".into(),
                description: "Laranja".into(),
                price: Decimal::new(900, 2),
                category: ProductCategory::Drinks,
            })
            .await
            .unwrap();
        assert!(created.is_active);
        assert_eq!(admin.stats(), ProductStats { total: 6, active: 5 });

        let updated = admin
            .update(
                created.id,
                &ProductUpdate {
                    name: "Suco de Laranja".into(),
                    description: "500ml".into(),
                    price: Decimal::new(1100, 2),
                    category: ProductCategory::Drinks,
                    is_active: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(admin.get(created.id), Some(&updated));

        let toggled = admin.toggle_active(created.id).await.unwrap();
        assert!(!toggled.is_active);
        admin.delete(created.id).await.unwrap();
        assert_eq!(admin.stats(), ProductStats { total: 5, active: 4 });
    }

    #[tokio::test]
    async fn test_invalid_product_leaves_list_unchanged() {
        let mut admin = products().await;
        let err = admin
            .create(&ProductCreate {
                name: "Brinde".into(),
                description: String::new(),
                price: Decimal::new(-100, 2),
                category: ProductCategory::Starters,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductInvalidPrice);
        assert_eq!(admin.records().len(), 5);
    }

    #[tokio::test]
    async fn test_waiter_stats_and_search() {
        let mut admin = waiters().await;
        assert_eq!(admin.stats(), WaiterStats { total: 3, active: 2, inactive: 1 });

        let hits = admin.list(&WaiterFilter {
            search_term: "maria".into(),
        });
        assert_eq!(hits.len(), 1);

        let err = admin
            .create(&WaiterCreate {
                name: "Ana".into(),
                username: "ana".into(),
                email: "ana@restaurante.com".into(),
                phone: String::new(),
                password: "  ".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RequiredField);

        let pedro = admin.toggle_active(3).await.unwrap();
        assert!(pedro.is_active);
        assert_eq!(admin.stats(), WaiterStats { total: 3, active: 3, inactive: 0 });
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let mut admin = waiters().await;
        let err = admin.delete(42).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::WaiterNotFound);
    }
}
