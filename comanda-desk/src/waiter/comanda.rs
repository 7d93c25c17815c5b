//! Comanda Manager
//!
//! Owns the local tab list behind the waiter's "Comandas" screen. With a
//! remote repository the server is the source of truth and this list is a
//! cache filled by [`TabManager::refresh`].
//!
//! Writes are not optimistic: preconditions are checked first, the
//! repository is awaited, and only then is the single element with the
//! same id replaced. A failed write leaves the list as it was.

use crate::error::DeskResult;
use crate::repository::TabRepository;
use shared::error::{AppError, ErrorCode};
use shared::models::{OpenTabForm, Tab, TabFilter, TabItem, TabState, TabStats, validate_item};
use std::sync::Arc;

pub struct TabManager {
    repo: Arc<dyn TabRepository>,
    tabs: Vec<Tab>,
}

impl TabManager {
    /// Empty manager; call [`refresh`](Self::refresh) to load the pool
    pub fn new(repo: Arc<dyn TabRepository>) -> Self {
        Self {
            repo,
            tabs: Vec::new(),
        }
    }

    /// Manager loaded from the repository
    pub async fn load(repo: Arc<dyn TabRepository>) -> DeskResult<Self> {
        let mut manager = Self::new(repo);
        manager.refresh().await?;
        Ok(manager)
    }

    /// Reload the list; on failure the cached list is kept
    pub async fn refresh(&mut self) -> DeskResult<()> {
        let mut tabs = self.repo.list().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to load tabs, keeping cached list");
        })?;
        tabs.sort_by_key(|t| t.number);
        tracing::debug!(count = tabs.len(), "Tabs loaded");
        self.tabs = tabs;
        Ok(())
    }

    /// Every cached tab, ascending by number
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Tabs matching the search term, ascending by number
    pub fn list_tabs(&self, filter: &TabFilter) -> Vec<&Tab> {
        let mut tabs: Vec<&Tab> = self
            .tabs
            .iter()
            .filter(|t| t.matches(&filter.search_term))
            .collect();
        tabs.sort_by_key(|t| t.number);
        tabs
    }

    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn find_by_number(&self, number: u32) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.number == number)
    }

    /// Free → Open
    pub async fn open_tab(&mut self, tab_id: &str, form: &OpenTabForm) -> DeskResult<Tab> {
        let tab = self.require(tab_id)?;
        if !tab.is_free() {
            return Err(AppError::new(ErrorCode::TabNotFree)
                .with_detail("number", tab.number)
                .into());
        }
        let (customer, table_number) = form.parse()?;

        let updated = self.repo.open(&tab, &customer, table_number).await?;
        tracing::info!(
            number = updated.number,
            table = updated.table_number,
            customer = %customer.name,
            "Tab opened"
        );
        Ok(self.replace(updated))
    }

    /// Open (or Closed) → Free
    pub async fn close_tab(&mut self, tab_id: &str) -> DeskResult<Tab> {
        let tab = self.require(tab_id)?;
        if tab.is_free() {
            return Err(AppError::new(ErrorCode::TabNotOpen)
                .with_detail("number", tab.number)
                .into());
        }

        let updated = self.repo.close(&tab).await?;
        tracing::info!(number = updated.number, table = tab.table_number, total = %tab.total(), "Tab closed");
        Ok(self.replace(updated))
    }

    /// Record a consumed item on an open tab
    pub async fn add_item(&mut self, tab_id: &str, item: TabItem) -> DeskResult<Tab> {
        let tab = self.require(tab_id)?;
        if tab.state != TabState::Open {
            return Err(AppError::new(ErrorCode::TabNotOpen)
                .with_detail("number", tab.number)
                .into());
        }
        validate_item(&item)?;

        let updated = self.repo.add_item(&tab, &item).await?;
        tracing::debug!(number = updated.number, product = item.product_id, quantity = item.quantity, "Item added");
        Ok(self.replace(updated))
    }

    /// Aggregate over the cached list
    pub fn stats(&self) -> TabStats {
        compute_stats(&self.tabs)
    }

    fn require(&self, tab_id: &str) -> DeskResult<Tab> {
        self.get(tab_id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::TabNotFound).with_detail("id", tab_id).into())
    }

    fn replace(&mut self, updated: Tab) -> Tab {
        match self.tabs.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => *slot = updated.clone(),
            None => {
                self.tabs.push(updated.clone());
                self.tabs.sort_by_key(|t| t.number);
            }
        }
        updated
    }
}

/// Free/open counts and the running total of every open tab
pub fn compute_stats(tabs: &[Tab]) -> TabStats {
    tabs.iter().fold(TabStats::default(), |mut stats, tab| {
        match tab.state {
            TabState::Free => stats.free += 1,
            TabState::Open => {
                stats.open += 1;
                stats.revenue += tab.total();
            }
            TabState::Closed => {}
        }
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryTabRepository;
    use rust_decimal::Decimal;

    fn form(name: &str, table: &str) -> OpenTabForm {
        OpenTabForm {
            customer_name: name.into(),
            email: format!("{}@x.com", name.to_lowercase()),
            phone: "111".into(),
            table_number: table.into(),
        }
    }

    async fn manager(size: u32) -> TabManager {
        TabManager::load(Arc::new(MemoryTabRepository::seeded(size)))
            .await
            .unwrap()
    }

    fn id_of(m: &TabManager, number: u32) -> String {
        m.find_by_number(number).unwrap().id.clone()
    }

    #[tokio::test]
    async fn test_open_then_close_restores_free_slot() {
        let mut m = manager(5).await;
        let id = id_of(&m, 2);

        let opened = m.open_tab(&id, &form("Maria", "5")).await.unwrap();
        assert!(opened.is_open());
        assert_eq!(opened.table_number, 5);
        assert!(opened.opened_at.is_some());
        assert_eq!(m.get(&id), Some(&opened));

        let closed = m.close_tab(&id).await.unwrap();
        assert!(closed.is_free());
        assert!(closed.holds_free_invariant());
        assert_eq!(closed.number, 2);
    }

    #[tokio::test]
    async fn test_open_rejects_bad_form_without_change() {
        let mut m = manager(3).await;
        let id = id_of(&m, 1);
        let before = m.tabs().to_vec();

        let err = m.open_tab(&id, &form("Maria", "abc")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);

        let err = m.open_tab(&id, &form("", "4")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::RequiredField);

        assert_eq!(m.tabs(), before.as_slice());
    }

    #[tokio::test]
    async fn test_open_requires_free_tab() {
        let mut m = manager(3).await;
        let id = id_of(&m, 3);
        m.open_tab(&id, &form("Maria", "5")).await.unwrap();
        let err = m.open_tab(&id, &form("João", "7")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::TabNotFree);
        assert_eq!(m.get(&id).unwrap().table_number, 5);
    }

    #[tokio::test]
    async fn test_close_free_tab_and_unknown_id() {
        let mut m = manager(2).await;
        let id = id_of(&m, 1);
        assert_eq!(m.close_tab(&id).await.unwrap_err().code(), ErrorCode::TabNotOpen);
        assert_eq!(m.close_tab("nope").await.unwrap_err().code(), ErrorCode::TabNotFound);
    }

    #[tokio::test]
    async fn test_add_item_updates_total_and_stats() {
        let mut m = manager(4).await;
        let id = id_of(&m, 1);
        m.open_tab(&id, &form("Maria", "5")).await.unwrap();
        m.add_item(&id, TabItem::new(1, "Picanha", Decimal::new(3200, 2), 1))
            .await
            .unwrap();
        let tab = m
            .add_item(&id, TabItem::new(2, "Refrigerante", Decimal::new(600, 2), 2))
            .await
            .unwrap();
        assert_eq!(tab.total(), Decimal::new(4400, 2));

        let zero = TabItem::new(3, "Água", Decimal::new(400, 2), 0);
        assert_eq!(m.add_item(&id, zero).await.unwrap_err().code(), ErrorCode::TabItemInvalid);

        let stats = m.stats();
        assert_eq!(stats.free, 3);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.revenue, Decimal::new(4400, 2));
    }

    #[tokio::test]
    async fn test_list_sorted_and_filtered() {
        let mut m = manager(14).await;
        let id = id_of(&m, 4);
        m.open_tab(&id, &form("Maria", "30")).await.unwrap();

        let all = m.list_tabs(&TabFilter::default());
        assert_eq!(all.len(), 14);
        assert!(all.windows(2).all(|w| w[0].number < w[1].number));

        let numbers: Vec<u32> = m
            .list_tabs(&TabFilter::search("3"))
            .iter()
            .map(|t| t.number)
            .collect();
        assert_eq!(numbers, vec![3, 4, 13]);

        let by_name: Vec<u32> = m
            .list_tabs(&TabFilter::search("maria"))
            .iter()
            .map(|t| t.number)
            .collect();
        assert_eq!(by_name, vec![4]);
    }

    #[test]
    fn test_compute_stats_ignores_closed() {
        let mut closed = Tab::free("c", 1);
        closed.state = TabState::Closed;
        let stats = compute_stats(&[closed, Tab::free("f", 2)]);
        assert_eq!(stats, TabStats { free: 1, open: 0, revenue: Decimal::ZERO });
    }
}
