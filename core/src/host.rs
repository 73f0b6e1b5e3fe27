//! Interfaces the host client provides to the resolver.
//!
//! All methods are called on the host's UI thread. Implementations are free to
//! use interior mutability for the task queue since `defer` takes `&self`.

use notemark_types::ItemId;

use crate::resolver::ResolveTask;

/// Live inventory and UI state of the client.
pub trait ClientHost {
    /// Whether the player is fully logged in right now
    fn is_logged_in(&self) -> bool;

    /// Item ids of the inventory slots in slot order.
    ///
    /// `None` means the inventory UI is not loaded yet, which is distinct
    /// from a loaded but empty inventory.
    fn inventory_items(&self) -> Option<Vec<ItemId>>;

    /// Display (tooltip) text of the item widget in `slot`
    fn slot_text(&self, slot: usize) -> Option<String>;

    /// Queue a task to run later on the UI thread.
    ///
    /// The host hands the task back through `TargetResolver::run_task`.
    fn defer(&self, task: ResolveTask);
}

/// A single search result from the item catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
}

impl CatalogItem {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Name search over the client's item database.
pub trait ItemCatalog {
    /// Items whose names match `query`, in the host's ranking order.
    ///
    /// Matching may be fuzzy; callers apply their own exact filter.
    fn search(&self, query: &str) -> Vec<CatalogItem>;
}

impl<T: ClientHost + ?Sized> ClientHost for &T {
    fn is_logged_in(&self) -> bool {
        (**self).is_logged_in()
    }

    fn inventory_items(&self) -> Option<Vec<ItemId>> {
        (**self).inventory_items()
    }

    fn slot_text(&self, slot: usize) -> Option<String> {
        (**self).slot_text(slot)
    }

    fn defer(&self, task: ResolveTask) {
        (**self).defer(task)
    }
}

impl<T: ItemCatalog + ?Sized> ItemCatalog for &T {
    fn search(&self, query: &str) -> Vec<CatalogItem> {
        (**self).search(query)
    }
}
