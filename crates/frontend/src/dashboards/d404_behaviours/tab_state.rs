//! Tab state of the Behaviours panel.
//!
//! The active tab is a plain string: either `CONVERSIONS` or the name of one
//! of the site's funnels. The set of funnels changes between renders, so the
//! id is resolved against the current list each time instead of being
//! parsed into a closed enum.

use crate::config::{DEFAULT_TAB, STORAGE_KEY_PREFIX};
use crate::shared::storage::KeyValueStore;
use contracts::dashboards::d404_behaviours::Funnel;
use leptos::prelude::*;
use std::sync::Arc;

/// Reserved tab identifier of the Conversions view.
pub const CONVERSIONS: &str = DEFAULT_TAB;

const CONVERSIONS_LABEL: &str = "Conversions";
const FUNNELS_LABEL: &str = "Funnels";

/// Storage key holding the last selected tab of a site.
pub fn storage_key(site_id: &str) -> String {
    format!("{}{}", STORAGE_KEY_PREFIX, site_id)
}

/// What the content pane shows for a tab.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedView {
    Conversions,
    Funnel(Funnel),
}

/// Resolves a tab id against the funnels of the current render.
///
/// Returns `None` for ids that match nothing, e.g. a remembered funnel that
/// has since been deleted. Names are expected to be unique; the first match wins.
pub fn resolve_view(active_tab: &str, funnels: &[Funnel]) -> Option<ResolvedView> {
    if active_tab == CONVERSIONS {
        return Some(ResolvedView::Conversions);
    }
    funnels
        .iter()
        .find(|funnel| funnel.name == active_tab)
        .cloned()
        .map(ResolvedView::Funnel)
}

/// Single selectable entry of the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub id: String,
    pub label: String,
    pub active: bool,
}

/// The Funnels dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunnelPicker {
    pub label: String,
    /// True when one of the options is the active tab
    pub active: bool,
    pub options: Vec<TabItem>,
}

/// Presentation model of the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabList {
    pub conversions: TabItem,
    pub funnels: FunnelPicker,
}

/// Builds the tab bar for `active_tab`. Options keep the order of `funnels`.
pub fn build_tab_list(active_tab: &str, funnels: &[Funnel]) -> TabList {
    let conversions = TabItem {
        id: CONVERSIONS.to_string(),
        label: CONVERSIONS_LABEL.to_string(),
        active: active_tab == CONVERSIONS,
    };

    let options: Vec<TabItem> = funnels
        .iter()
        .map(|funnel| TabItem {
            id: funnel.name.clone(),
            label: funnel.name.clone(),
            active: funnel.name == active_tab,
        })
        .collect();
    let funnels = FunnelPicker {
        label: FUNNELS_LABEL.to_string(),
        active: options.iter().any(|option| option.active),
        options,
    };

    TabList {
        conversions,
        funnels,
    }
}

/// Owns the active tab of one Behaviours panel and remembers it per site.
#[derive(Clone)]
pub struct TabSelector {
    active_tab: RwSignal<String>,
    storage_key: String,
    store: Arc<dyn KeyValueStore>,
}

impl TabSelector {
    /// Restores the remembered tab of `site_id`, falling back to Conversions.
    pub fn new(site_id: &str, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_default(site_id, CONVERSIONS, store)
    }

    pub fn with_default(site_id: &str, default_tab: &str, store: Arc<dyn KeyValueStore>) -> Self {
        let storage_key = storage_key(site_id);

        let stored = match store.get(&storage_key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read {}: {}", storage_key, e);
                None
            }
        };
        let initial = stored
            .filter(|tab| !tab.is_empty())
            .unwrap_or_else(|| default_tab.to_string());

        Self {
            active_tab: RwSignal::new(initial),
            storage_key,
            store,
        }
    }

    /// Current tab, without subscribing the caller.
    pub fn active_tab(&self) -> String {
        self.active_tab.get_untracked()
    }

    /// Reactive handle for views that re-render on tab changes.
    pub fn active_tab_signal(&self) -> Signal<String> {
        self.active_tab.into()
    }

    /// Remembers `tab` and makes it active. Accepts any id; never fails.
    pub fn select_tab(&self, tab: &str) {
        log::debug!("Behaviours tab selected: {}", tab);
        if let Err(e) = self.store.set(&self.storage_key, tab) {
            log::warn!("Failed to persist {}: {}", self.storage_key, e);
        }
        self.active_tab.set(tab.to_string());
    }

    pub fn resolve_active_view(&self, funnels: &[Funnel]) -> Option<ResolvedView> {
        self.active_tab
            .with_untracked(|active| resolve_view(active, funnels))
    }

    pub fn tab_list(&self, funnels: &[Funnel]) -> TabList {
        self.active_tab
            .with_untracked(|active| build_tab_list(active, funnels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::{MemoryStore, StorageError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn funnel(id: u64, name: &str) -> Funnel {
        Funnel {
            id,
            name: name.to_string(),
            steps_count: 2,
        }
    }

    fn selector(site_id: &str, store: &MemoryStore) -> TabSelector {
        TabSelector::new(site_id, Arc::new(store.clone()))
    }

    /// Reads succeed with nothing stored, every write fails.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Js("QuotaExceededError".to_string()))
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_fresh_store_defaults_to_conversions() {
        let store = MemoryStore::new();
        assert_eq!(selector("acme", &store).active_tab(), "conversions");
    }

    #[test]
    fn test_custom_default_tab() {
        let store = MemoryStore::new();
        let tabs = TabSelector::with_default("acme", "signup", Arc::new(store));
        assert_eq!(tabs.active_tab(), "signup");
    }

    #[test]
    fn test_empty_stored_value_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set("behavioursTab__acme", "").unwrap();
        assert_eq!(selector("acme", &store).active_tab(), "conversions");
    }

    #[test]
    fn test_read_failure_falls_back_to_default() {
        let tabs = TabSelector::new("acme", Arc::new(BrokenStore));
        assert_eq!(tabs.active_tab(), "conversions");
    }

    #[test]
    fn test_selection_survives_reinit() {
        let store = MemoryStore::new();
        for tab in ["conversions", "signup", "Checkout → Paid", " "] {
            selector("acme", &store).select_tab(tab);
            assert_eq!(selector("acme", &store).active_tab(), tab);
        }
    }

    #[test]
    fn test_select_same_tab_twice() {
        let store = MemoryStore::new();
        let tabs = selector("acme", &store);
        tabs.select_tab("signup");
        tabs.select_tab("signup");
        assert_eq!(tabs.active_tab(), "signup");
        assert_eq!(store.peek("behavioursTab__acme").as_deref(), Some("signup"));
    }

    #[test]
    fn test_sites_do_not_share_selection() {
        let store = MemoryStore::new();
        selector("y.com", &store).select_tab("pricing");
        selector("x.com", &store).select_tab("signup");

        assert_eq!(store.peek("behavioursTab__y.com").as_deref(), Some("pricing"));
        assert_eq!(selector("y.com", &store).active_tab(), "pricing");
        assert_eq!(selector("x.com", &store).active_tab(), "signup");
    }

    #[test]
    fn test_write_failure_still_updates_state() {
        let tabs = TabSelector::new("acme", Arc::new(ReadOnlyStore));
        tabs.select_tab("signup");
        assert_eq!(tabs.active_tab(), "signup");
    }

    #[test]
    fn test_signal_follows_selection() {
        let store = MemoryStore::new();
        let tabs = selector("acme", &store);
        let signal = tabs.active_tab_signal();
        tabs.select_tab("signup");
        assert_eq!(signal.get_untracked(), "signup");
    }

    #[test]
    fn test_resolve_view() {
        let funnels = vec![funnel(1, "A"), funnel(2, "B")];

        assert_eq!(
            resolve_view("B", &funnels),
            Some(ResolvedView::Funnel(funnel(2, "B")))
        );
        assert_eq!(
            resolve_view("conversions", &funnels),
            Some(ResolvedView::Conversions)
        );
        assert_eq!(resolve_view("conversions", &[]), Some(ResolvedView::Conversions));
        assert_eq!(resolve_view("C", &funnels), None);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let funnels = vec![funnel(1, "A"), funnel(2, "A")];
        assert_eq!(
            resolve_view("A", &funnels),
            Some(ResolvedView::Funnel(funnel(1, "A")))
        );
    }

    #[test]
    fn test_stale_selection_resolves_to_nothing() {
        let store = MemoryStore::new();
        selector("acme", &store).select_tab("deleted-funnel");

        let tabs = selector("acme", &store);
        assert_eq!(tabs.resolve_active_view(&[funnel(1, "signup")]), None);
        // not reset
        assert_eq!(tabs.active_tab(), "deleted-funnel");
        assert_eq!(
            store.peek("behavioursTab__acme").as_deref(),
            Some("deleted-funnel")
        );
    }

    #[test]
    fn test_checkout_funnel_scenario() {
        let store = MemoryStore::new();
        let tabs = selector("acme", &store);
        assert_eq!(tabs.active_tab(), "conversions");

        tabs.select_tab("checkout-funnel");
        assert_eq!(
            store.peek("behavioursTab__acme").as_deref(),
            Some("checkout-funnel")
        );

        let restored = selector("acme", &store);
        assert_eq!(restored.active_tab(), "checkout-funnel");
        assert_eq!(
            restored.resolve_active_view(&[funnel(7, "checkout-funnel")]),
            Some(ResolvedView::Funnel(funnel(7, "checkout-funnel")))
        );
    }

    #[test]
    fn test_tab_list_marks_active_option() {
        let store = MemoryStore::new();
        let tabs = selector("acme", &store);
        let funnels = vec![funnel(3, "Z"), funnel(1, "A"), funnel(2, "M")];

        let list = tabs.tab_list(&funnels);
        assert!(list.conversions.active);
        let picker = list.funnels;
        assert!(!picker.active);
        assert!(picker.options.iter().all(|option| !option.active));

        tabs.select_tab("A");
        let list = tabs.tab_list(&funnels);
        assert!(!list.conversions.active);
        let picker = list.funnels;
        assert_eq!(picker.label, "Funnels");
        assert!(picker.active);
        let ids: Vec<&str> = picker.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
        let active: Vec<bool> = picker.options.iter().map(|o| o.active).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn test_tab_list_always_offers_funnel_picker() {
        let store = MemoryStore::new();
        store.set("behavioursTab__acme", "signup").unwrap();
        let tabs = selector("acme", &store);
        let funnels = vec![funnel(1, "signup")];

        assert_eq!(
            tabs.resolve_active_view(&funnels),
            Some(ResolvedView::Funnel(funnel(1, "signup")))
        );
        let picker = tabs.tab_list(&funnels).funnels;
        assert!(picker.active);
        assert_eq!(picker.options.len(), 1);

        let empty = tabs.tab_list(&[]).funnels;
        assert_eq!(empty.label, "Funnels");
        assert!(!empty.active);
        assert!(empty.options.is_empty());
    }

    #[test]
    fn test_each_selection_notifies_once() {
        let owner = Owner::new();
        owner.set();

        let store = MemoryStore::new();
        let tabs = selector("acme", &store);
        let active_tab = tabs.active_tab_signal();
        let runs = Arc::new(AtomicUsize::new(0));
        let observed = Memo::new({
            let runs = Arc::clone(&runs);
            move |_| {
                runs.fetch_add(1, Ordering::SeqCst);
                active_tab.get()
            }
        });

        assert_eq!(observed.get_untracked(), "conversions");
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        tabs.select_tab("signup");
        assert_eq!(observed.get_untracked(), "signup");
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        // same tab again still notifies
        tabs.select_tab("signup");
        assert_eq!(observed.get_untracked(), "signup");
        assert_eq!(runs.load(Ordering::SeqCst), 3);

        // no selection, no rerun
        assert_eq!(observed.get_untracked(), "signup");
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key("acme"), "behavioursTab__acme");
    }
}
