use super::conversions::ConversionsView;
use super::funnel::FunnelView;
use super::tabs::BehavioursTabs;
use crate::dashboards::d404_behaviours::tab_state::{ResolvedView, TabSelector};
use crate::shared::storage::{default_store, KeyValueStore};
use contracts::dashboards::d404_behaviours::{Site, StatsQuery};
use leptos::prelude::*;
use std::sync::Arc;

/// Behaviours panel: Conversions and the site's funnels behind one tab bar.
///
/// The selected tab is remembered per site. A remembered funnel that no
/// longer exists leaves the content pane empty; only the tab bar is shown.
#[component]
pub fn Behaviours(
    site: Site,
    #[prop(optional)] query: StatsQuery,
    /// Defaults to localStorage
    #[prop(optional)]
    store: Option<Arc<dyn KeyValueStore>>,
) -> impl IntoView {
    let store = store.unwrap_or_else(default_store);
    let selector = TabSelector::new(&site.domain, store);
    let active_tab = selector.active_tab_signal();

    let content = move || {
        active_tab.track();
        let tabs = view! { <BehavioursTabs selector=selector.clone() site=site.clone() /> }.into_any();

        match selector.resolve_active_view(&site.funnels) {
            Some(ResolvedView::Conversions) => view! {
                <ConversionsView site=site.clone() query=query.clone() tabs=tabs />
            }.into_any(),
            Some(ResolvedView::Funnel(funnel)) => view! {
                <FunnelView site=site.clone() funnel=funnel query=query.clone() tabs=tabs />
            }.into_any(),
            None => {
                log::debug!("Behaviours tab {} matches no view", selector.active_tab());
                view! {
                    <div class="behaviours-view">
                        <div class="behaviours-view__header">{tabs}</div>
                    </div>
                }.into_any()
            }
        }
    };

    view! {
        <div class="behaviours-panel">
            {content}
        </div>
    }
}
