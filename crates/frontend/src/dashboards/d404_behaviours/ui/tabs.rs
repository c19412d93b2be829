use crate::dashboards::d404_behaviours::tab_state::{TabSelector, CONVERSIONS};
use contracts::dashboards::d404_behaviours::Site;
use leptos::prelude::*;

/// Tab bar shared by every Behaviours view: Conversions plus the Funnels dropdown.
#[component]
pub fn BehavioursTabs(selector: TabSelector, site: Site) -> impl IntoView {
    let is_open = RwSignal::new(false);
    let active_tab = selector.active_tab_signal();

    let tab_list = {
        let selector = selector.clone();
        Memo::new(move |_| {
            active_tab.track();
            selector.tab_list(&site.funnels)
        })
    };

    let select_conversions = {
        let selector = selector.clone();
        move |_| selector.select_tab(CONVERSIONS)
    };

    view! {
        <div class="behaviours-tabs">
            <div
                class="behaviours-tabs__tab"
                class:behaviours-tabs__tab--active=move || tab_list.get().conversions.active
                on:click=select_conversions
            >
                {move || tab_list.get().conversions.label}
            </div>

            {move || {
                let picker = tab_list.get().funnels;
                let selector = selector.clone();
                let options = picker.options;

                view! {
                    <div class="behaviours-tabs__picker">
                        <button
                            class="behaviours-tabs__tab"
                            class:behaviours-tabs__tab--active=picker.active
                            on:click=move |_| is_open.update(|open| *open = !*open)
                        >
                            {picker.label} " ▾"
                        </button>

                        <Show when=move || is_open.get()>
                            <div class="behaviours-tabs__menu">
                                {options.iter().map(|option| {
                                    let selector = selector.clone();
                                    let id = option.id.clone();
                                    view! {
                                        <span
                                            class="behaviours-tabs__menu-item"
                                            class:behaviours-tabs__menu-item--active=option.active
                                            on:click=move |_| {
                                                selector.select_tab(&id);
                                                is_open.set(false);
                                            }
                                        >
                                            {option.label.clone()}
                                        </span>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }}
        </div>
    }
}
