use crate::dashboards::d404_behaviours::api;
use crate::shared::format::{format_count, format_percent};
use contracts::dashboards::d404_behaviours::{ConversionRow, Site, StatsQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Goal conversions of the site for the current query
#[component]
pub fn ConversionsView(site: Site, query: StatsQuery, tabs: AnyView) -> impl IntoView {
    let rows = RwSignal::new(Vec::<ConversionRow>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        match api::get_conversions(&site.domain, &query).await {
            Ok(data) => rows.set(data),
            Err(e) => {
                log::error!("Failed to load conversions for {}: {}", site.domain, e);
                error.set(Some(e));
            }
        }
        loading.set(false);
    });

    view! {
        <div class="behaviours-view">
            <div class="behaviours-view__header">
                <h3 class="behaviours-view__title">"Goal Conversions"</h3>
                {tabs}
            </div>

            {move || {
                if loading.get() {
                    view! { <Spinner /> }.into_any()
                } else if let Some(e) = error.get() {
                    view! { <div class="warning-box">{e}</div> }.into_any()
                } else if rows.with(|rows| rows.is_empty()) {
                    view! {
                        <div class="behaviours-view__empty">"No goal conversions in this period"</div>
                    }.into_any()
                } else {
                    view! {
                        <table class="behaviours-table">
                            <thead>
                                <tr>
                                    <th>"Goal"</th>
                                    <th>"Uniques"</th>
                                    <th>"Total"</th>
                                    <th>"CR"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.get().into_iter().map(|row| view! {
                                    <tr>
                                        <td>{row.name}</td>
                                        <td>{format_count(row.unique_conversions)}</td>
                                        <td>{format_count(row.total_conversions)}</td>
                                        <td>{format_percent(row.conversion_rate)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_any()
                }
            }}
        </div>
    }
}
