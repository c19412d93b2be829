use crate::dashboards::d404_behaviours::api;
use crate::shared::format::{format_count, format_percent};
use contracts::dashboards::d404_behaviours::{Funnel, FunnelReport, Site, StatsQuery};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Step-by-step results of one funnel
#[component]
pub fn FunnelView(site: Site, funnel: Funnel, query: StatsQuery, tabs: AnyView) -> impl IntoView {
    let report = RwSignal::new(None::<FunnelReport>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let title = funnel.name.clone();

    spawn_local(async move {
        match api::get_funnel(&site.domain, funnel.id, &query).await {
            Ok(data) => report.set(Some(data)),
            Err(e) => {
                log::error!("Failed to load funnel {} for {}: {}", funnel.id, site.domain, e);
                error.set(Some(e));
            }
        }
        loading.set(false);
    });

    view! {
        <div class="behaviours-view">
            <div class="behaviours-view__header">
                <h3 class="behaviours-view__title">{title}</h3>
                {tabs}
            </div>

            {move || {
                if loading.get() {
                    return view! { <Spinner /> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <div class="warning-box">{e}</div> }.into_any();
                }
                let Some(report) = report.get() else {
                    return view! { <></> }.into_any();
                };

                view! {
                    <div class="behaviours-funnel">
                        <p class="behaviours-funnel__summary">
                            {format!(
                                "{} conversion rate, {} of {} visitors entered the funnel",
                                format_percent(report.conversion_rate),
                                format_count(report.entering_visitors),
                                format_count(report.all_visitors),
                            )}
                        </p>
                        <table class="behaviours-table">
                            <thead>
                                <tr>
                                    <th>"Step"</th>
                                    <th>"Visitors"</th>
                                    <th>"Conversion"</th>
                                    <th>"Dropoff"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {report.steps.into_iter().map(|step| view! {
                                    <tr>
                                        <td>{step.label}</td>
                                        <td>{format_count(step.visitors)}</td>
                                        <td>{format_percent(step.conversion_rate)}</td>
                                        <td>{format_count(step.dropoff)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                }.into_any()
            }}
        </div>
    }
}
