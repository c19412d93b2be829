use crate::config::API_BASE;
use contracts::dashboards::d404_behaviours::{ConversionRow, FunnelReport, StatsQuery};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

fn with_query(path: String, query: &StatsQuery) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        Ok(_) => path,
        Err(e) => {
            log::warn!("Failed to encode stats query: {}", e);
            path
        }
    }
}

/// URL of the goal conversions of a site
pub fn conversions_url(domain: &str, query: &StatsQuery) -> String {
    let path = format!("{}/{}/conversions", API_BASE, urlencoding::encode(domain));
    with_query(path, query)
}

/// URL of the results of a single funnel
pub fn funnel_url(domain: &str, funnel_id: u64, query: &StatsQuery) -> String {
    let path = format!(
        "{}/{}/funnels/{}",
        API_BASE,
        urlencoding::encode(domain),
        funnel_id
    );
    with_query(path, query)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Goal conversions of a site for the query
pub async fn get_conversions(
    domain: &str,
    query: &StatsQuery,
) -> Result<Vec<ConversionRow>, String> {
    get_json(&conversions_url(domain, query)).await
}

/// Results of a single funnel for the query
pub async fn get_funnel(
    domain: &str,
    funnel_id: u64,
    query: &StatsQuery,
) -> Result<FunnelReport, String> {
    get_json(&funnel_url(domain, funnel_id, query)).await
}
