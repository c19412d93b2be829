use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Site the Behaviours panel is rendered for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Site domain, also used as the site identifier (e.g., "acme.com")
    pub domain: String,
    /// Funnel definitions configured for the site, in display order
    #[serde(default)]
    pub funnels: Vec<Funnel>,
}

/// Funnel definition. Its name doubles as the tab identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funnel {
    pub id: u64,
    pub name: String,
    #[serde(rename = "stepsCount", default)]
    pub steps_count: u32,
}

/// Query context shared by every stats view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsQuery {
    /// Period code (e.g., "day", "7d", "30d", "month", "custom")
    pub period: String,
    /// Reference date in format "YYYY-MM-DD", None means today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Active dashboard filters, keyed by dimension (e.g., "source" => "Google")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl Default for StatsQuery {
    fn default() -> Self {
        Self {
            period: "30d".to_string(),
            date: None,
            filters: BTreeMap::new(),
        }
    }
}

/// Single goal row of the Conversions view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRow {
    /// Goal name
    pub name: String,
    /// Unique visitors who completed the goal
    pub unique_conversions: u64,
    /// Total goal completions
    pub total_conversions: u64,
    /// Share of all visitors who converted, in percent
    pub conversion_rate: f64,
}

/// Funnel results for the selected query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelReport {
    pub name: String,
    pub steps: Vec<FunnelStep>,
    /// All visitors of the site in the period
    pub all_visitors: u64,
    /// Visitors who completed the first step
    pub entering_visitors: u64,
    /// Share of entering visitors who completed the last step, in percent
    pub conversion_rate: f64,
}

/// Single step of a funnel report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStep {
    pub label: String,
    pub visitors: u64,
    /// Share of entering visitors who reached this step, in percent
    pub conversion_rate: f64,
    /// Visitors lost since the previous step
    pub dropoff: u64,
}
