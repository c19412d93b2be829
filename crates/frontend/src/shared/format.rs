//! Number formatting for stats tables

/// Short visitor count: 999, 1.2k, 12k, 3.4M
pub fn format_count(value: u64) -> String {
    const THOUSAND: u64 = 1_000;
    const MILLION: u64 = 1_000_000;
    const BILLION: u64 = 1_000_000_000;

    let (divisor, suffix) = match value {
        v if v >= BILLION => (BILLION, "B"),
        v if v >= MILLION => (MILLION, "M"),
        v if v >= THOUSAND => (THOUSAND, "k"),
        _ => return value.to_string(),
    };

    let whole = value / divisor;
    if whole >= 100 {
        return format!("{}{}", whole, suffix);
    }
    // one decimal below 100, truncated so 1999 shows as 1.9k
    let tenths = value / (divisor / 10) % 10;
    if whole >= 10 || tenths == 0 {
        format!("{}{}", whole, suffix)
    } else {
        format!("{}.{}{}", whole, tenths, suffix)
    }
}

/// Percentage with at most one decimal: 12.5%, 40%
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}
