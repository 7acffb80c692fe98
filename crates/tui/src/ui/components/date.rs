use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Renders a backend `createDt` timestamp as a pt-BR `dd/mm/yyyy` date.
///
/// The backend only promises an ISO-8601-like string; anything that fails
/// to parse is shown as-is rather than dropped.
pub fn format_create_dt(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%d/%m/%Y").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%d/%m/%Y").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}
