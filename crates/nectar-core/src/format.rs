//! Display formatting for metric values and changes

use crate::models::Unit;
use crate::trends::TrendClass;

/// Format a number with thousands separators
pub fn format_number(value: f64, decimal_places: usize) -> String {
    let rendered = format!("{:.*}", decimal_places, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a percentage value (already scaled to 0-100)
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a signed percent change, or "new" when there is no baseline
pub fn format_change(percent: Option<f64>) -> String {
    match percent {
        Some(p) if p > 0.0 => format!("+{:.1}%", p),
        Some(p) => format!("{:.1}%", p),
        None => "new".to_string(),
    }
}

/// Format a duration in seconds as "45s", "2m 5s" or "1h 3m"
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    if total < 60 {
        format!("{}s", total)
    } else if total < 3600 {
        format!("{}m {}s", total / 60, total % 60)
    } else {
        format!("{}h {}m", total / 3600, (total % 3600) / 60)
    }
}

/// Format a metric value for display according to its unit
pub fn format_value(value: f64, unit: Unit) -> String {
    match unit {
        Unit::Count if value.fract() == 0.0 => format_number(value, 0),
        Unit::Count => format_number(value, 1),
        Unit::Percent => format_percent(value),
        Unit::Seconds => format_duration(value),
        Unit::Currency => format!("${}", format_number(value, 2)),
    }
}

/// Arrow (or marker) for a trend classification
pub fn trend_arrow(classification: TrendClass, anomalous: bool) -> &'static str {
    match (classification, anomalous) {
        (TrendClass::Improved, true) => "🚀",
        (TrendClass::Declined, true) => "⚠",
        (TrendClass::Improved, false) => "↑",
        (TrendClass::Declined, false) => "↓",
        (TrendClass::Flat, _) => "→",
        (TrendClass::New, _) => "✦",
    }
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Make a string safe to use as a file name
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '/' | '\\' | ':' => Some('-'),
            '*' | '?' | '"' | '<' | '>' | '|' => None,
            other => Some(other),
        })
        .collect()
}
