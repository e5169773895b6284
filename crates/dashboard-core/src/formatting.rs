//! Display formatting for KPI values.
//!
//! The dashboard shows spend and revenue as whole currency units, CAC as
//! currency with cents, ROAS as a bare two-decimal ratio, and counts with
//! thousands separators. Unavailable values render as the [`UNAVAILABLE`]
//! glyph, never as zero.

/// Placeholder glyph for a metric whose inputs are unavailable.
pub const UNAVAILABLE: &str = "—";

/// Format a floating-point number with thousands separators and a fixed
/// number of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    // Let the standard formatter do the rounding, then regroup the integer
    // digits it produced.
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut result = String::new();
    if value < 0.0 {
        result.push('-');
    }
    result.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }
    result
}

/// Whole-unit currency, e.g. `"$1,234"`. Used for spend and revenue KPIs.
pub fn format_currency_whole(amount: f64) -> String {
    format!("${}", format_number(amount, 0))
}

/// Currency with cents, e.g. `"$12.34"`. Used for CAC.
pub fn format_currency(amount: f64) -> String {
    format!("${}", format_number(amount, 2))
}

/// Bare two-decimal ratio, e.g. `"2.67"`. Used for ROAS.
pub fn format_ratio(value: f64) -> String {
    format_number(value, 2)
}

/// Integer count with thousands separators, e.g. `"12,345"`.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

// ── Option-aware wrappers ─────────────────────────────────────────────────────

/// Whole-unit currency or the unavailable glyph.
pub fn opt_currency_whole(amount: Option<f64>) -> String {
    amount.map(format_currency_whole).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Currency with cents or the unavailable glyph.
pub fn opt_currency(amount: Option<f64>) -> String {
    amount.map(format_currency).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Two-decimal ratio or the unavailable glyph.
pub fn opt_ratio(value: Option<f64>) -> String {
    value.map(format_ratio).unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Count or the unavailable glyph.
pub fn opt_count(value: Option<u64>) -> String {
    value.map(format_count).unwrap_or_else(|| UNAVAILABLE.to_string())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ── Tests ─────────────────────────────────────────────────────────────────────
