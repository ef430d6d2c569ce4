//! Display formatting for calculator output
//!
//! Fixed en-US conventions: `,` thousands separator, `.` decimal point,
//! `$` prefix. Halves round away from zero.

/// Fixed-point digits of `|value|`, rounded half away from zero
fn fixed_digits(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let scaled = value.abs() * factor;
    // Past f64 range the value has no fraction digits left to round
    if !scaled.is_finite() {
        return format!("{:.prec$}", value.abs(), prec = decimals);
    }
    format!("{:.prec$}", scaled.round() / factor, prec = decimals)
}

/// Insert `,` every three digits of an integer digit string
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Grouped fixed-point number without sign
fn grouped(value: f64, decimals: usize) -> String {
    let digits = fixed_digits(value, decimals);
    match digits.split_once('.') {
        Some((whole, fraction)) => format!("{}.{}", group_thousands(whole), fraction),
        None => group_thousands(&digits),
    }
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// `$1,234.57` with exactly `decimals` fraction digits
pub fn format_currency(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }
    format!("{}${}", sign(value), grouped(value, decimals))
}

/// `1,235`, no fraction digits
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{}{}", sign(value), grouped(value, 0))
}

/// `12.35%`, rounded from the exact binary value
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}%", value);
    }
    format!("{:.2}%", value)
}

/// Volume in billions with two decimals, e.g. `61.52`
pub fn format_billions(value: f64) -> String {
    let billions = value / 1_000_000_000.0;
    if !billions.is_finite() {
        return billions.to_string();
    }
    format!("{}{}", sign(billions), fixed_digits(billions, 2))
}
