//! Number formatting for display.

/// Image shown for cars without one
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";
/// Text shown for cars without a description
pub const NO_DESCRIPTION: &str = "No description available";

/// Group an integer with thousands separators: `1234567` -> `"1,234,567"`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Price with a dollar sign, separators and at most two decimals
///
/// Whole amounts have no fraction: `15000.0` -> `"$15,000"`,
/// `18500.5` -> `"$18,500.5"`.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = (cents % 100).unsigned_abs();

    let sign = if cents < 0 && whole == 0 { "-" } else { "" };
    let mut out = format!("${sign}{}", group_thousands(whole));
    if fraction != 0 {
        let decimals = format!("{fraction:02}");
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

pub fn format_mileage(mileage: i64) -> String {
    format!("{} km", group_thousands(mileage))
}
