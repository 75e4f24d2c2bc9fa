//! Number formatting for the listings table.
//!
//! Figures use general format: a fixed number of significant digits, trailing
//! zeros stripped, scientific notation (`1.2e+08`) when the decimal exponent
//! is below -4 or at least the precision.

pub const PRICE_DIGITS: usize = 5;
pub const MARKET_CAP_DIGITS: usize = 3;
pub const SUPPLY_DIGITS: usize = 8;

/// Placeholder for figures the API reported as null.
pub const MISSING: &str = "-";

const UP_MARKER: &str = "▲";
const DOWN_MARKER: &str = "▼";

/// Display prefix for a quote currency code.
pub fn currency_prefix(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{} ", other),
    }
}

/// Format `value` with `precision` significant digits in general notation.
pub fn format_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Insert `,` separators into the integer part of a formatted number.
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (integer, rest) = unsigned.split_at(split);

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}{}", sign, grouped, rest)
}

pub fn format_price(price: f64) -> String {
    format_price_in(price, "USD")
}

/// Price with the currency prefix, thousands-grouped, 5 significant digits.
pub fn format_price_in(price: f64, currency: &str) -> String {
    format!(
        "{}{}",
        currency_prefix(currency),
        group_thousands(&format_general(price, PRICE_DIGITS))
    )
}

/// `▲ 2.00%` for non-negative changes, `▼ 3.46%` for negative ones.
pub fn format_percent_change(change: f64) -> String {
    if change < 0.0 {
        format!("{} {:.2}%", DOWN_MARKER, -change)
    } else {
        // abs() so negative zero prints without a sign
        format!("{} {:.2}%", UP_MARKER, change.abs())
    }
}

pub fn is_positive_change(formatted: &str) -> bool {
    formatted.starts_with(UP_MARKER)
}

pub fn format_market_cap(market_cap: f64) -> String {
    format_market_cap_in(market_cap, "USD")
}

pub fn format_market_cap_in(market_cap: f64, currency: &str) -> String {
    format!(
        "{}{}",
        currency_prefix(currency),
        group_thousands(&format_general(market_cap, MARKET_CAP_DIGITS))
    )
}

pub fn format_total_supply(total_supply: f64, symbol: &str) -> String {
    format!("{} {}", format_general(total_supply, SUPPLY_DIGITS), symbol)
}

/// Apply `format` to a present value, or render the missing placeholder.
pub fn or_missing<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}
