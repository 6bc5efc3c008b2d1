//! Display formatting for monetary amounts and quantities (en-US).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Format an amount as US dollars: `$1,234.56`, `-$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round(value, DISPLAY_DECIMAL_PRECISION);
    let body = group_digits(rounded.abs(), DISPLAY_DECIMAL_PRECISION);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Format a number with thousands separators and exactly `decimals` digits
/// after the point.
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = round(value, decimals);
    let body = group_digits(rounded.abs(), decimals);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{body}")
    } else {
        body
    }
}

fn round(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

fn group_digits(value: Decimal, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}
