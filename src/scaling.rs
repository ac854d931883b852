//! Serving-size adjustment of free-text ingredient quantities.
//!
//! A quantity is a leading magnitude made of digits and dots followed by an
//! arbitrary suffix that is kept verbatim ("1 lb", "4 slices", "1/2 cup").
//! Anything else ("to taste", "a pinch") passes through untouched.

use std::sync::OnceLock;

use regex::Regex;

static QUANTITY_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn quantity_pattern() -> Option<&'static Regex> {
    QUANTITY_PATTERN
        .get_or_init(|| Regex::new(r"^([\d.]+)(.*)$").ok())
        .as_ref()
}

/// Scale `quantity` from `original_servings` to `current_servings`.
///
/// The magnitude is multiplied by `current / original`, rounded to one
/// decimal place and printed without a trailing `.0`. Quantities without a
/// leading magnitude, or a zero `original_servings`, come back unchanged.
pub fn adjusted_quantity(quantity: &str, original_servings: u32, current_servings: u32) -> String {
    if original_servings == 0 {
        return quantity.to_string();
    }

    let Some(captures) = quantity_pattern().and_then(|re| re.captures(quantity)) else {
        return quantity.to_string();
    };
    let (Some(digits), Some(unit)) = (captures.get(1), captures.get(2)) else {
        return quantity.to_string();
    };
    let Some(value) = parse_leading_number(digits.as_str()) else {
        return quantity.to_string();
    };

    let ratio = f64::from(current_servings) / f64::from(original_servings);
    format!("{}{}", format_magnitude(value * ratio), unit.as_str())
}

/// Longest prefix of `digits` that parses as a number, so "1.5.2" reads as 1.5
fn parse_leading_number(digits: &str) -> Option<f64> {
    (1..=digits.len())
        .rev()
        .find_map(|end| digits[..end].parse::<f64>().ok())
}

/// One decimal place without a trailing ".0".
///
/// Rounds the exact binary value, so 0.35 (stored just below the tie) gives
/// "0.3". Only exact ties such as 0.25 go half away from zero.
fn format_magnitude(value: f64) -> String {
    let scaled = value * 10.0;
    // mul_add yields the exact rounding error of the product
    let exact_tie = scaled.fract().abs() == 0.5 && value.mul_add(10.0, -scaled) == 0.0;

    let mut text = if exact_tie {
        format!("{:.1}", scaled.round() / 10.0)
    } else {
        format!("{value:.1}")
    };
    if text.ends_with(".0") {
        text.truncate(text.len() - 2);
    }
    text
}
