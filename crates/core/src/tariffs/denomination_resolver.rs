//! Prices a stamp denomination against a tariff table.
//!
//! A denomination is one of four shapes, tried in this order:
//!
//! | Rule                | Example       | Result                        |
//! |---------------------|---------------|-------------------------------|
//! | `ExactCode`         | `H`           | tariff of `H` (UAH, then USD) |
//! | `CodePlusSurcharge` | `F+8.00`      | tariff of `F` plus 8.00       |
//! | `NumericWithMarker` | `60.00 грн`   | 60.00 UAH                     |
//! | `BareNumeric`       | `-5`, `1e2`   | the number in UAH             |
//!
//! Anything else renders as `N/A`.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use super::tariffs_model::{TariffCurrency, TariffTable, NOT_AVAILABLE};
use crate::Denomination;

lazy_static! {
    /// Letter code followed by `+` and a surcharge, e.g. `F+8.00`.
    /// Letters cover Latin and Ukrainian Cyrillic.
    static ref CODE_PLUS_SURCHARGE_REGEX: Regex =
        Regex::new(r"(?i)^([A-ZА-ЯЁЄІЇҐ]+)\+([0-9]+(?:\.[0-9]*)?|\.[0-9]+)$")
            .expect("Invalid regex pattern");

    /// Unsigned decimal with an optional hryvnia marker, e.g. `60.00 грн`.
    static ref NUMERIC_WITH_MARKER_REGEX: Regex =
        Regex::new(r"(?i)^([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*(?:грн|UAH)?$")
            .expect("Invalid regex pattern");

    /// Signed decimal with an optional exponent, e.g. `-5` or `1.5e2`.
    static ref BARE_NUMERIC_REGEX: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("Invalid regex pattern");
}

/// A resolved price, or the explicit absence of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampValue {
    Priced {
        amount: Decimal,
        currency: TariffCurrency,
    },
    NotAvailable,
}

impl StampValue {
    fn priced(amount: Decimal, currency: TariffCurrency) -> Self {
        StampValue::Priced { amount, currency }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            StampValue::Priced { amount, .. } => Some(*amount),
            StampValue::NotAvailable => None,
        }
    }
}

impl fmt::Display for StampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampValue::Priced { amount, currency } => {
                let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                // Sub-cent negatives round to a signed zero.
                let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
                write!(f, "{:.2} {}", rounded, currency)
            }
            StampValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// One denomination shape. Rules are evaluated in [`DenominationRule::ORDERED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenominationRule {
    ExactCode,
    CodePlusSurcharge,
    NumericWithMarker,
    BareNumeric,
}

impl DenominationRule {
    pub const ORDERED: [DenominationRule; 4] = [
        DenominationRule::ExactCode,
        DenominationRule::CodePlusSurcharge,
        DenominationRule::NumericWithMarker,
        DenominationRule::BareNumeric,
    ];

    /// Apply this rule to a trimmed input.
    ///
    /// `None` means the rule does not match and the next one should be
    /// tried. `Some(StampValue::NotAvailable)` stops evaluation.
    pub fn apply(self, input: &str, table: &TariffTable) -> Option<StampValue> {
        match self {
            DenominationRule::ExactCode => table
                .resolve_code(&input.to_uppercase())
                .map(|(price, currency)| StampValue::priced(price, currency)),
            DenominationRule::CodePlusSurcharge => {
                let caps = CODE_PLUS_SURCHARGE_REGEX.captures(input)?;
                let code = caps[1].to_uppercase();
                let value = match (table.resolve_code(&code), parse_decimal(&caps[2])) {
                    (Some((base, currency)), Some(surcharge)) => base
                        .checked_add(surcharge)
                        .map_or(StampValue::NotAvailable, |total| {
                            StampValue::priced(total, currency)
                        }),
                    _ => StampValue::NotAvailable,
                };
                Some(value)
            }
            DenominationRule::NumericWithMarker => {
                let caps = NUMERIC_WITH_MARKER_REGEX.captures(input)?;
                parse_decimal(&caps[1]).map(|value| StampValue::priced(value, TariffCurrency::Uah))
            }
            DenominationRule::BareNumeric => {
                if !BARE_NUMERIC_REGEX.is_match(input) {
                    return None;
                }
                parse_decimal(input).map(|value| StampValue::priced(value, TariffCurrency::Uah))
            }
        }
    }
}

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: i64 = 28;
/// Most significant digits that fit in a `Decimal` mantissa.
const MAX_DIGITS: i64 = 29;

/// Parse a decimal literal, tolerating `.5`, `5.` and exponents.
///
/// Digits below the smallest representable unit are truncated, so a zero
/// mantissa or a very negative exponent yields zero rather than `None`.
/// `None` is returned only when the value is too large for a `Decimal`.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let (negative, digits) = match unsigned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, unsigned),
    };

    let (mantissa, exponent) = match digits.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&digits[..idx], &digits[idx + 1..]),
        None => (digits, "0"),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut coefficient = format!("{}{}", int_part, frac_part)
        .trim_start_matches('0')
        .to_string();
    if coefficient.is_empty() {
        return Some(Decimal::ZERO);
    }

    let exponent = match exponent.parse::<i64>() {
        Ok(exponent) => exponent,
        Err(_) if exponent.starts_with('-') => return Some(Decimal::ZERO),
        Err(_) => return None,
    };

    let len = coefficient.len() as i64;
    let mut scale = (frac_part.len() as i64).saturating_sub(exponent);

    let overflow = (len - MAX_DIGITS).clamp(0, scale.max(0));
    let drop = scale.saturating_sub(MAX_SCALE).max(overflow);
    if drop > 0 {
        if drop >= len {
            return Some(Decimal::ZERO);
        }
        coefficient.truncate((len - drop) as usize);
        scale -= drop;
    }

    if scale < 0 {
        if (coefficient.len() as i64).saturating_sub(scale) > MAX_DIGITS {
            return None;
        }
        coefficient.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        scale = 0;
    }

    let units = coefficient.parse::<i128>().ok()?;
    let units = if negative { -units } else { units };
    Decimal::try_from_i128_with_scale(units, scale as u32).ok()
}

/// Resolve a denomination against `table`, first matching rule wins.
pub fn resolve_denomination(denomination: &Denomination, table: &TariffTable) -> StampValue {
    if denomination.is_blank() {
        return StampValue::NotAvailable;
    }

    let raw = denomination.to_string();
    let input = raw.trim();
    if input.is_empty() {
        return StampValue::NotAvailable;
    }

    DenominationRule::ORDERED
        .iter()
        .find_map(|rule| rule.apply(input, table))
        .unwrap_or(StampValue::NotAvailable)
}

/// Render the price of a denomination, `"N/A"` when either input is missing.
pub fn format_stamp_value(
    denomination: Option<&Denomination>,
    table: Option<&TariffTable>,
) -> String {
    match (denomination, table) {
        (Some(denomination), Some(table)) => resolve_denomination(denomination, table).to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
