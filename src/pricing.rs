//! Pricing

use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde_json::Value;

pub use rusty_money::iso::MXN as CURRENCY;

/// Default surcharge for a non-whole milk, per unit, in minor units.
pub const DEFAULT_MILK_SURCHARGE: i64 = 15_00;

/// Default surcharge for each selected extra, per unit, in minor units.
pub const DEFAULT_EXTRA_SURCHARGE: i64 = 20_00;

/// Creates an amount in the menu currency from minor units.
pub fn money(minor: i64) -> Money<'static, Currency> {
    Money::from_minor(minor, CURRENCY)
}

/// A zero amount in the menu currency.
pub fn zero() -> Money<'static, Currency> {
    money(0)
}

/// Converts a major-unit decimal (e.g. `25.50`) into minor units, rounding to the nearest cent.
///
/// Returns `None` when the amount does not fit.
pub fn minor_units(amount: Decimal) -> Option<i64> {
    amount.checked_mul(Decimal::ONE_HUNDRED)?.round().to_i64()
}

/// Converts minor units back into a major-unit decimal with two places.
pub fn major_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Parses a backend price value.
///
/// Numbers are taken as-is; strings may carry a currency symbol, thousands
/// separators and surrounding whitespace (`"$1,250.00"`). Returns `None` for
/// anything that isn't a strictly positive amount.
pub fn parse_price(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(number) => Decimal::from_str(&number.to_string()).ok()?,
        Value::String(text) => {
            let cleaned: String = text
                .chars()
                .filter(|ch| !matches!(ch, '$' | ',') && !ch.is_whitespace())
                .collect();

            Decimal::from_str(&cleaned).ok()?
        }
        _ => return None,
    };

    (amount > Decimal::ZERO).then_some(amount)
}

/// Parses a backend price into money, normalising anything unusable to zero.
///
/// A zero result means "needs manual pricing" and must never be sold.
pub fn price_or_zero(value: Option<&Value>) -> Money<'static, Currency> {
    value
        .and_then(parse_price)
        .and_then(minor_units)
        .map_or_else(zero, money)
}

/// Multiplies a unit amount by a quantity, in minor units.
pub fn extend(unit: &Money<'_, Currency>, quantity: u32) -> i64 {
    unit.to_minor_units().saturating_mul(i64::from(quantity))
}

/// Formats an amount for display and observation notes, e.g. `$20.00`.
pub fn format_amount(amount: &Money<'_, Currency>) -> String {
    format!("${}", major_units(amount.to_minor_units()))
}

/// Per-unit surcharges applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurchargeRates {
    /// Charged per unit for any milk other than whole.
    pub milk: Money<'static, Currency>,

    /// Charged per unit for each selected extra.
    pub extra: Money<'static, Currency>,
}

impl SurchargeRates {
    /// Builds rates from minor-unit amounts.
    pub fn from_minor(milk: i64, extra: i64) -> Self {
        Self {
            milk: money(milk),
            extra: money(extra),
        }
    }
}

impl Default for SurchargeRates {
    fn default() -> Self {
        Self::from_minor(DEFAULT_MILK_SURCHARGE, DEFAULT_EXTRA_SURCHARGE)
    }
}
