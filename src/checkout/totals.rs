//! Checkout totals.

use rusty_money::{Money, iso::Currency};

use crate::{
    items::LineItem,
    pricing::{self, SurchargeRates},
};

/// Base subtotal, surcharges, and grand total of an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    /// Σ unit price × quantity.
    pub subtotal: Money<'static, Currency>,

    /// Σ milk rate × quantity over lines with a non-whole milk.
    pub milk_surcharge: Money<'static, Currency>,

    /// Σ extras count × extra rate × quantity.
    pub extras_surcharge: Money<'static, Currency>,

    /// Subtotal plus both surcharges.
    pub total: Money<'static, Currency>,
}

impl CheckoutTotals {
    /// Computes totals for a set of cart lines.
    pub fn compute(lines: &[LineItem], rates: &SurchargeRates) -> Self {
        let subtotal = sum(lines, |line| {
            pricing::extend(line.unit_price(), line.quantity())
        });
        let milk = sum(lines, |line| milk_surcharge(line, rates));
        let extras = sum(lines, |line| extras_surcharge(line, rates));

        Self {
            subtotal: pricing::money(subtotal),
            milk_surcharge: pricing::money(milk),
            extras_surcharge: pricing::money(extras),
            total: pricing::money(subtotal.saturating_add(milk).saturating_add(extras)),
        }
    }
}

/// Milk surcharge of one line, in minor units.
pub(crate) fn milk_surcharge(line: &LineItem, rates: &SurchargeRates) -> i64 {
    match line.milk() {
        Some(milk) if milk.is_surcharged() => pricing::extend(&rates.milk, line.quantity()),
        _ => 0,
    }
}

/// Extras surcharge of one line, in minor units.
pub(crate) fn extras_surcharge(line: &LineItem, rates: &SurchargeRates) -> i64 {
    let count = u32::try_from(line.extras().len()).unwrap_or(u32::MAX);

    pricing::extend(&rates.extra, count).saturating_mul(i64::from(line.quantity()))
}

fn sum(lines: &[LineItem], amount: impl Fn(&LineItem) -> i64) -> i64 {
    lines.iter().map(amount).fold(0, i64::saturating_add)
}
