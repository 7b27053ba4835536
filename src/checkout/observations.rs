//! Per-line observations sent to the kitchen.

use crate::{
    items::LineItem,
    pricing::{self, SurchargeRates},
};

/// Separator between observation pieces.
pub const SEPARATOR: &str = " - ";

/// Builds the observation note for one line.
///
/// Pieces, in order: preparation, non-whole milk, extras with their per-unit
/// surcharge, protein scoop. Returns `None` when the line has none of them.
pub fn observations(line: &LineItem, rates: &SurchargeRates) -> Option<String> {
    let mut pieces: Vec<String> = Vec::with_capacity(4);

    if let Some(preparation) = line.preparation() {
        pieces.push(format!("Preparación: {}", preparation.label()));
    }

    if let Some(milk) = line.milk().filter(|milk| milk.is_surcharged()) {
        pieces.push(milk.label().to_string());
    }

    if !line.extras().is_empty() {
        let names: Vec<&str> = line.extras().iter().map(|extra| extra.label()).collect();

        pieces.push(format!(
            "Extras: {} (+{} c/u)",
            names.join(", "),
            pricing::format_amount(&rates.extra)
        ));
    }

    if let Some(protein) = line.protein() {
        pieces.push(protein.label().to_string());
    }

    (!pieces.is_empty()).then(|| pieces.join(SEPARATOR))
}
