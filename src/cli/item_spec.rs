//! Item Specs
//!
//! `--item` values name a product id followed by comma-separated
//! `key=value` modifiers:
//!
//! ```text
//! 12,qty=2,size=G,milk=almendras,prep=frapeadas,extras=tocino+huevo,protein=creatina
//! ```
//!
//! Keys and values accept English or backend spellings.

use std::{num::ParseIntError, str::FromStr};

use thiserror::Error;

use crate::{
    items::{
        LineSelection,
        modifiers::{Extra, UnknownModifier},
    },
    products::ProductId,
};

/// Errors raised while parsing an item spec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemSpecError {
    /// The spec was empty.
    #[error("item spec is empty")]
    Empty,

    /// The leading product id did not parse.
    #[error("invalid product id `{value}`")]
    InvalidId {
        /// The text that was given.
        value: String,
        /// Why it did not parse.
        #[source]
        source: ParseIntError,
    },

    /// The quantity did not parse as a whole number.
    #[error("invalid quantity `{value}`")]
    InvalidQuantity {
        /// The text that was given.
        value: String,
        /// Why it did not parse.
        #[source]
        source: ParseIntError,
    },

    /// A modifier was written without `=value`.
    #[error("modifier `{0}` has no value")]
    MissingValue(String),

    /// A modifier key is not recognised.
    #[error("unknown modifier key `{0}`")]
    UnknownKey(String),

    /// A modifier value is not recognised.
    #[error(transparent)]
    Modifier(#[from] UnknownModifier),
}

/// A product id and the selection to add it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    /// Product to add.
    pub product: ProductId,

    /// Size, quantity and modifiers.
    pub selection: LineSelection,
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);

        let id = parts
            .next()
            .filter(|id| !id.is_empty())
            .ok_or(ItemSpecError::Empty)?;

        let product = id.parse().map_err(|source| ItemSpecError::InvalidId {
            value: id.to_string(),
            source,
        })?;

        let mut selection = LineSelection::new(1);

        for part in parts.filter(|part| !part.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| ItemSpecError::MissingValue(part.to_string()))?;

            selection = apply(selection, key.trim(), value.trim())?;
        }

        Ok(Self { product, selection })
    }
}

fn apply(selection: LineSelection, key: &str, value: &str) -> Result<LineSelection, ItemSpecError> {
    let selection = match key.to_lowercase().as_str() {
        "qty" | "quantity" | "cantidad" => LineSelection {
            quantity: value
                .parse()
                .map_err(|source| ItemSpecError::InvalidQuantity {
                    value: value.to_string(),
                    source,
                })?,
            ..selection
        },
        "size" | "tamaño" | "tamano" => selection.size(value.parse()?),
        "milk" | "leche" => selection.milk(value.parse()?),
        "prep" | "preparation" | "preparacion" => selection.preparation(value.parse()?),
        "protein" | "proteina" | "scoop" => selection.protein(value.parse()?),
        "extras" => {
            let extras = value
                .split('+')
                .map(str::trim)
                .filter(|extra| !extra.is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Extra>, _>>()?;

            selection.extras(extras)
        }
        other => return Err(ItemSpecError::UnknownKey(other.to_string())),
    };

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::modifiers::{MilkType, Preparation, ProteinType, Size};

    use super::*;

    #[test]
    fn bare_id_is_one_regular_unit() -> TestResult {
        let spec: ItemSpec = "12".parse()?;

        assert_eq!(spec.product, ProductId::new(12));
        assert_eq!(spec.selection, LineSelection::new(1));

        Ok(())
    }

    #[test]
    fn parses_every_modifier() -> TestResult {
        let spec: ItemSpec =
            "12, qty=2, size=G, milk=almendras, prep=frapeadas, extras=tocino+huevo, protein=creatina"
                .parse()?;

        assert_eq!(
            spec.selection,
            LineSelection::new(2)
                .size(Size::Large)
                .milk(MilkType::Almond)
                .preparation(Preparation::Blended)
                .extras([Extra::Bacon, Extra::Egg])
                .protein(ProteinType::Creatine)
        );

        Ok(())
    }

    #[test]
    fn english_names_are_accepted() -> TestResult {
        let spec: ItemSpec = "3,quantity=1,milk=lactose-free,extras=ham".parse()?;

        assert_eq!(spec.selection.milk, Some(MilkType::LactoseFree));
        assert_eq!(spec.selection.extras.as_slice(), &[Extra::Ham]);

        Ok(())
    }

    #[test]
    fn invalid_quantity_keeps_the_parse_error() -> TestResult {
        let error = "1,qty=-1"
            .parse::<ItemSpec>()
            .err()
            .ok_or("negative quantity should be rejected")?;

        assert!(matches!(error, ItemSpecError::InvalidQuantity { .. }));
        assert!(std::error::Error::source(&error).is_some());

        Ok(())
    }

    #[test]
    fn rejects_malformed_specs() {
        assert_eq!("".parse::<ItemSpec>(), Err(ItemSpecError::Empty));
        assert!(matches!(
            "abc".parse::<ItemSpec>(),
            Err(ItemSpecError::InvalidId { .. })
        ));
        assert!(matches!(
            "1,qty=two".parse::<ItemSpec>(),
            Err(ItemSpecError::InvalidQuantity { value, .. }) if value == "two"
        ));
        assert_eq!(
            "1,milk".parse::<ItemSpec>(),
            Err(ItemSpecError::MissingValue("milk".to_string()))
        );
        assert_eq!(
            "1,sugar=yes".parse::<ItemSpec>(),
            Err(ItemSpecError::UnknownKey("sugar".to_string()))
        );
        assert!(matches!(
            "1,milk=oat".parse::<ItemSpec>(),
            Err(ItemSpecError::Modifier(_))
        ));
    }
}
