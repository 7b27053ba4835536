//! Modifiers
//!
//! Per-item customisations a customer can pick when adding a product to the
//! cart. Each modifier has an English identifier used in code and the CLI, a
//! wire identifier matching the backend's vocabulary, and a display label used
//! in order observations.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error returned when a modifier name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownModifier {
    /// Which modifier was being parsed.
    pub kind: ModifierKind,

    /// The rejected input.
    pub value: String,
}

/// Modifier families, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    /// Drink size.
    Size,

    /// Cold drink preparation.
    Preparation,

    /// Milk type.
    Milk,

    /// Food extras.
    Extras,

    /// Protein or creatine scoop.
    Protein,
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Size => "size",
            Self::Preparation => "preparation",
            Self::Milk => "milk type",
            Self::Extras => "extra",
            Self::Protein => "protein additive",
        })
    }
}

/// Drink size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Size {
    /// The product's primary size and price (`M`).
    #[default]
    Regular,

    /// The product's second size and price (`G`), when it has one.
    Large,
}

impl Size {
    /// Short label shown when the product doesn't name its sizes.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::Regular => "M",
            Self::Large => "G",
        }
    }
}

impl FromStr for Size {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "regular" | "mediano" => Ok(Self::Regular),
            "g" | "large" | "grande" => Ok(Self::Large),
            _ => Err(unknown(ModifierKind::Size, s)),
        }
    }
}

/// Cold drink preparation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Preparation {
    /// Served over ice (`heladas`).
    Chilled,

    /// Blended with ice (`frapeadas`).
    Blended,
}

impl Preparation {
    /// Backend identifier.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Chilled => "heladas",
            Self::Blended => "frapeadas",
        }
    }

    /// Label used in order observations.
    pub fn label(self) -> &'static str {
        match self {
            Self::Chilled => "Frío",
            Self::Blended => "Frapeado",
        }
    }
}

impl FromStr for Preparation {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chilled" | "heladas" | "helada" | "iced" => Ok(Self::Chilled),
            "blended" | "frapeadas" | "frapeada" | "frappe" => Ok(Self::Blended),
            _ => Err(unknown(ModifierKind::Preparation, s)),
        }
    }
}

/// Milk type for drinks that take milk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MilkType {
    /// Regular whole milk, no surcharge (`entera`).
    #[default]
    Whole,

    /// Lactose-free milk (`deslactosada`).
    LactoseFree,

    /// Almond milk (`almendras`).
    Almond,
}

impl MilkType {
    /// Backend identifier.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Whole => "entera",
            Self::LactoseFree => "deslactosada",
            Self::Almond => "almendras",
        }
    }

    /// Label used in order observations.
    pub fn label(self) -> &'static str {
        match self {
            Self::Whole => "Leche entera",
            Self::LactoseFree => "Leche deslactosada",
            Self::Almond => "Leche de almendras",
        }
    }

    /// Whether this milk carries the milk surcharge.
    pub fn is_surcharged(self) -> bool {
        self != Self::Whole
    }
}

impl FromStr for MilkType {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whole" | "entera" => Ok(Self::Whole),
            "lactose-free" | "lactose_free" | "deslactosada" => Ok(Self::LactoseFree),
            "almond" | "almendras" | "almendra" => Ok(Self::Almond),
            _ => Err(unknown(ModifierKind::Milk, s)),
        }
    }
}

/// Food extras, each charged at the flat extra rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extra {
    /// `tocino`
    Bacon,

    /// `huevo`
    Egg,

    /// `jamon`
    Ham,

    /// `chorizo`
    Chorizo,
}

impl Extra {
    pub(crate) fn bit(self) -> u8 {
        match self {
            Self::Bacon => 0b0001,
            Self::Egg => 0b0010,
            Self::Ham => 0b0100,
            Self::Chorizo => 0b1000,
        }
    }

    /// Backend identifier.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Bacon => "tocino",
            Self::Egg => "huevo",
            Self::Ham => "jamon",
            Self::Chorizo => "chorizo",
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bacon => "Tocino",
            Self::Egg => "Huevo",
            Self::Ham => "Jamón",
            Self::Chorizo => "Chorizo",
        }
    }
}

impl FromStr for Extra {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bacon" | "tocino" => Ok(Self::Bacon),
            "egg" | "huevo" => Ok(Self::Egg),
            "ham" | "jamon" | "jamón" => Ok(Self::Ham),
            "chorizo" => Ok(Self::Chorizo),
            _ => Err(unknown(ModifierKind::Extras, s)),
        }
    }
}

/// Scoop added to protein drinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProteinType {
    /// `proteina`
    Protein,

    /// `creatina`
    Creatine,
}

impl ProteinType {
    /// Backend identifier.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Protein => "proteina",
            Self::Creatine => "creatina",
        }
    }

    /// Label used in order observations.
    pub fn label(self) -> &'static str {
        match self {
            Self::Protein => "Scoop: Proteína",
            Self::Creatine => "Scoop: Creatina",
        }
    }
}

impl FromStr for ProteinType {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protein" | "proteina" | "proteína" => Ok(Self::Protein),
            "creatine" | "creatina" => Ok(Self::Creatine),
            _ => Err(unknown(ModifierKind::Protein, s)),
        }
    }
}

fn unknown(kind: ModifierKind, value: &str) -> UnknownModifier {
    UnknownModifier {
        kind,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_english_and_wire_names() -> TestResult {
        assert_eq!("G".parse::<Size>()?, Size::Large);
        assert_eq!("frapeadas".parse::<Preparation>()?, Preparation::Blended);
        assert_eq!("almond".parse::<MilkType>()?, MilkType::Almond);
        assert_eq!("deslactosada".parse::<MilkType>()?, MilkType::LactoseFree);
        assert_eq!("Jamón".parse::<Extra>()?, Extra::Ham);
        assert_eq!("creatina".parse::<ProteinType>()?, ProteinType::Creatine);

        Ok(())
    }

    #[test]
    fn unknown_names_report_their_kind() {
        let err = "oat".parse::<MilkType>().err();

        assert_eq!(
            err,
            Some(UnknownModifier {
                kind: ModifierKind::Milk,
                value: "oat".to_string(),
            })
        );
    }

    #[test]
    fn only_non_whole_milk_is_surcharged() {
        assert!(!MilkType::Whole.is_surcharged());
        assert!(MilkType::LactoseFree.is_surcharged());
        assert!(MilkType::Almond.is_surcharged());
    }
}
