//! Product Normalisation

use rusty_money::{Money, iso::Currency};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::{
    pricing::{self, parse_price},
    products::{
        Capabilities, Product,
        categories::{self, MenuCategory},
        raw::{RawProduct, keys},
    },
};

/// Errors raised while normalising a raw product.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The record carries no usable identifier under any known alias.
    #[error("product record has no identifier")]
    MissingId,
}

/// Turns a raw backend record into the canonical product.
///
/// `api_base` is used to build image URLs for products that only report an
/// image type.
///
/// # Errors
///
/// Returns [`NormalizeError::MissingId`] if the record has no identifier.
pub fn normalize(raw: &RawProduct, api_base: &str) -> Result<Product, NormalizeError> {
    let id = raw.id().ok_or(NormalizeError::MissingId)?;

    let name = raw.text(keys::NAME).unwrap_or_default();
    let description = raw.text(keys::DESCRIPTION).unwrap_or_default();
    let category_label = raw.text(keys::CATEGORY);
    let subcategory = raw.text(keys::SUBCATEGORY);

    let category = categories::categorize(
        category_label.as_deref(),
        subcategory.as_deref(),
        &name,
        &description,
    );

    let large_price = raw
        .field(keys::LARGE_PRICE)
        .and_then(parse_price)
        .and_then(pricing::minor_units)
        .map(pricing::money);

    let image_url = raw.text(keys::IMAGE).or_else(|| {
        raw.text(keys::IMAGE_TYPE).map(|_| {
            format!(
                "{}/productos/imagen/{id}",
                api_base.trim_end_matches('/')
            )
        })
    });

    let capabilities = Capabilities {
        milk: raw.flag(keys::REQUIRES_MILK).unwrap_or(false),
        extras: raw.flag(keys::REQUIRES_EXTRAS).unwrap_or(false),
        protein: raw.flag(keys::REQUIRES_PROTEIN).unwrap_or(false),
        preparation: category == MenuCategory::ColdDrinks,
    };

    let preparation_minutes = raw
        .field(keys::PREPARATION_MINUTES)
        .and_then(|value| match value {
            Value::Number(number) => number.as_u64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        })
        .and_then(|minutes| u32::try_from(minutes).ok());

    Ok(Product {
        id,
        name,
        description,
        price: pricing::price_or_zero(raw.field(keys::PRICE)),
        size_label: raw.text(keys::SIZE),
        large_size_label: raw.text(keys::LARGE_SIZE),
        large_price,
        category_label,
        subcategory,
        category,
        capabilities,
        image_url,
        preparation_minutes,
        active: raw.is_active(),
    })
}

impl Product {
    /// Projects the product back into a JSON object carrying every concept
    /// under both its canonical and legacy keys, for renderers written
    /// against the older field names.
    pub fn to_legacy_json(&self) -> Value {
        let price = display_price(&self.price);
        let large_price = self.large_price.as_ref().map(display_price);

        let mut fields = Map::new();

        let mut alias = |names: &[&str], value: Value| {
            for name in names {
                fields.insert((*name).to_string(), value.clone());
            }
        };

        alias(&["id", "id_producto"], json!(self.id));
        alias(&["name", "nombre"], json!(self.name));
        alias(&["desc", "descripcion"], json!(self.description));
        alias(&["price"], json!(price));
        alias(
            &["precio"],
            json!(pricing::major_units(self.price.to_minor_units())),
        );
        alias(&["price2", "precio2"], json!(large_price));
        alias(&["size", "tamaño"], json!(self.size_label));
        alias(&["size2", "tamaño2"], json!(self.large_size_label));
        alias(
            &["image", "imagen", "image_url", "url_imagen"],
            json!(self.image_url),
        );
        alias(&["categoria"], json!(self.category_label));
        alias(&["lleva_leche"], json!(self.capabilities.milk));
        alias(&["lleva_extras"], json!(self.capabilities.extras));
        alias(&["lleva_proteina"], json!(self.capabilities.protein));
        alias(&["activo"], json!(self.active));
        alias(&["tiempo_preparacion"], json!(self.preparation_minutes));

        Value::Object(fields)
    }
}

/// Whole amounts render without decimals (`"45"`), others with two (`"45.50"`).
fn display_price(price: &Money<'static, Currency>) -> String {
    let minor = price.to_minor_units();

    if minor % 100 == 0 {
        (minor / 100).to_string()
    } else {
        pricing::major_units(minor).to_string()
    }
}
