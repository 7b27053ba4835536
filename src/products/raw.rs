//! Raw Products
//!
//! The backend names the same concept differently depending on which
//! endpoint or version produced the record (`id_producto` or `id`, `nombre`
//! or `name`, ...). [`RawProduct`] keeps the record as an untyped JSON
//! object and exposes lookups over each concept's known aliases.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::products::ProductId;

/// Field aliases, primary spelling first.
pub(crate) mod keys {
    pub(crate) const ID: &[&str] = &["id_producto", "id"];
    pub(crate) const NAME: &[&str] = &["nombre", "name"];
    pub(crate) const DESCRIPTION: &[&str] = &["descripcion", "desc", "description"];
    pub(crate) const PRICE: &[&str] = &["precio", "price"];
    pub(crate) const LARGE_PRICE: &[&str] = &["precio2", "price2"];
    pub(crate) const SIZE: &[&str] = &["tamaño", "tamano", "size"];
    pub(crate) const LARGE_SIZE: &[&str] = &["tamaño2", "tamano2", "size2"];
    pub(crate) const CATEGORY: &[&str] = &["categoria", "categoria_id", "category"];
    pub(crate) const SUBCATEGORY: &[&str] = &["subcategoria", "subcategory"];
    pub(crate) const IMAGE: &[&str] = &["imagen_url", "image_url", "imagen", "image"];
    pub(crate) const IMAGE_TYPE: &[&str] = &["tipo_imagen"];
    pub(crate) const REQUIRES_MILK: &[&str] = &["lleva_leche", "requires_milk"];
    pub(crate) const REQUIRES_EXTRAS: &[&str] = &["lleva_extras", "requires_extras"];
    pub(crate) const REQUIRES_PROTEIN: &[&str] = &["lleva_proteina", "requires_protein"];
    pub(crate) const ACTIVE: &[&str] = &["activo", "active"];
    pub(crate) const PREPARATION_MINUTES: &[&str] = &["tiempo_preparacion"];
}

/// A product record exactly as the backend sent it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(Map<String, Value>);

impl RawProduct {
    /// Wraps a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps any JSON value, treating non-objects as empty records.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    /// The underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// First non-null value among the given aliases.
    pub fn field(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }

    /// First non-blank string among the given aliases. Numbers are rendered as text.
    pub fn text(&self, aliases: &[&str]) -> Option<String> {
        aliases
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find_map(|value| match value {
                Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
    }

    /// Interprets the first present alias as a flag.
    ///
    /// Accepts `true`/`false`, `1`/`0`, and their string forms.
    pub fn flag(&self, aliases: &[&str]) -> Option<bool> {
        self.field(aliases).and_then(as_flag)
    }

    /// Product identifier, accepting numbers and numeric strings.
    pub fn id(&self) -> Option<ProductId> {
        match self.field(keys::ID)? {
            Value::Number(number) => number.as_i64().map(ProductId::new),
            Value::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    /// Whether the record is sellable. A missing flag counts as active.
    pub fn is_active(&self) -> bool {
        self.flag(keys::ACTIVE).unwrap_or(true)
    }
}

impl From<Map<String, Value>> for RawProduct {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "1" | "true" | "si" | "sí" | "yes" => Some(true),
            "0" | "false" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
