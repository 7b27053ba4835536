//! Wire Types
//!
//! Request and response bodies exchanged with the pre-order endpoint. Field
//! names on the wire are the backend's; Rust-side names are ours.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    api::ApiError,
    pricing::{self, parse_price},
    products::ProductId,
};

/// Keys under which the backend may report the created order's id.
const ORDER_ID_KEYS: [&str; 5] = ["id_preorden", "id", "id_orden", "preorden_id", "id_pedido"];

/// Where the customer will eat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// Eat in.
    #[default]
    #[serde(rename = "comer-aqui")]
    EatIn,

    /// Takeout.
    #[serde(rename = "para-llevar")]
    Takeout,
}

impl ServiceType {
    /// Wire identifier.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::EatIn => "comer-aqui",
            Self::Takeout => "para-llevar",
        }
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::EatIn => "Para comer aquí",
            Self::Takeout => "Para llevar",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a service type name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service type: {0}")]
pub struct UnknownServiceType(String);

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "comer-aqui" | "comer-aquí" | "eat-in" | "eatin" | "here" => Ok(Self::EatIn),
            "para-llevar" | "takeout" | "take-out" | "to-go" => Ok(Self::Takeout),
            other => Err(UnknownServiceType(other.to_string())),
        }
    }
}

/// One line of a pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreorderDetail {
    /// Product being ordered.
    #[serde(rename = "id_producto")]
    pub product_id: ProductId,

    /// Units of this configuration.
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Per-line modifier notes, `null` when the line has none.
    #[serde(rename = "observaciones")]
    pub observations: Option<String>,
}

/// Body of `POST /preordenes/crear_preorden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreorderRequest {
    /// Name to call out at the counter.
    #[serde(rename = "nombre_cliente")]
    pub customer_name: Option<String>,

    /// One entry per cart line.
    #[serde(rename = "detalles")]
    pub details: Vec<PreorderDetail>,

    /// Eat in or take out.
    #[serde(rename = "tipo_servicio")]
    pub service: ServiceType,

    /// General comments for the whole order.
    #[serde(rename = "comentarios")]
    pub comments: Option<String>,

    /// Milk surcharge in major units.
    #[serde(rename = "extra_leche", with = "rust_decimal::serde::float")]
    pub milk_surcharge: Decimal,

    /// Extras surcharge in major units.
    #[serde(rename = "extra_extras", with = "rust_decimal::serde::float")]
    pub extras_surcharge: Decimal,
}

/// A pre-order the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct PreorderConfirmation {
    /// Order id as text, whatever type the backend used.
    pub id: String,

    /// Backend-computed total, when reported.
    pub total: Option<Money<'static, Currency>>,

    /// Backend message, when reported.
    pub message: Option<String>,
}

impl PreorderConfirmation {
    /// Reads a confirmation out of a success response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingOrderId`] when no id alias holds a usable value.
    pub fn from_response(body: &Value) -> Result<Self, ApiError> {
        let id = ORDER_ID_KEYS
            .iter()
            .filter_map(|key| body.get(*key))
            .find_map(|value| match value {
                Value::Number(number) => Some(number.to_string()),
                Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                _ => None,
            })
            .ok_or(ApiError::MissingOrderId)?;

        let total = body
            .get("total")
            .and_then(parse_price)
            .and_then(pricing::minor_units)
            .map(pricing::money);

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self { id, total, message })
    }
}

/// Extracts the human-readable reason from an error response body.
///
/// Prefers `detail` over `message`. Structured values (validation error
/// lists, nested objects) are rendered as compact JSON.
pub fn error_detail(body: &Value) -> Option<String> {
    ["detail", "message"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find(|value| !value.is_null())
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
}
