//! Matcha prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{
        ApiError, HttpMenuApi, MenuApi, MockMenuApi, PreorderConfirmation, PreorderDetail,
        PreorderRequest, ServiceType, validate_product,
    },
    cart::{CartError, CartStore},
    catalog::{Catalog, LoadState, LoadTicket},
    checkout::{
        CheckoutDraft, CheckoutError, CheckoutTotals, OrderSummary, PreparedOrder, compose, submit,
    },
    config::{ClientConfig, ConfigError},
    context::{AddError, AppContext, AppInitError},
    items::{
        LineItem, LineKey, LineSelection,
        modifiers::{Extra, MilkType, Preparation, ProteinType, Size},
    },
    pricing::SurchargeRates,
    products::{
        Capabilities, Product, ProductId,
        categories::{MenuCategory, ProductsByCategory, organize},
        normalize::{NormalizeError, normalize},
        raw::RawProduct,
    },
};
