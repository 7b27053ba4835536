//! Cart
//!
//! The authoritative in-memory list of cart lines for one session. Every
//! mutation takes `&mut self` and derives the next state from the current
//! list, so rapid successive actions never work off a stale snapshot.

use std::{fmt, sync::Arc};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    api::{MenuApi, validate_product},
    items::{LineItem, LineKey, LineSelection, modifiers::ModifierKind},
    pricing,
    products::{Product, ProductId},
};

/// Reasons an add can be refused. None of them mutate the cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The backend reports the product as missing or inactive.
    #[error("{name} is not available right now")]
    ProductUnavailable {
        /// Refused product.
        product: ProductId,
        /// Its display name.
        name: String,
    },

    /// The product has no usable price.
    #[error("{name} has no price yet, please ask at the counter")]
    NeedsPricing {
        /// Refused product.
        product: ProductId,
        /// Its display name.
        name: String,
    },

    /// The product requires a modifier choice that wasn't made.
    #[error("please choose a {kind} for {name}")]
    MissingModifier {
        /// Refused product.
        product: ProductId,
        /// Its display name.
        name: String,
        /// The modifier family left unchosen.
        kind: ModifierKind,
    },

    /// A modifier was chosen that the product doesn't offer.
    #[error("{name} does not offer a {kind} choice")]
    ModifierNotOffered {
        /// Refused product.
        product: ProductId,
        /// Its display name.
        name: String,
        /// The modifier family that was chosen anyway.
        kind: ModifierKind,
    },

    /// Lines are added with at least one unit.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

/// Cart store.
pub struct CartStore {
    lines: Vec<LineItem>,
    api: Arc<dyn MenuApi>,
    error: Option<String>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates an empty cart that validates products against `api`.
    #[must_use]
    pub fn new(api: Arc<dyn MenuApi>) -> Self {
        Self {
            lines: Vec::new(),
            api,
            error: None,
        }
    }

    /// Adds a product configuration to the cart.
    ///
    /// Local checks run first. The product is then re-validated against the
    /// backend; a product reported missing or inactive is refused, while a
    /// failed validation call lets the add through. An identical
    /// configuration already in the cart has its quantity increased instead
    /// of gaining a second line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the add is refused. The message is also kept
    /// as [`CartStore::last_error`].
    #[tracing::instrument(
        name = "cart.add",
        skip(self, product, selection),
        fields(product_id = %product.id, quantity = selection.quantity),
        err
    )]
    pub async fn add(
        &mut self,
        product: &Arc<Product>,
        selection: LineSelection,
    ) -> Result<LineKey, CartError> {
        let result = self.try_add(product, selection).await;

        self.error = result.as_ref().err().map(ToString::to_string);

        result
    }

    async fn try_add(
        &mut self,
        product: &Arc<Product>,
        selection: LineSelection,
    ) -> Result<LineKey, CartError> {
        check_selection(product, &selection)?;

        match validate_product(self.api.as_ref(), product.id).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(CartError::ProductUnavailable {
                    product: product.id,
                    name: product.name.clone(),
                });
            }
            Err(error) => {
                warn!(product_id = %product.id, %error, "product validation failed, allowing add");
            }
        }

        let line = LineItem::new(product, selection);
        let key = line.key();

        if let Some(existing) = self.lines.iter_mut().find(|existing| existing.key() == key) {
            existing.increase(line.quantity());

            debug!(%key, quantity = existing.quantity(), "merged into existing line");
        } else {
            debug!(%key, quantity = line.quantity(), "appended line");

            self.lines.push(line);
        }

        Ok(key)
    }

    /// Removes a line. Does nothing if the key isn't in the cart.
    pub fn remove(&mut self, key: LineKey) {
        self.lines.retain(|line| line.key() != key);
    }

    /// Replaces a line's quantity. Zero or less removes the line.
    pub fn set_quantity(&mut self, key: LineKey, quantity: i64) {
        if quantity <= 0 {
            self.remove(key);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
            line.set_quantity(quantity);
        }
    }

    /// Empties the cart and forgets the last error.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.error = None;
    }

    /// Sum of `unit price × quantity`, surcharges excluded.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        pricing::money(
            self.lines
                .iter()
                .map(|line| pricing::extend(line.unit_price(), line.quantity()))
                .fold(0_i64, i64::saturating_add),
        )
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Looks up a line by key.
    #[must_use]
    pub fn get(&self, key: LineKey) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Message of the most recent failed add, cleared by the next successful add.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

fn check_selection(product: &Product, selection: &LineSelection) -> Result<(), CartError> {
    if selection.quantity == 0 {
        return Err(CartError::InvalidQuantity);
    }

    if product.needs_pricing() {
        return Err(CartError::NeedsPricing {
            product: product.id,
            name: product.name.clone(),
        });
    }

    let capabilities = product.capabilities;

    let checks = [
        (ModifierKind::Milk, capabilities.milk, selection.milk.is_some(), true),
        (
            ModifierKind::Protein,
            capabilities.protein,
            selection.protein.is_some(),
            true,
        ),
        (
            ModifierKind::Extras,
            capabilities.extras,
            !selection.extras.is_empty(),
            false,
        ),
        (
            ModifierKind::Preparation,
            capabilities.preparation,
            selection.preparation.is_some(),
            false,
        ),
    ];

    for (kind, offered, chosen, required) in checks {
        if chosen && !offered {
            return Err(CartError::ModifierNotOffered {
                product: product.id,
                name: product.name.clone(),
                kind,
            });
        }

        if offered && required && !chosen {
            return Err(CartError::MissingModifier {
                product: product.id,
                name: product.name.clone(),
                kind,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockMenuApi},
        items::modifiers::{Extra, MilkType, Preparation, ProteinType, Size},
        products::{
            fixtures::{frappe, latte, sandwich, shake, unpriced},
            raw::RawProduct,
        },
    };

    use super::*;

    fn catalog_api(ids: &[i64]) -> Arc<dyn MenuApi> {
        let records: Vec<RawProduct> = ids
            .iter()
            .map(|id| RawProduct::from_value(serde_json::json!({ "id_producto": id, "activo": 1 })))
            .collect();

        let mut api = MockMenuApi::new();

        api.expect_list_products()
            .returning(move || Ok(records.clone()));

        Arc::new(api)
    }

    fn offline_api() -> Arc<dyn MenuApi> {
        let mut api = MockMenuApi::new();

        api.expect_list_products().returning(|| {
            Err(ApiError::Unreachable {
                url: "http://localhost:8000/api/productos/ver_productos".to_string(),
                reason: "connection refused".to_string(),
            })
        });

        Arc::new(api)
    }

    fn cart() -> CartStore {
        CartStore::new(catalog_api(&[1, 2, 3, 4, 5]))
    }

    #[tokio::test]
    async fn same_configuration_merges() -> TestResult {
        let mut cart = cart();
        let product = sandwich();

        let first = cart
            .add(&product, LineSelection::new(1).extras([Extra::Egg, Extra::Bacon]))
            .await?;
        let second = cart
            .add(&product, LineSelection::new(2).extras([Extra::Bacon, Extra::Egg]))
            .await?;

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), pricing::money(90_00));

        Ok(())
    }

    #[tokio::test]
    async fn different_milk_splits_lines() -> TestResult {
        let mut cart = cart();
        let product = latte();

        cart.add(&product, LineSelection::new(1).milk(MilkType::Whole))
            .await?;
        cart.add(&product, LineSelection::new(1).milk(MilkType::Almond))
            .await?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn unpriced_product_is_refused() {
        let mut cart = cart();

        let result = cart.add(&unpriced(), LineSelection::new(1)).await;

        assert!(matches!(result, Err(CartError::NeedsPricing { .. })));
        assert!(cart.is_empty());
        assert!(cart.last_error().is_some());
    }

    #[tokio::test]
    async fn zero_quantity_is_refused() {
        let mut cart = cart();

        let result = cart.add(&sandwich(), LineSelection::new(0)).await;

        assert_eq!(result, Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn required_milk_must_be_chosen() {
        let mut cart = cart();

        let result = cart.add(&latte(), LineSelection::new(1)).await;

        assert!(matches!(
            result,
            Err(CartError::MissingModifier {
                kind: ModifierKind::Milk,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn required_protein_must_be_chosen() -> TestResult {
        let mut cart = cart();
        let product = shake();

        let missing = cart.add(&product, LineSelection::new(1)).await;

        assert!(matches!(
            missing,
            Err(CartError::MissingModifier {
                kind: ModifierKind::Protein,
                ..
            })
        ));

        cart.add(
            &product,
            LineSelection::new(1).protein(ProteinType::Creatine),
        )
        .await?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.last_error(), None);

        Ok(())
    }

    #[tokio::test]
    async fn modifiers_not_offered_are_refused() {
        let mut cart = cart();

        let extras_on_drink = cart
            .add(
                &latte(),
                LineSelection::new(1)
                    .milk(MilkType::Whole)
                    .extras([Extra::Ham]),
            )
            .await;

        let prep_on_hot_drink = cart
            .add(
                &latte(),
                LineSelection::new(1)
                    .milk(MilkType::Whole)
                    .preparation(Preparation::Blended),
            )
            .await;

        assert!(matches!(
            extras_on_drink,
            Err(CartError::ModifierNotOffered {
                kind: ModifierKind::Extras,
                ..
            })
        ));
        assert!(matches!(
            prep_on_hot_drink,
            Err(CartError::ModifierNotOffered {
                kind: ModifierKind::Preparation,
                ..
            })
        ));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_unavailable() {
        let mut cart = CartStore::new(catalog_api(&[99]));

        let result = cart.add(&sandwich(), LineSelection::new(1)).await;

        assert!(matches!(result, Err(CartError::ProductUnavailable { .. })));
        assert!(cart.is_empty());
        assert_eq!(
            cart.last_error(),
            Some("Chapata is not available right now")
        );
    }

    #[tokio::test]
    async fn validation_failure_fails_open() -> TestResult {
        let mut cart = CartStore::new(offline_api());

        cart.add(
            &frappe(),
            LineSelection::new(1)
                .milk(MilkType::LactoseFree)
                .preparation(Preparation::Chilled),
        )
        .await?;

        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_zero_matches_remove() -> TestResult {
        let mut removed = cart();
        let mut zeroed = cart();

        for store in [&mut removed, &mut zeroed] {
            store.add(&sandwich(), LineSelection::new(2)).await?;
            store
                .add(&latte(), LineSelection::new(1).milk(MilkType::Whole))
                .await?;
        }

        let key = removed
            .lines()
            .first()
            .map(LineItem::key)
            .ok_or("expected a line")?;

        removed.remove(key);
        zeroed.set_quantity(key, 0);

        assert_eq!(removed.lines(), zeroed.lines());
        assert_eq!(removed.total(), zeroed.total());

        let remaining = zeroed
            .lines()
            .first()
            .map(LineItem::key)
            .ok_or("expected a remaining line")?;

        zeroed.set_quantity(remaining, -3);

        assert!(zeroed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_replaces_in_place() -> TestResult {
        let mut cart = cart();

        let key = cart
            .add(
                &latte(),
                LineSelection::new(1).size(Size::Large).milk(MilkType::Whole),
            )
            .await?;

        cart.set_quantity(key, 4);

        assert_eq!(cart.get(key).map(LineItem::quantity), Some(4));
        assert_eq!(cart.total(), pricing::money(260_00));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_keys_are_ignored() -> TestResult {
        let mut cart = cart();

        cart.add(&sandwich(), LineSelection::new(1)).await?;

        let before = cart.lines().to_vec();
        let stranger = LineItem::new(&latte(), LineSelection::new(1)).key();

        cart.remove(stranger);
        cart.set_quantity(stranger, 5);

        assert_eq!(cart.lines(), before.as_slice());

        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_and_forgets_error() -> TestResult {
        let mut cart = cart();

        cart.add(&sandwich(), LineSelection::new(1)).await?;
        assert!(cart.add(&unpriced(), LineSelection::new(1)).await.is_err());

        assert!(cart.last_error().is_some());

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), pricing::zero());
        assert_eq!(cart.last_error(), None);

        Ok(())
    }
}
