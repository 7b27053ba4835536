//! Items
//!
//! Cart line items: one distinct product + modifier configuration and its
//! quantity.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use rustc_hash::FxHasher;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    pricing,
    products::{Capabilities, Product, ProductId, categories::MenuCategory},
};

pub mod modifiers;

use modifiers::{Extra, MilkType, Preparation, ProteinType, Size};

/// Selected extras; a line rarely carries more than a handful.
pub type Extras = SmallVec<[Extra; 4]>;

/// Structural identity of a cart line.
///
/// Holds the product id and every modifier, with extras kept as a set. Two
/// selections share a key exactly when they describe the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    product: ProductId,
    size: Size,
    preparation: Option<Preparation>,
    milk: Option<MilkType>,
    extras: u8,
    protein: Option<ProteinType>,
}

impl LineKey {
    /// Computes the key for a product and a selection.
    pub fn derive(product: ProductId, selection: &LineSelection) -> Self {
        Self {
            product,
            size: selection.size,
            preparation: selection.preparation,
            milk: selection.milk,
            extras: selection
                .extras
                .iter()
                .fold(0, |set, extra| set | extra.bit()),
            protein: selection.protein,
        }
    }
}

/// Short digest for logs; equality always uses the full key.
impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hasher = FxHasher::default();

        self.hash(&mut hasher);

        write!(f, "{:016x}", hasher.finish())
    }
}

/// What the customer picked for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    /// Requested size.
    pub size: Size,

    /// Number of units to add.
    pub quantity: u32,

    /// Cold drink preparation.
    pub preparation: Option<Preparation>,

    /// Milk type.
    pub milk: Option<MilkType>,

    /// Food extras.
    pub extras: Extras,

    /// Protein or creatine scoop.
    pub protein: Option<ProteinType>,
}

impl LineSelection {
    /// A regular-size selection with no modifiers.
    pub fn new(quantity: u32) -> Self {
        Self {
            size: Size::Regular,
            quantity,
            preparation: None,
            milk: None,
            extras: Extras::new(),
            protein: None,
        }
    }

    /// Sets the size.
    #[must_use]
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the preparation style.
    #[must_use]
    pub fn preparation(mut self, preparation: Preparation) -> Self {
        self.preparation = Some(preparation);
        self
    }

    /// Sets the milk type.
    #[must_use]
    pub fn milk(mut self, milk: MilkType) -> Self {
        self.milk = Some(milk);
        self
    }

    /// Sets the extras, in any order.
    #[must_use]
    pub fn extras(mut self, extras: impl IntoIterator<Item = Extra>) -> Self {
        self.extras = extras.into_iter().collect();
        self
    }

    /// Sets the protein additive.
    #[must_use]
    pub fn protein(mut self, protein: ProteinType) -> Self {
        self.protein = Some(protein);
        self
    }

    /// Sorts and de-duplicates extras so that selection order never matters.
    pub(crate) fn normalised(mut self) -> Self {
        self.extras.sort_unstable();
        self.extras.dedup();
        self
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    key: LineKey,
    product_id: ProductId,
    name: String,
    description: String,
    unit_price: Money<'static, Currency>,
    size: Size,
    size_label: String,
    quantity: u32,
    preparation: Option<Preparation>,
    milk: Option<MilkType>,
    extras: Extras,
    protein: Option<ProteinType>,
    category: MenuCategory,
    category_label: Option<String>,
    capabilities: Capabilities,
    product: Arc<Product>,
}

impl LineItem {
    /// Builds a line from a product and a selection.
    ///
    /// The selection's size is resolved against the product first, so asking
    /// for a large size on a single-size product yields a regular line.
    pub(crate) fn new(product: &Arc<Product>, selection: LineSelection) -> Self {
        let (size, unit_price) = product.price_for(selection.size);

        let selection = LineSelection { size, ..selection }.normalised();
        let key = LineKey::derive(product.id, &selection);

        Self {
            key,
            product_id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price,
            size,
            size_label: product.size_label(size),
            quantity: selection.quantity,
            preparation: selection.preparation,
            milk: selection.milk,
            extras: selection.extras,
            protein: selection.protein,
            category: product.category,
            category_label: product.category_label.clone(),
            capabilities: product.capabilities,
            product: Arc::clone(product),
        }
    }

    /// Structural identity.
    pub fn key(&self) -> LineKey {
        self.key
    }

    /// Backend product id.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Display name at the time the line was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description at the time the line was added.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price of one unit, resolved from the chosen size.
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// `unit_price × quantity`, surcharges excluded.
    pub fn line_total(&self) -> Money<'static, Currency> {
        pricing::money(pricing::extend(&self.unit_price, self.quantity))
    }

    /// Resolved size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size label shown to the customer (`M`, `G`, `12oz`, ...).
    pub fn size_label(&self) -> &str {
        &self.size_label
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn increase(&mut self, by: u32) {
        self.quantity = self.quantity.saturating_add(by);
    }

    /// Cold drink preparation.
    pub fn preparation(&self) -> Option<Preparation> {
        self.preparation
    }

    /// Milk type.
    pub fn milk(&self) -> Option<MilkType> {
        self.milk
    }

    /// Selected extras, sorted.
    pub fn extras(&self) -> &[Extra] {
        &self.extras
    }

    /// Protein additive.
    pub fn protein(&self) -> Option<ProteinType> {
        self.protein
    }

    /// Menu bucket of the product.
    pub fn category(&self) -> MenuCategory {
        self.category
    }

    /// Backend category label of the product.
    pub fn category_label(&self) -> Option<&str> {
        self.category_label.as_deref()
    }

    /// Capability snapshot of the product.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The product this line was created from.
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }
}

#[cfg(test)]
mod tests {
    use crate::products::fixtures::{latte, sandwich};

    use super::*;

    #[test]
    fn extras_order_does_not_change_the_key() {
        let product = sandwich();

        let a = LineItem::new(
            &product,
            LineSelection::new(1).extras([Extra::Egg, Extra::Bacon]),
        );
        let b = LineItem::new(
            &product,
            LineSelection::new(1).extras([Extra::Bacon, Extra::Egg, Extra::Egg]),
        );

        assert_eq!(a.key(), b.key());
        assert_eq!(b.extras(), &[Extra::Bacon, Extra::Egg]);
    }

    #[test]
    fn distinct_configurations_never_share_a_key() {
        let products = [latte(), sandwich()];
        let milks = [None, Some(MilkType::Whole), Some(MilkType::Almond)];
        let extras: [&[Extra]; 3] = [&[], &[Extra::Bacon], &[Extra::Bacon, Extra::Egg]];

        let mut keys = Vec::new();

        for product in &products {
            for size in [Size::Regular, Size::Large] {
                for milk in milks {
                    for chosen in extras {
                        let mut selection = LineSelection::new(1)
                            .size(size)
                            .extras(chosen.iter().copied());
                        selection.milk = milk;

                        keys.push(LineKey::derive(product.id, &selection.normalised()));
                    }
                }
            }
        }

        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();

        assert_eq!(keys.len(), total);
        assert!(keys.iter().all(|key| key.to_string().len() == 16));
    }

    #[test]
    fn milk_type_changes_the_key() {
        let product = latte();

        let whole = LineItem::new(&product, LineSelection::new(1).milk(MilkType::Whole));
        let almond = LineItem::new(&product, LineSelection::new(1).milk(MilkType::Almond));

        assert_ne!(whole.key(), almond.key());
    }

    #[test]
    fn quantity_does_not_change_the_key() {
        let product = latte();

        let one = LineItem::new(&product, LineSelection::new(1).milk(MilkType::Whole));
        let three = LineItem::new(&product, LineSelection::new(3).milk(MilkType::Whole));

        assert_eq!(one.key(), three.key());
    }

    #[test]
    fn large_size_uses_second_price() {
        let product = latte();

        let line = LineItem::new(
            &product,
            LineSelection::new(2).size(Size::Large).milk(MilkType::Whole),
        );

        assert_eq!(line.size(), Size::Large);
        assert_eq!(line.size_label(), "16oz");
        assert_eq!(line.unit_price(), &pricing::money(65_00));
        assert_eq!(line.line_total(), pricing::money(130_00));
    }

    #[test]
    fn large_size_falls_back_when_product_has_one_size() {
        let product = sandwich();

        let large = LineItem::new(&product, LineSelection::new(1).size(Size::Large));
        let regular = LineItem::new(&product, LineSelection::new(1));

        assert_eq!(large.size(), Size::Regular);
        assert_eq!(large.unit_price(), regular.unit_price());
        assert_eq!(large.key(), regular.key());
        assert_eq!(large.size_label(), "M");
    }

    #[test]
    fn line_snapshots_product_details() {
        let product = latte();
        let line = LineItem::new(&product, LineSelection::new(1).milk(MilkType::Whole));

        assert_eq!(line.product_id(), product.id);
        assert_eq!(line.name(), "Latte");
        assert_eq!(line.category(), MenuCategory::HotDrinks);
        assert!(line.capabilities().milk);
        assert!(Arc::ptr_eq(line.product(), &product));
    }
}
