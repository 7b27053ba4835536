//! Product fixtures for unit tests.

use std::sync::Arc;

use crate::{
    pricing,
    products::{Capabilities, Product, ProductId, categories::MenuCategory},
};

fn base(id: i64, name: &str, price: i64, category: MenuCategory) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: String::new(),
        price: pricing::money(price),
        size_label: None,
        large_size_label: None,
        large_price: None,
        category_label: None,
        subcategory: None,
        category,
        capabilities: Capabilities::default(),
        image_url: None,
        preparation_minutes: None,
        active: true,
    }
}

/// Hot drink with two sizes that requires a milk choice.
pub(crate) fn latte() -> Arc<Product> {
    Arc::new(Product {
        size_label: Some("12oz".to_string()),
        large_size_label: Some("16oz".to_string()),
        large_price: Some(pricing::money(65_00)),
        category_label: Some("Bebidas Calientes".to_string()),
        capabilities: Capabilities {
            milk: true,
            ..Capabilities::default()
        },
        ..base(1, "Latte", 55_00, MenuCategory::HotDrinks)
    })
}

/// Cold drink offering preparation and milk.
pub(crate) fn frappe() -> Arc<Product> {
    Arc::new(Product {
        category_label: Some("Bebidas Frías".to_string()),
        capabilities: Capabilities {
            milk: true,
            preparation: true,
            ..Capabilities::default()
        },
        ..base(2, "Matcha Frío", 50_00, MenuCategory::ColdDrinks)
    })
}

/// Savoury item that accepts extras.
pub(crate) fn sandwich() -> Arc<Product> {
    Arc::new(Product {
        category_label: Some("Menú Salado".to_string()),
        capabilities: Capabilities {
            extras: true,
            ..Capabilities::default()
        },
        ..base(3, "Chapata", 30_00, MenuCategory::SavoryMenu)
    })
}

/// Protein drink that requires a scoop choice.
pub(crate) fn shake() -> Arc<Product> {
    Arc::new(Product {
        category_label: Some("Bebidas Fitness".to_string()),
        description: "Con un scoop de proteína".to_string(),
        capabilities: Capabilities {
            protein: true,
            ..Capabilities::default()
        },
        ..base(4, "Batido Fit", 70_00, MenuCategory::ProteinDrinks)
    })
}

/// Product with no usable price.
pub(crate) fn unpriced() -> Arc<Product> {
    Arc::new(base(5, "Pastel del día", 0, MenuCategory::SweetMenu))
}
