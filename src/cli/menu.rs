//! `matcha menu`

use std::{io, sync::Arc};

use clap::Args;
use tabled::{
    builder::Builder,
    settings::{Style, Theme},
};

use crate::{
    cli::CliError,
    context::AppContext,
    items::modifiers::Size,
    pricing,
    products::{Product, categories::MenuCategory},
};

/// Shown instead of a price for products that need manual pricing.
pub const CONSULT_PRICE: &str = "Consultar precio";

/// Options for `matcha menu`.
#[derive(Debug, Clone, Args)]
pub struct MenuArgs {
    /// Only show one section, by anchor (e.g. `bebidas-frias`)
    #[arg(long)]
    pub category: Option<String>,

    /// Print products as JSON with legacy field aliases instead of tables
    #[arg(long)]
    pub json: bool,
}

pub(crate) async fn run(
    context: &mut AppContext,
    args: MenuArgs,
    mut out: impl io::Write,
) -> Result<(), CliError> {
    context.load_menu().await?;

    let wanted = args.category.as_deref().map(str::trim);

    let sections: Vec<(MenuCategory, &[Arc<Product>])> = context
        .catalog
        .by_category()
        .iter()
        .filter(|(category, _)| wanted.is_none_or(|slug| category.slug() == slug))
        .collect();

    if args.json {
        let products: Vec<serde_json::Value> = sections
            .iter()
            .flat_map(|(_, products)| products.iter())
            .map(|product| product.to_legacy_json())
            .collect();

        serde_json::to_writer_pretty(&mut out, &products)?;
        writeln!(out)?;

        return Ok(());
    }

    if sections.is_empty() {
        writeln!(out, "No hay productos disponibles.")?;

        return Ok(());
    }

    for (category, products) in sections {
        writeln!(out, "\n{category}")?;
        writeln!(out, "{}", menu_table(products))?;
    }

    Ok(())
}

fn menu_table(products: &[Arc<Product>]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Producto", "Precio", "Opciones"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            price_cell(product),
            options_cell(product),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));

    table.to_string()
}

/// Price column: one entry per size, or the consult-price notice.
pub fn price_cell(product: &Product) -> String {
    if product.needs_pricing() {
        return CONSULT_PRICE.to_string();
    }

    let regular = match &product.size_label {
        Some(label) => format!("{label} {}", pricing::format_amount(&product.price)),
        None => pricing::format_amount(&product.price),
    };

    match &product.large_price {
        Some(large) => format!(
            "{regular} / {} {}",
            product
                .large_size_label
                .as_deref()
                .unwrap_or(Size::Large.default_label()),
            pricing::format_amount(large)
        ),
        None => regular,
    }
}

fn options_cell(product: &Product) -> String {
    let capabilities = product.capabilities;

    [
        (capabilities.milk, "leche"),
        (capabilities.preparation, "preparación"),
        (capabilities.extras, "extras"),
        (capabilities.protein, "scoop"),
    ]
    .into_iter()
    .filter_map(|(offered, name)| offered.then_some(name))
    .collect::<Vec<_>>()
    .join(", ")
}
