//! Menu Categories
//!
//! The backend's category label is free text, cased and accented
//! inconsistently. Labels are folded (lowercase, accents stripped, `-`/`_`
//! treated as spaces) and looked up in a static table that maps every known
//! spelling onto one of eight menu buckets.
//!
//! `bebidas fitness` is ambiguous: it covers both energy shots and protein
//! drinks. An explicit backend sub-category wins when present; otherwise the
//! description and name are sniffed for protein keywords. This is a
//! heuristic, not a guaranteed classifier.

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use rustc_hash::FxHashMap;

use crate::products::Product;

/// The eight fixed menu buckets, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MenuCategory {
    /// Bebidas Calientes
    HotDrinks,

    /// Bebidas Frías
    ColdDrinks,

    /// Shots de Energía
    EnergyShots,

    /// Bebidas con Proteína
    ProteinDrinks,

    /// Menú Dulce
    SweetMenu,

    /// Menú Salado
    SavoryMenu,

    /// Ensaladas
    Salads,

    /// Otros (catch-all)
    Other,
}

impl MenuCategory {
    /// Every bucket, in menu order.
    pub const ALL: [Self; 8] = [
        Self::HotDrinks,
        Self::ColdDrinks,
        Self::EnergyShots,
        Self::ProteinDrinks,
        Self::SweetMenu,
        Self::SavoryMenu,
        Self::Salads,
        Self::Other,
    ];

    /// The named buckets used by the round-robin fallback.
    pub const NAMED: [Self; 7] = [
        Self::HotDrinks,
        Self::ColdDrinks,
        Self::EnergyShots,
        Self::ProteinDrinks,
        Self::SweetMenu,
        Self::SavoryMenu,
        Self::Salads,
    ];

    /// Section anchor used by the menu page.
    pub fn slug(self) -> &'static str {
        match self {
            Self::HotDrinks => "bebidas-calientes",
            Self::ColdDrinks => "bebidas-frias",
            Self::EnergyShots => "shots-energia",
            Self::ProteinDrinks => "bebidas-proteina",
            Self::SweetMenu => "menu-dulce",
            Self::SavoryMenu => "menu-salado",
            Self::Salads => "ensaladas",
            Self::Other => "otros",
        }
    }

    /// Section heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::HotDrinks => "Bebidas Calientes",
            Self::ColdDrinks => "Bebidas Frías",
            Self::EnergyShots => "Shots de Energía",
            Self::ProteinDrinks => "Bebidas con Proteína",
            Self::SweetMenu => "Menú Dulce",
            Self::SavoryMenu => "Menú Salado",
            Self::Salads => "Ensaladas",
            Self::Other => "Otros",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mapping {
    Bucket(MenuCategory),
    Fitness,
}

const PROTEIN_KEYWORDS: [&str; 3] = ["scoop", "proteina", "protein"];

fn table() -> &'static FxHashMap<&'static str, Mapping> {
    static TABLE: OnceLock<FxHashMap<&'static str, Mapping>> = OnceLock::new();

    TABLE.get_or_init(|| {
        use MenuCategory::{
            ColdDrinks, EnergyShots, HotDrinks, Other, ProteinDrinks, Salads, SavoryMenu,
            SweetMenu,
        };

        [
            ("bebidas calientes", Mapping::Bucket(HotDrinks)),
            ("bebida caliente", Mapping::Bucket(HotDrinks)),
            ("bebidas frias", Mapping::Bucket(ColdDrinks)),
            ("bebida fria", Mapping::Bucket(ColdDrinks)),
            ("shots de energia", Mapping::Bucket(EnergyShots)),
            ("shots energia", Mapping::Bucket(EnergyShots)),
            ("bebidas con proteina", Mapping::Bucket(ProteinDrinks)),
            ("bebidas proteina", Mapping::Bucket(ProteinDrinks)),
            ("bebidas fitness", Mapping::Fitness),
            ("menu dulce", Mapping::Bucket(SweetMenu)),
            ("postres", Mapping::Bucket(SweetMenu)),
            ("menu salado", Mapping::Bucket(SavoryMenu)),
            ("alimentos", Mapping::Bucket(SavoryMenu)),
            ("ensaladas", Mapping::Bucket(Salads)),
            ("ensalada", Mapping::Bucket(Salads)),
            ("otros", Mapping::Bucket(Other)),
        ]
        .into_iter()
        .collect()
    })
}

/// Folds a label for lookup: lowercase, accents stripped, separators unified.
pub fn fold_label(label: &str) -> String {
    let folded: String = label
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            '-' | '_' => ' ',
            other => other,
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Maps a category label on its own, without product context.
///
/// The ambiguous fitness label resolves to energy shots here; use
/// [`categorize`] to apply the sub-category and keyword rules.
pub fn map_label(label: &str) -> MenuCategory {
    match table().get(fold_label(label).as_str()) {
        Some(Mapping::Bucket(category)) => *category,
        Some(Mapping::Fitness) => MenuCategory::EnergyShots,
        None => MenuCategory::Other,
    }
}

/// Resolves the bucket for a product's category fields.
pub fn categorize(
    label: Option<&str>,
    subcategory: Option<&str>,
    name: &str,
    description: &str,
) -> MenuCategory {
    let Some(label) = label else {
        return MenuCategory::Other;
    };

    match table().get(fold_label(label).as_str()) {
        Some(Mapping::Bucket(category)) => *category,
        Some(Mapping::Fitness) => resolve_fitness(subcategory, name, description),
        None => MenuCategory::Other,
    }
}

fn resolve_fitness(subcategory: Option<&str>, name: &str, description: &str) -> MenuCategory {
    let explicit = subcategory
        .map(map_label)
        .filter(|category| {
            matches!(
                category,
                MenuCategory::EnergyShots | MenuCategory::ProteinDrinks
            )
        });

    if let Some(category) = explicit {
        return category;
    }

    let haystack = fold_label(&format!("{description} {name}"));

    if PROTEIN_KEYWORDS.iter().any(|keyword| haystack.contains(keyword)) {
        MenuCategory::ProteinDrinks
    } else {
        MenuCategory::EnergyShots
    }
}

/// Products grouped into the eight menu buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsByCategory {
    buckets: FxHashMap<MenuCategory, Vec<Arc<Product>>>,
}

impl ProductsByCategory {
    /// Products in one bucket, in input order.
    pub fn get(&self, category: MenuCategory) -> &[Arc<Product>] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Non-empty buckets in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuCategory, &[Arc<Product>])> {
        MenuCategory::ALL
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, products)| !products.is_empty())
    }

    /// Total number of products across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, category: MenuCategory, product: Arc<Product>) {
        self.buckets.entry(category).or_default().push(product);
    }
}

/// Groups products by their resolved category.
///
/// When every product lands in [`MenuCategory::Other`] the backend supplied
/// no usable categories at all, so products are dealt round-robin across the
/// seven named buckets in input order instead. The same input always yields
/// the same grouping.
pub fn organize(products: &[Arc<Product>]) -> ProductsByCategory {
    let mut organized = ProductsByCategory::default();

    let uncategorized = products
        .iter()
        .all(|product| product.category == MenuCategory::Other);

    if uncategorized {
        for (category, product) in MenuCategory::NAMED.iter().cycle().zip(products) {
            organized.push(*category, Arc::clone(product));
        }
    } else {
        for product in products {
            organized.push(product.category, Arc::clone(product));
        }
    }

    organized
}
