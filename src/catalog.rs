//! Catalog
//!
//! Holds the menu loaded from the backend: active, normalised products in
//! backend order plus their category buckets.
//!
//! Loads are tracked with generation tickets. Starting a load invalidates
//! every earlier ticket, and completing an invalidated ticket is a no-op, so
//! a slow response can never overwrite a newer one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    api::{ApiError, MenuApi},
    products::{
        Product, ProductId,
        categories::{self, ProductsByCategory},
        normalize::normalize,
        raw::RawProduct,
    },
};

/// Load state of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A load is in flight.
    Loading,

    /// The latest load succeeded.
    Ready,

    /// The latest load failed with this message.
    Failed(String),
}

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load ticket must be passed back to `Catalog::complete`"]
pub struct LoadTicket(u64);

/// The menu.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    image_base: String,
    state: LoadState,
    generation: u64,
    products: Vec<Arc<Product>>,
    by_category: ProductsByCategory,
}

impl Catalog {
    /// Creates an empty catalog. `image_base` is the API base URL used to
    /// build image endpoint URLs.
    #[must_use]
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            image_base: image_base.into(),
            ..Self::default()
        }
    }

    /// Starts a load, invalidating any load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state = LoadState::Loading;

        LoadTicket(self.generation)
    }

    /// Applies the outcome of a load.
    ///
    /// Returns `false` and changes nothing when the ticket is stale. On
    /// failure the previously loaded products are kept.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<RawProduct>, ApiError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "discarding stale catalog load"
            );

            return false;
        }

        match outcome {
            Ok(records) => {
                self.products = self.normalize_all(&records);
                self.by_category = categories::organize(&self.products);
                self.state = LoadState::Ready;

                debug!(products = self.products.len(), "catalog loaded");
            }
            Err(error) => {
                warn!(%error, "catalog load failed");

                self.state = LoadState::Failed(error.to_string());
            }
        }

        true
    }

    /// Fetches the product list and applies it.
    ///
    /// # Errors
    ///
    /// Returns the API error when the fetch fails; the failure is also
    /// recorded in [`Catalog::state`].
    pub async fn refresh(&mut self, api: &dyn MenuApi) -> Result<(), ApiError> {
        let ticket = self.begin_load();
        let outcome = api.list_products().await;
        let error = outcome.as_ref().err().cloned();

        self.complete(ticket, outcome);

        error.map_or(Ok(()), Err)
    }

    fn normalize_all(&self, records: &[RawProduct]) -> Vec<Arc<Product>> {
        records
            .iter()
            .filter(|record| record.is_active())
            .filter_map(|record| match normalize(record, &self.image_base) {
                Ok(product) => Some(Arc::new(product)),
                Err(error) => {
                    warn!(%error, ?record, "skipping product record");
                    None
                }
            })
            .collect()
    }

    /// Current load state.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Active products in backend order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Products grouped by menu bucket.
    pub fn by_category(&self) -> &ProductsByCategory {
        &self.by_category
    }

    /// Finds a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| product.id == id)
    }
}
