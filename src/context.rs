//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    api::{ApiError, HttpMenuApi, MenuApi, PreorderConfirmation},
    cart::{CartError, CartStore},
    catalog::Catalog,
    checkout::{self, CheckoutDraft, CheckoutError, OrderSummary, PreparedOrder},
    config::{ClientConfig, ConfigError},
    items::{LineKey, LineSelection},
    pricing::SurchargeRates,
    products::ProductId,
};

/// Raised while building an [`AppContext`] from configuration.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// A configured value is unusable.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build the HTTP client")]
    Http(#[source] reqwest::Error),
}

/// Raised when adding a catalog product by id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddError {
    /// The id is not on the loaded menu.
    #[error("product {0} is not on the menu")]
    UnknownProduct(ProductId),

    /// The cart refused the add.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Everything one ordering session owns: the backend seam, the menu, the
/// cart, and the surcharge rates in force.
pub struct AppContext {
    api: Arc<dyn MenuApi>,

    /// Loaded menu.
    pub catalog: Catalog,

    /// The session's cart.
    pub cart: CartStore,

    rates: SurchargeRates,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("rates", &self.rates)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds a context that talks to the configured backend over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppInitError> {
        let rates = config.surcharge_rates()?;

        let api = HttpMenuApi::new(&config.api_base_url, config.timeout())
            .map_err(AppInitError::Http)?;

        let image_base = api.base_url().to_string();

        Ok(Self::with_api(Arc::new(api), image_base, rates))
    }

    /// Builds a context around any [`MenuApi`] implementation.
    #[must_use]
    pub fn with_api(
        api: Arc<dyn MenuApi>,
        image_base: impl Into<String>,
        rates: SurchargeRates,
    ) -> Self {
        Self {
            catalog: Catalog::new(image_base),
            cart: CartStore::new(Arc::clone(&api)),
            api,
            rates,
        }
    }

    /// Surcharge rates applied at checkout.
    pub fn rates(&self) -> &SurchargeRates {
        &self.rates
    }

    /// Loads (or reloads) the menu.
    ///
    /// # Errors
    ///
    /// Returns the API error if the product list cannot be fetched.
    pub async fn load_menu(&mut self) -> Result<(), ApiError> {
        self.catalog.refresh(self.api.as_ref()).await
    }

    /// Adds a menu product to the cart by id.
    ///
    /// # Errors
    ///
    /// Returns [`AddError::UnknownProduct`] if the id is not on the loaded
    /// menu, or the cart's refusal.
    pub async fn add_to_cart(
        &mut self,
        id: ProductId,
        selection: LineSelection,
    ) -> Result<LineKey, AddError> {
        let product = self
            .catalog
            .find(id)
            .cloned()
            .ok_or(AddError::UnknownProduct(id))?;

        Ok(self.cart.add(&product, selection).await?)
    }

    /// Prices the current cart without submitting it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty.
    pub fn prepare(&self, draft: &CheckoutDraft) -> Result<PreparedOrder, CheckoutError> {
        checkout::compose(self.cart.lines(), draft, &self.rates)
    }

    /// Summary of the current cart for display.
    pub fn summary<'a>(&'a self, draft: &'a CheckoutDraft) -> OrderSummary<'a> {
        OrderSummary::new(self.cart.lines(), draft, self.rates)
    }

    /// Submits the cart as a pre-order.
    ///
    /// # Errors
    ///
    /// See [`checkout::submit`].
    pub async fn checkout(
        &mut self,
        draft: &CheckoutDraft,
    ) -> Result<PreorderConfirmation, CheckoutError> {
        checkout::submit(&mut self.cart, self.api.as_ref(), draft, &self.rates).await
    }
}
