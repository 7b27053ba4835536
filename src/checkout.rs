//! Checkout
//!
//! Turns the cart and the customer's checkout form into a priced pre-order
//! request, submits it, and clears the cart only once the backend confirms an
//! order id.
//!
//! General comments travel once, in the top-level `comentarios` field. Line
//! observations carry only that line's modifiers.

use thiserror::Error;
use tracing::info;

use crate::{
    api::{ApiError, MenuApi, PreorderConfirmation, PreorderDetail, PreorderRequest},
    cart::CartStore,
    items::LineItem,
    pricing::{self, SurchargeRates},
};

pub mod draft;
pub mod observations;
pub mod summary;
pub mod totals;

pub use crate::api::ServiceType;
pub use draft::CheckoutDraft;
pub use summary::{OrderSummary, SummaryError};
pub use totals::CheckoutTotals;

/// Errors raised by checkout.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// The backend call failed or its answer could not be trusted.
    #[error("could not place your order ({0}), please try again")]
    Submit(#[source] ApiError),
}

impl From<ApiError> for CheckoutError {
    fn from(error: ApiError) -> Self {
        Self::Submit(error)
    }
}

/// A composed order, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOrder {
    request: PreorderRequest,
    totals: CheckoutTotals,
}

impl PreparedOrder {
    /// The wire request.
    pub fn request(&self) -> &PreorderRequest {
        &self.request
    }

    /// Client-side totals, surcharges included.
    pub fn totals(&self) -> &CheckoutTotals {
        &self.totals
    }
}

/// Prices the lines and builds the pre-order request.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there are no lines.
pub fn compose(
    lines: &[LineItem],
    draft: &CheckoutDraft,
    rates: &SurchargeRates,
) -> Result<PreparedOrder, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = CheckoutTotals::compute(lines, rates);

    let details = lines
        .iter()
        .map(|line| PreorderDetail {
            product_id: line.product_id(),
            quantity: line.quantity(),
            observations: observations::observations(line, rates),
        })
        .collect();

    let request = PreorderRequest {
        customer_name: draft.customer_name().map(str::to_string),
        details,
        service: draft.service(),
        comments: draft.comments().map(str::to_string),
        milk_surcharge: pricing::major_units(totals.milk_surcharge.to_minor_units()),
        extras_surcharge: pricing::major_units(totals.extras_surcharge.to_minor_units()),
    };

    Ok(PreparedOrder { request, totals })
}

/// Submits the cart as a pre-order.
///
/// The cart is cleared only when the backend returns an order id; on any
/// failure it is left untouched so the customer can retry.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] without contacting the backend when
/// the cart is empty, or [`CheckoutError::Submit`] when the call fails.
#[tracing::instrument(
    name = "checkout.submit",
    skip(cart, api, draft, rates),
    fields(lines = cart.len(), items = cart.item_count()),
    err
)]
pub async fn submit(
    cart: &mut CartStore,
    api: &dyn MenuApi,
    draft: &CheckoutDraft,
    rates: &SurchargeRates,
) -> Result<PreorderConfirmation, CheckoutError> {
    let order = compose(cart.lines(), draft, rates)?;

    let confirmation = api.create_preorder(order.request()).await?;

    info!(
        order_id = %confirmation.id,
        total = %pricing::format_amount(&order.totals().total),
        "pre-order accepted"
    );

    cart.clear();

    Ok(confirmation)
}
