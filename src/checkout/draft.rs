//! Checkout draft.

use crate::api::ServiceType;

/// What the customer filled in at checkout.
///
/// Text fields are trimmed and blank input is stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDraft {
    customer_name: Option<String>,
    service: ServiceType,
    comments: Option<String>,
}

impl CheckoutDraft {
    /// A draft with the given service type and no name or comments.
    #[must_use]
    pub fn new(service: ServiceType) -> Self {
        Self {
            service,
            ..Self::default()
        }
    }

    /// Sets the customer name.
    #[must_use]
    pub fn with_customer_name(mut self, name: impl AsRef<str>) -> Self {
        self.customer_name = non_blank(name.as_ref());
        self
    }

    /// Sets the general comments for the whole order.
    #[must_use]
    pub fn with_comments(mut self, comments: impl AsRef<str>) -> Self {
        self.comments = non_blank(comments.as_ref());
        self
    }

    /// Customer name, if given.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    /// Eat-in or takeout.
    pub fn service(&self) -> ServiceType {
        self.service
    }

    /// General comments, if given.
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}
