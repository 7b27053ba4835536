//! Backend API
//!
//! The three calls the client makes against the café backend, behind the
//! [`MenuApi`] seam so the cart and checkout can run against a mock.

use async_trait::async_trait;
use mockall::automock;

use crate::products::{ProductId, raw::RawProduct};

pub mod client;
pub mod errors;
pub mod wire;

pub use client::HttpMenuApi;
pub use errors::ApiError;
pub use wire::{PreorderConfirmation, PreorderDetail, PreorderRequest, ServiceType};

/// The café backend.
#[automock]
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Fetches every product record the backend knows about, active or not.
    async fn list_products(&self) -> Result<Vec<RawProduct>, ApiError>;

    /// Submits a pre-order and returns the backend's confirmation.
    async fn create_preorder(
        &self,
        request: &PreorderRequest,
    ) -> Result<PreorderConfirmation, ApiError>;
}

/// Checks that a product still exists and is active.
///
/// Reuses the product list and searches it by id; the backend has no
/// single-product lookup.
///
/// # Errors
///
/// Propagates transport and decoding errors. Callers decide whether to fail
/// open.
pub async fn validate_product(api: &dyn MenuApi, id: ProductId) -> Result<bool, ApiError> {
    let products = api.list_products().await?;

    Ok(products
        .iter()
        .find(|product| product.id() == Some(id))
        .is_some_and(RawProduct::is_active))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn api_returning(records: serde_json::Value) -> MockMenuApi {
        let mut api = MockMenuApi::new();

        let products: Vec<RawProduct> = records
            .as_array()
            .map(|records| records.iter().cloned().map(RawProduct::from_value).collect())
            .unwrap_or_default();

        api.expect_list_products()
            .returning(move || Ok(products.clone()));

        api
    }

    #[tokio::test]
    async fn active_product_is_valid() -> TestResult {
        let api = api_returning(json!([{ "id_producto": 1, "activo": 1 }, { "id": 2 }]));

        assert!(validate_product(&api, ProductId::new(1)).await?);
        assert!(validate_product(&api, ProductId::new(2)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn inactive_or_missing_product_is_invalid() -> TestResult {
        let api = api_returning(json!([{ "id_producto": 1, "activo": false }]));

        assert!(!validate_product(&api, ProductId::new(1)).await?);
        assert!(!validate_product(&api, ProductId::new(9)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let mut api = MockMenuApi::new();

        api.expect_list_products().returning(|| {
            Err(ApiError::Unreachable {
                url: "http://localhost:8000/api/productos/ver_productos".to_string(),
                reason: "connection refused".to_string(),
            })
        });

        assert!(matches!(
            validate_product(&api, ProductId::new(1)).await,
            Err(ApiError::Unreachable { .. })
        ));
    }
}
