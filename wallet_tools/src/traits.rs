//! The resource store that passes are written to.
//!
//! [`WalletObjects`] is the contract the upsert logic in [`crate::LoyaltyPassApi`] relies on.
//! [`crate::WalletObjectsApi`] implements it against the Google Wallet REST API; tests swap in an in-memory store or a
//! mock.
use crate::{
    data_objects::{LoyaltyClass, LoyaltyObject},
    WalletApiError,
};

/// Get, insert and patch access to the two resource collections, `loyaltyClass` and `loyaltyObject`.
///
/// Implementations must report a missing resource on `fetch_*` as [`WalletApiError::NotFound`], and only then. The
/// upsert flows branch on exactly that distinction.
#[allow(async_fn_in_trait)]
pub trait WalletObjects {
    async fn fetch_class(&self, resource_id: &str) -> Result<LoyaltyClass, WalletApiError>;

    async fn insert_class(&self, class: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError>;

    /// Patch semantics: fields left out of `patch` keep their stored values.
    async fn patch_class(&self, resource_id: &str, patch: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError>;

    async fn fetch_object(&self, resource_id: &str) -> Result<LoyaltyObject, WalletApiError>;

    async fn insert_object(&self, object: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError>;

    /// Patch semantics: fields left out of `patch` keep their stored values.
    async fn patch_object(&self, resource_id: &str, patch: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError>;
}
