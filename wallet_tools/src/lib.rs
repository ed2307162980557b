//! Tools for issuing Google Wallet loyalty passes.
//!
//! * [`LoyaltyPassApi`] creates, patches and expires loyalty classes and objects. Each operation checks whether the
//!   resource exists before writing, and reports what happened as an [`UpsertResult`].
//! * [`DeepLinkIssuer`] signs "Add to Google Wallet" links for existing passes. It needs no network access.
//! * [`WalletObjectsApi`] is the authenticated REST client that [`LoyaltyPassApi`] talks to in production.
//!
//! All three are configured from a single [`WalletConfig`], which holds the issuer id and service account key.
mod api;
mod auth;
mod config;
mod deep_link;
mod error;
mod keys;
mod loyalty_pass;
mod traits;

pub mod data_objects;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::WalletObjectsApi;
pub use auth::{AccessToken, ServiceAccountAuth};
pub use config::{
    ServiceAccountKey,
    WalletConfig,
    DEFAULT_API_BASE_URL,
    DEFAULT_TOKEN_URI,
    DEFAULT_UNIVERSE_DOMAIN,
    WALLET_ISSUER_SCOPE,
};
pub use deep_link::{
    DeepLinkClaims,
    DeepLinkIssuer,
    ObjectReference,
    SavePayload,
    SAVE_AUDIENCE,
    SAVE_TOKEN_TYPE,
    SAVE_URL_BASE,
};
pub use error::WalletApiError;
pub use keys::{parse_private_key, parse_public_key, ServiceAccountSigner};
pub use loyalty_pass::{
    LoyaltyPassApi,
    UpsertResult,
    NEW_SECONDARY_POINTS_LABEL,
    PRIMARY_POINTS_LABEL,
    SECONDARY_POINTS_LABEL,
};
pub use traits::WalletObjects;
