//! "Add to Google Wallet" links.
//!
//! A link carries a signed JWT that names the passes to save. The wallet app verifies the signature against the
//! issuer's service account and adds the referenced objects without any further calls to this service.
//!
//! Only already-existing objects are referenced, and exactly one per token.
use chrono::Utc;
use jwt_compact::Claims;
use log::*;
use serde::{Deserialize, Serialize};

use crate::{config::WalletConfig, keys::ServiceAccountSigner, WalletApiError};

pub const SAVE_URL_BASE: &str = "https://pay.google.com/gp/v/save/";
pub const SAVE_AUDIENCE: &str = "google";
pub const SAVE_TOKEN_TYPE: &str = "savetowallet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub id: String,
    pub class_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub loyalty_objects: Vec<ObjectReference>,
}

/// The custom claims of a save-to-wallet JWT. `iat` is added by the standard claims wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkClaims {
    pub iss: String,
    pub aud: String,
    pub typ: String,
    pub payload: SavePayload,
}

#[derive(Clone, Debug)]
pub struct DeepLinkIssuer {
    issuer_id: String,
    signer: ServiceAccountSigner,
}

impl DeepLinkIssuer {
    /// Fails with [`WalletApiError::ConfigurationError`] if the private key is missing or malformed, so that a bad key
    /// is caught at startup rather than when the first link is requested.
    pub fn new(config: &WalletConfig) -> Result<Self, WalletApiError> {
        if config.issuer_id.trim().is_empty() {
            return Err(WalletApiError::ConfigurationError("The issuer id is empty".to_string()));
        }
        let signer = ServiceAccountSigner::new(&config.credentials)?;
        Ok(Self { issuer_id: config.issuer_id.clone(), signer })
    }

    pub fn claims(&self, class_suffix: &str, object_suffix: &str) -> DeepLinkClaims {
        let reference = ObjectReference {
            id: format!("{}.{object_suffix}", self.issuer_id),
            class_id: format!("{}.{class_suffix}", self.issuer_id),
        };
        DeepLinkClaims {
            iss: self.signer.client_email().to_string(),
            aud: SAVE_AUDIENCE.to_string(),
            typ: SAVE_TOKEN_TYPE.to_string(),
            payload: SavePayload { loyalty_objects: vec![reference] },
        }
    }

    /// Signs a JWT referencing the existing object `issuerId.object_suffix` (of class `issuerId.class_suffix`) and
    /// returns the "Add to Google Wallet" link that carries it.
    pub fn create_jwt_existing_object(
        &self,
        class_suffix: &str,
        object_suffix: &str,
    ) -> Result<String, WalletApiError> {
        let mut claims = Claims::new(self.claims(class_suffix, object_suffix));
        claims.issued_at = Some(Utc::now());
        let token = self.signer.sign(&claims)?;
        let link = format!("{SAVE_URL_BASE}{token}");
        info!("🎟️ Add to Google Wallet link for {}.{object_suffix}: {link}", self.issuer_id);
        Ok(link)
    }
}
