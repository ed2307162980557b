//! Service account authorization for the Wallet Objects API.
//!
//! Access tokens are obtained with the OAuth 2.0 JWT bearer grant: a short-lived assertion signed with the service
//! account key is exchanged at the key's `token_uri` for a bearer token, which is then reused until shortly before it
//! expires.
use chrono::{DateTime, Duration, Utc};
use jwt_compact::Claims;
use log::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use wallet_common::Secret;

use crate::{
    config::{ServiceAccountKey, WALLET_ISSUER_SCOPE},
    keys::ServiceAccountSigner,
    WalletApiError,
};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME: Duration = Duration::hours(1);
/// Tokens this close to expiry are refreshed rather than reused.
const EXPIRY_MARGIN: Duration = Duration::seconds(60);

#[derive(Debug, Clone, Serialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Clone, Debug)]
pub struct AccessToken {
    token: Secret<String>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token: Secret::new(token), expires_at }
    }

    pub fn reveal(&self) -> &str {
        self.token.reveal()
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + EXPIRY_MARGIN < self.expires_at
    }
}

#[derive(Debug)]
pub struct ServiceAccountAuth {
    signer: ServiceAccountSigner,
    token_uri: String,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    pub fn new(credentials: &ServiceAccountKey) -> Result<Self, WalletApiError> {
        let signer = ServiceAccountSigner::new(credentials)?;
        Ok(Self { signer, token_uri: credentials.token_uri.clone(), cached: Mutex::new(None) })
    }

    /// Builds the signed assertion that is exchanged for an access token.
    pub fn assertion(&self, now: DateTime<Utc>) -> Result<String, WalletApiError> {
        let custom = AssertionClaims {
            iss: self.signer.client_email().to_string(),
            scope: WALLET_ISSUER_SCOPE.to_string(),
            aud: self.token_uri.clone(),
        };
        let mut claims = Claims::new(custom);
        claims.issued_at = Some(now);
        claims.expiration = Some(now + ASSERTION_LIFETIME);
        self.signer.sign(&claims)
    }

    /// Returns a valid access token, fetching a new one from the token endpoint if the cached one is missing or about
    /// to expire.
    pub async fn access_token(&self, client: &Client) -> Result<AccessToken, WalletApiError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            trace!("Reusing cached access token");
            return Ok(token.clone());
        }
        let token = self.fetch_token(client, now).await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn fetch_token(&self, client: &Client, now: DateTime<Utc>) -> Result<AccessToken, WalletApiError> {
        let assertion = self.assertion(now)?;
        debug!("🔑️ Requesting access token for {} from {}", self.signer.client_email(), self.token_uri);
        let response = client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| WalletApiError::AuthError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(WalletApiError::AuthError(format!("Token endpoint returned {status}. {message}")));
        }
        let token = response.json::<TokenResponse>().await.map_err(|e| WalletApiError::AuthError(e.to_string()))?;
        let expires_at = token_expiry(now, token.expires_in)?;
        info!("🔑️ Obtained access token, valid for {}s", token.expires_in);
        Ok(AccessToken::new(token.access_token, expires_at))
    }
}

fn token_expiry(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>, WalletApiError> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| WalletApiError::AuthError(format!("Invalid token lifetime: {expires_in}s")))
}
