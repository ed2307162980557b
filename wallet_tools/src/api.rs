use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
    StatusCode,
    Url,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    auth::ServiceAccountAuth,
    config::WalletConfig,
    data_objects::{LoyaltyClass, LoyaltyObject},
    traits::WalletObjects,
    WalletApiError,
};

const LOYALTY_CLASS: &str = "loyaltyClass";
const LOYALTY_OBJECT: &str = "loyaltyObject";

/// An authenticated client for the Google Wallet Objects REST API. It is cheap to clone; clones share the underlying
/// HTTP client and access token.
#[derive(Clone)]
pub struct WalletObjectsApi {
    base_url: Url,
    client: Arc<Client>,
    auth: Arc<ServiceAccountAuth>,
}

impl std::fmt::Debug for WalletObjectsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletObjectsApi ({})", self.base_url)
    }
}

impl WalletObjectsApi {
    pub fn new(config: &WalletConfig) -> Result<Self, WalletApiError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            WalletApiError::ConfigurationError(format!("Invalid API base url {}. {e}", config.api_base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(WalletApiError::ConfigurationError(format!("Invalid API base url {base_url}")));
        }
        let auth = ServiceAccountAuth::new(&config.credentials)?;
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("Loyalty Wallet Tools")
            .default_headers(headers)
            .build()
            .map_err(|e| WalletApiError::Initialization(e.to_string()))?;
        Ok(Self { base_url, client: Arc::new(client), auth: Arc::new(auth) })
    }

    /// Appends `segments` to the base url. Each segment is percent-encoded, so reserved characters in a resource id
    /// (`/`, `?`, `#`, `%`) stay part of the id.
    pub fn url(&self, segments: &[&str]) -> Result<Url, WalletApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WalletApiError::RestRequestError(format!("Cannot append a path to {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, WalletApiError> {
        let url = self.url(segments)?;
        let path = segments.join("/");
        let token = self.auth.access_token(&self.client).await?;
        trace!("Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url).bearer_auth(token.reveal());
        if let Some(body) = body {
            req = req.json(body);
        }
        let response = req.send().await.map_err(|e| {
            if e.is_builder() {
                WalletApiError::RestRequestError(e.to_string())
            } else {
                WalletApiError::RestResponseError(e.to_string())
            }
        })?;
        let status = response.status();
        if status.is_success() {
            trace!("REST query successful. {status}");
            response.json::<T>().await.map_err(|e| WalletApiError::JsonError(e.to_string()))
        } else if status == StatusCode::NOT_FOUND {
            Err(WalletApiError::NotFound(path))
        } else {
            let message = response.text().await.map_err(|e| WalletApiError::RestResponseError(e.to_string()))?;
            Err(WalletApiError::QueryError { status: status.as_u16(), message })
        }
    }
}

impl WalletObjects for WalletObjectsApi {
    async fn fetch_class(&self, resource_id: &str) -> Result<LoyaltyClass, WalletApiError> {
        debug!("Fetching class {resource_id}");
        self.rest_query::<LoyaltyClass, ()>(Method::GET, &[LOYALTY_CLASS, resource_id], None).await
    }

    async fn insert_class(&self, class: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError> {
        debug!("Inserting class: {}", serde_json::to_string(class).unwrap_or_default());
        self.rest_query(Method::POST, &[LOYALTY_CLASS], Some(class)).await
    }

    async fn patch_class(&self, resource_id: &str, patch: &LoyaltyClass) -> Result<LoyaltyClass, WalletApiError> {
        debug!("Patching class {resource_id}: {}", serde_json::to_string(patch).unwrap_or_default());
        self.rest_query(Method::PATCH, &[LOYALTY_CLASS, resource_id], Some(patch)).await
    }

    async fn fetch_object(&self, resource_id: &str) -> Result<LoyaltyObject, WalletApiError> {
        debug!("Fetching object {resource_id}");
        self.rest_query::<LoyaltyObject, ()>(Method::GET, &[LOYALTY_OBJECT, resource_id], None).await
    }

    async fn insert_object(&self, object: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError> {
        debug!("Inserting object: {}", serde_json::to_string(object).unwrap_or_default());
        self.rest_query(Method::POST, &[LOYALTY_OBJECT], Some(object)).await
    }

    async fn patch_object(&self, resource_id: &str, patch: &LoyaltyObject) -> Result<LoyaltyObject, WalletApiError> {
        debug!("Patching object {resource_id}: {}", serde_json::to_string(patch).unwrap_or_default());
        self.rest_query(Method::PATCH, &[LOYALTY_OBJECT, resource_id], Some(patch)).await
    }
}
