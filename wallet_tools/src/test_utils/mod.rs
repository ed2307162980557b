//! Helpers for exercising the loyalty pass flows without a Google Wallet account.
mod memory_store;

pub use memory_store::MemoryWalletStore;

use crate::config::{ServiceAccountKey, WalletConfig};

pub const TEST_ISSUER_ID: &str = "3388000000022222222";
pub const TEST_CLIENT_EMAIL: &str = "wallet-tests@loyalty-demo.iam.gserviceaccount.com";
pub const TEST_PRIVATE_KEY: &str = include_str!("../../tests/fixtures/test_rsa_private.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../../tests/fixtures/test_rsa_public.pem");

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
}

/// A service account key built around the test key pair. DO NOT use this key anywhere else.
pub fn test_service_account() -> ServiceAccountKey {
    ServiceAccountKey {
        key_type: "service_account".to_string(),
        project_id: "loyalty-demo".to_string(),
        private_key_id: "0123456789abcdef".to_string(),
        private_key: TEST_PRIVATE_KEY.to_string().into(),
        client_email: TEST_CLIENT_EMAIL.to_string(),
        client_id: "100000000000000000001".to_string(),
        ..Default::default()
    }
}

pub fn test_config() -> WalletConfig {
    WalletConfig::new(TEST_ISSUER_ID, test_service_account())
}
