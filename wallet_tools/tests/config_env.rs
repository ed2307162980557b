//! Loading the issuer identity from the environment. Everything runs in one test, since the environment is shared by
//! the whole test binary.
use std::{env, io::Write};

use wallet_tools::{
    test_utils::{TEST_CLIENT_EMAIL, TEST_PRIVATE_KEY},
    DeepLinkIssuer,
    WalletApiError,
    WalletConfig,
    DEFAULT_API_BASE_URL,
    DEFAULT_TOKEN_URI,
};

const VARS: [&str; 11] = [
    "WALLET_ISSUER_ID",
    "GOOGLE_APPLICATION_CREDENTIALS",
    "TYPE",
    "CLIENT_EMAIL",
    "PRIVATE_KEY",
    "PRIVATE_KEY_ID",
    "PROJECT_ID",
    "CLIENT_ID",
    "UNIVERSE_DOMAIN",
    "TOKEN_URI",
    "WALLET_API_BASE_URL",
];

fn clear_env() {
    VARS.iter().for_each(|name| env::remove_var(name));
}

#[test]
fn configuration_from_environment() {
    let _ = env_logger::try_init();
    clear_env();

    // Nothing set
    let err = WalletConfig::try_from_env().unwrap_err();
    assert!(matches!(err, WalletApiError::ConfigurationError(_)));
    assert!(err.to_string().contains("WALLET_ISSUER_ID"));

    // Issuer id, but no credentials at all
    env::set_var("WALLET_ISSUER_ID", "3388000000022222222");
    let err = WalletConfig::try_from_env().unwrap_err();
    assert!(err.to_string().contains("GOOGLE_APPLICATION_CREDENTIALS"), "{err}");

    // Inline credentials, with the key's newlines escaped the way they are in a .env file
    env::set_var("PRIVATE_KEY", TEST_PRIVATE_KEY.replace('\n', "\\n"));
    let err = WalletConfig::try_from_env().unwrap_err();
    assert!(err.to_string().contains("CLIENT_EMAIL"), "{err}");
    env::set_var("CLIENT_EMAIL", TEST_CLIENT_EMAIL);
    env::set_var("TYPE", "service_account");
    env::set_var("PRIVATE_KEY_ID", "0123456789abcdef");
    env::set_var("PROJECT_ID", "loyalty-demo");
    env::set_var("CLIENT_ID", "100000000000000000001");
    env::set_var("UNIVERSE_DOMAIN", "googleapis.com");
    let config = WalletConfig::try_from_env().expect("Failed to load configuration");
    assert_eq!(config.issuer_id, "3388000000022222222");
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.credentials.token_uri, DEFAULT_TOKEN_URI);
    assert_eq!(config.credentials.private_key.reveal().as_str(), TEST_PRIVATE_KEY);
    assert_eq!(config.credentials.private_key_id, "0123456789abcdef");
    assert_eq!(config.credentials.project_id, "loyalty-demo");
    assert_eq!(format!("{:?}", config.credentials.private_key), "****");
    DeepLinkIssuer::new(&config).expect("The key loaded from the environment should be usable");

    env::set_var("WALLET_API_BASE_URL", "http://localhost:8080/walletobjects/v1/");
    let config = WalletConfig::try_from_env().unwrap();
    assert_eq!(config.api_base_url, "http://localhost:8080/walletobjects/v1");

    // A malformed key is only caught once something tries to use it
    env::set_var("PRIVATE_KEY", "not a key");
    let config = WalletConfig::try_from_env().unwrap();
    let err = DeepLinkIssuer::new(&config).unwrap_err();
    assert!(matches!(err, WalletApiError::ConfigurationError(_)));

    // Falling back to a key file
    env::remove_var("PRIVATE_KEY");
    let key_json = serde_json::json!({
        "type": "service_account",
        "project_id": "file-project",
        "private_key_id": "feedface",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "1",
    });
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "{key_json}").unwrap();
    env::set_var("GOOGLE_APPLICATION_CREDENTIALS", f.path());
    let config = WalletConfig::try_from_env().expect("Failed to load key file");
    assert_eq!(config.credentials.project_id, "file-project");
    assert_eq!(config.credentials.private_key_id, "feedface");
    DeepLinkIssuer::new(&config).expect("The key loaded from file should be usable");

    clear_env();
}
