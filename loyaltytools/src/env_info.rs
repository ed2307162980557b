use std::{env, env::VarError};

pub fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 10] = [
        "RUST_LOG",
        "WALLET_ISSUER_ID",
        "WALLET_API_BASE_URL",
        "GOOGLE_APPLICATION_CREDENTIALS",
        "TYPE",
        "CLIENT_EMAIL",
        "PROJECT_ID",
        "CLIENT_ID",
        "UNIVERSE_DOMAIN",
        "TOKEN_URI",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    });
    let key_state = match env::var("PRIVATE_KEY") {
        Ok(s) if !s.trim().is_empty() => "Set",
        _ => "Not set",
    };
    println!("  {:<35} {key_state:<15}", "PRIVATE_KEY");
}
