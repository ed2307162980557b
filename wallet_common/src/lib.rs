mod secret;

pub mod helpers;

pub use secret::Secret;
