// Library exports for integration tests
pub mod app_state;
pub mod client;
pub mod config;
pub mod handlers;
pub mod server;
pub mod signing;
pub mod types;
pub mod variant;

// Re-export commonly used types
pub use app_state::AppState;
pub use client::PaapiClient;
pub use config::{Config, CredentialOverrides};
pub use types::{Credentials, PaapiError, Product, ProductImage};
pub use variant::{ApiVariant, VariantName};

// Re-export server creation function
pub use server::create_app;
