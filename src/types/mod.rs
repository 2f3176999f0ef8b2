pub mod error;
mod models;

pub use error::PaapiError;
pub use models::{Credentials, Product, ProductImage};
