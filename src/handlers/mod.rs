mod fetch_product;
mod health;
mod not_found;
mod test_connection;

pub use fetch_product::fetch_product;
pub use health::health;
pub use not_found::not_found;
pub use test_connection::test_connection;
