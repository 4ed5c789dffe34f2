pub mod auth;
pub mod config;
pub mod models;
pub mod normalize;
pub mod payload;
pub mod reconcile;
pub mod store;

#[cfg(feature = "test_utils")]
pub mod test_utils;
