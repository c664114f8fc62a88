pub mod base;
pub mod http_api;

// Re-export the primary api items so code outside can do
// "use crate::api::{AuthApi, create_api};"
pub use base::{create_api, AuthApi};
pub use http_api::HttpAuthApi;
