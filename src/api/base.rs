use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::http_api::HttpAuthApi;
use crate::config::ApiConfig;
use crate::error::{ConfigError, RequestError};
use crate::models::{AuthResponse, ImageUploadResponse, LoginRequest, ProfileImage, RegisterRequest};

/// The AuthApi trait abstracts the auth backend the flows talk to.
/// Any non-success answer is reported as a `RequestError`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RequestError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, RequestError>;
    async fn upload_image(&self, image: &ProfileImage) -> Result<ImageUploadResponse, RequestError>;
}

/// Creates the HTTP-backed api from its config.
pub fn create_api(config: &ApiConfig) -> Result<Arc<dyn AuthApi>, ConfigError> {
    let api = HttpAuthApi::new(config)?;
    info!("Auth api configured against {}", config.base_url);
    Ok(Arc::new(api))
}
