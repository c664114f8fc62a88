use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AuthApi;
use crate::config::ApiConfig;
use crate::error::{ConfigError, RequestError};
use crate::models::{AuthResponse, ImageUploadResponse, LoginRequest, ProfileImage, RegisterRequest};

/// Name of the multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// An AuthApi that talks JSON over HTTP to the configured backend.
pub struct HttpAuthApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpAuthApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, RequestError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("Sending POST request to: {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Only used to pull the human-readable message out of an error body.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Decodes a success body, or turns any other status into `RequestError::Status`
/// carrying the server's `message` when the body has one.
async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<R>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);
    debug!("Request failed with status {} (server message: {:?})", status, message);
    Err(RequestError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RequestError> {
        self.post_json(&self.config.login_path, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, RequestError> {
        self.post_json(&self.config.register_path, request).await
    }

    async fn upload_image(&self, image: &ProfileImage) -> Result<ImageUploadResponse, RequestError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| RequestError::Image(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = self.url(&self.config.upload_image_path);
        debug!("Uploading profile image '{}' to: {}", image.file_name, url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?;
        handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        }
    }

    /// Test that a successful login decodes the token and the profile fields.
    #[tokio::test]
    async fn test_login_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/auth/login")
            .match_body(Matcher::Json(json!({"email": "a@b.com", "password": "x"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "tok-1", "_id": "42", "name": "Ada", "email": "a@b.com"}"#)
            .create_async()
            .await;

        let api = HttpAuthApi::new(&ApiConfig::with_base_url(server.url())).unwrap();
        let response = api.login(&login_request()).await.unwrap();

        m.assert_async().await;
        assert_eq!(response.token.unwrap().as_str(), "tok-1");
        assert_eq!(response.user.id.as_deref(), Some("42"));
        assert_eq!(response.user.name, "Ada");
    }

    /// Test that an error status keeps the server-provided message.
    #[tokio::test]
    async fn test_login_error_carries_server_message() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/auth/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Invalid credentials"}"#)
            .create_async()
            .await;

        let api = HttpAuthApi::new(&ApiConfig::with_base_url(server.url())).unwrap();
        let err = api.login(&login_request()).await.unwrap_err();

        m.assert_async().await;
        match &err {
            RequestError::Status { status, message } => {
                assert_eq!(*status, 401);
                assert_eq!(message.as_deref(), Some("Invalid credentials"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(err.display_message(), "Invalid credentials");
    }

    /// Test that a non-JSON error body still yields a status error without message.
    #[tokio::test]
    async fn test_register_server_error_without_json() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/auth/register")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let api = HttpAuthApi::new(&ApiConfig::with_base_url(server.url())).unwrap();
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "x".to_string(),
            profile_image_url: String::new(),
        };
        let err = api.register(&request).await.unwrap_err();

        m.assert_async().await;
        assert!(matches!(
            err,
            RequestError::Status {
                status: 500,
                message: None
            }
        ));
    }

    /// Test that a garbled success body is a decode error.
    #[tokio::test]
    async fn test_success_with_invalid_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/login")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let api = HttpAuthApi::new(&ApiConfig::with_base_url(server.url())).unwrap();
        let err = api.login(&login_request()).await.unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    /// Test that the image goes out as a multipart "image" part.
    #[tokio::test]
    async fn test_upload_image_multipart() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/auth/upload-image")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::Regex(r#"name="image"; filename="me.png""#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"imageUrl": "http://cdn/me.png"}"#)
            .create_async()
            .await;

        let api = HttpAuthApi::new(&ApiConfig::with_base_url(server.url())).unwrap();
        let image = ProfileImage::new("me.png", "image/png", b"png-bytes".to_vec());
        let response = api.upload_image(&image).await.unwrap();

        m.assert_async().await;
        assert_eq!(response.image_url.as_deref(), Some("http://cdn/me.png"));
    }

    /// Test that an unreachable backend is a transport error.
    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let mut config = ApiConfig::with_base_url("http://127.0.0.1:1");
        config.timeout_in_ms = 500;
        let api = HttpAuthApi::new(&config).unwrap();
        let err = api.login(&login_request()).await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
    }
}
