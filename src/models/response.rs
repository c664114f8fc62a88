use serde::{Deserialize, Serialize};

use super::{SessionToken, UserProfile};

/// Body returned by the login and registration endpoints on success.
/// The token sits next to the profile fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AuthResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SessionToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub user: UserProfile,
}

/// Body returned by the image upload endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUploadResponse {
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// How a submission that reached the backend ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    /// The backend issued a token; the user is signed in.
    Success {
        token: SessionToken,
        user: UserProfile,
    },
    /// The request failed; `message` is what the user sees.
    Failure { message: String },
    /// The backend answered ok but without a token. Nothing was stored and
    /// no error is shown, even if the body carries a `message`.
    Unauthenticated,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

impl From<AuthResponse> for SubmissionResult {
    fn from(response: AuthResponse) -> Self {
        match response.token {
            Some(token) if !token.as_str().is_empty() => SubmissionResult::Success {
                token,
                user: response.user,
            },
            _ => SubmissionResult::Unauthenticated,
        }
    }
}
