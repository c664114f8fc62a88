//! Login and sign-up flows.
//!
//! Each flow owns one form: it validates locally, makes its backend call,
//! and on success persists the token, updates the session store and
//! navigates to the post-auth route.

pub mod login;
pub mod signup;
pub mod status;
pub mod validation;

pub use login::LoginFlow;
pub use signup::SignUpFlow;
pub use status::{FormStatus, SubmissionState};
pub use validation::validate_email;

use tracing::{error, info, warn};

use crate::error::{RequestError, StorageError, ValidationError, GENERIC_FAILURE_MESSAGE};
use crate::models::{AuthResponse, SubmissionResult};
use crate::state::FlowContext;

/// What a call to `submit` ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; no request was sent.
    Blocked(ValidationError),
    /// The form was sent and the backend call settled.
    Submitted(SubmissionResult),
}

impl SubmitOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(result) if result.is_success())
    }

    /// The error text shown to the user, if the attempt failed.
    pub fn error_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Blocked(e) => Some(e.to_string()),
            SubmitOutcome::Submitted(SubmissionResult::Failure { message }) => Some(message.clone()),
            SubmitOutcome::Submitted(_) => None,
        }
    }
}

/// Which of the two auth pages is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPage {
    #[default]
    Login,
    SignUp,
}

impl AuthPage {
    /// The "Sign Up" / "Login" link under each form.
    pub fn toggle(self) -> Self {
        match self {
            AuthPage::Login => AuthPage::SignUp,
            AuthPage::SignUp => AuthPage::Login,
        }
    }
}

/// Turns the backend answer into a submission result.
fn interpret(response: Result<AuthResponse, RequestError>) -> SubmissionResult {
    match response {
        Ok(response) => {
            let server_message = response.message.clone();
            let result = SubmissionResult::from(response);
            if result == SubmissionResult::Unauthenticated {
                warn!(
                    server_message = server_message.as_deref(),
                    "Backend answered ok without a token; nothing stored"
                );
            }
            result
        }
        Err(e) => {
            warn!(error = %e, "Auth request failed");
            SubmissionResult::Failure {
                message: e.display_message(),
            }
        }
    }
}

/// Applies a successful result: token into storage, profile into the
/// session store, then navigation. A storage failure downgrades the result
/// to the generic failure and nothing else happens.
async fn complete(ctx: &FlowContext, result: SubmissionResult) -> SubmissionResult {
    let (token, user) = match result {
        SubmissionResult::Success { token, user } => (token, user),
        other => return other,
    };

    if let Err(e) = ctx.storage.save_token(&token).await {
        error!(error = %e, "Could not persist session token");
        return SubmissionResult::Failure {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        };
    }
    ctx.session.update_user(user.clone());
    ctx.navigator.navigate(&ctx.post_auth_route);
    info!("Authentication succeeded");

    SubmissionResult::Success { token, user }
}

/// Forget the persisted token and the session user.
pub async fn logout(ctx: &FlowContext) -> Result<(), StorageError> {
    ctx.storage.clear_token().await?;
    ctx.session.clear_user();
    Ok(())
}
