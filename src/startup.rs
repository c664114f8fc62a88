//! Wiring: builds the flow context from configuration and runs one command.

use std::sync::Arc;

use tracing::{error, info};

use crate::api::create_api;
use crate::cli::Command;
use crate::config::ConfigV1;
use crate::error::AuthFlowError;
use crate::flows::{logout, LoginFlow, SignUpFlow, SubmitOutcome};
use crate::models::ProfileImage;
use crate::navigation::HistoryNavigator;
use crate::session::SessionStore;
use crate::state::FlowContext;
use crate::storage::create_storage;

/// Builds the api client, token storage, session store and navigator
/// described by the configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_context(config: &ConfigV1) -> Result<FlowContext, AuthFlowError> {
    let api = create_api(&config.api)?;
    let storage = create_storage(&config.storage);
    let ctx = FlowContext::new(
        api,
        storage,
        SessionStore::new(),
        Arc::new(HistoryNavigator::new()),
    )
    .with_post_auth_route(config.navigation.post_auth_route.clone());
    Ok(ctx)
}

/// Runs one command against the context and reports whether it succeeded.
/// Validation and request failures are logged and yield `Ok(false)`.
///
/// # Errors
///
/// Returns an error if the profile image cannot be read or the token
/// storage fails during logout.
pub async fn run(ctx: FlowContext, command: Command) -> Result<bool, AuthFlowError> {
    match command {
        Command::Login { email, password } => {
            let mut flow = LoginFlow::new(ctx);
            flow.set_email(email);
            flow.set_password(password);
            Ok(report(&flow.submit().await))
        }
        Command::Signup {
            name,
            email,
            password,
            profile_image,
        } => {
            let image = match profile_image {
                Some(path) => Some(ProfileImage::from_path(path).await?),
                None => None,
            };
            let mut flow = SignUpFlow::new(ctx);
            flow.set_full_name(name);
            flow.set_email(email);
            flow.set_password(password);
            flow.set_profile_image(image);
            Ok(report(&flow.submit().await))
        }
        Command::Logout => {
            logout(&ctx).await?;
            info!("Logged out");
            Ok(true)
        }
    }
}

fn report(outcome: &SubmitOutcome) -> bool {
    if outcome.is_authenticated() {
        return true;
    }
    match outcome.error_message() {
        Some(message) => error!("{}", message),
        None => error!("Backend did not return a session token"),
    }
    false
}
