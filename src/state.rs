//! Shared flow context.
//!
//! Bundles the collaborators every flow needs: the auth api, durable
//! storage, the session store and the navigator.

use std::sync::Arc;

use crate::api::AuthApi;
use crate::navigation::{Navigator, DASHBOARD_ROUTE};
use crate::session::SessionStore;
use crate::storage::ClientStorage;

/// Context handed to each flow.
///
/// This is cloned for each flow instance; all members are shared handles.
#[derive(Clone)]
pub struct FlowContext {
    /// Backend the flows submit to.
    pub api: Arc<dyn AuthApi>,
    /// Durable storage holding the session token.
    pub storage: Arc<dyn ClientStorage>,
    /// Holder of the current user's profile.
    pub session: SessionStore,
    /// Route changes after a successful submission.
    pub navigator: Arc<dyn Navigator>,
    /// Destination after login or sign-up.
    pub post_auth_route: String,
}

impl FlowContext {
    pub fn new(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn ClientStorage>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            storage,
            session,
            navigator,
            post_auth_route: DASHBOARD_ROUTE.to_string(),
        }
    }

    pub fn with_post_auth_route(mut self, route: impl Into<String>) -> Self {
        self.post_auth_route = route.into();
        self
    }
}
