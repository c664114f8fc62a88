use tokio::sync::watch;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::status::{FormStatus, StatusHandle};
use super::validation::validate_login;
use super::{complete, interpret, SubmitOutcome};
use crate::models::{LoginForm, LoginRequest, SubmissionResult};
use crate::state::FlowContext;

/// Email + password login.
pub struct LoginFlow {
    ctx: FlowContext,
    form: LoginForm,
    status: StatusHandle,
}

impl LoginFlow {
    pub fn new(ctx: FlowContext) -> Self {
        Self {
            ctx,
            form: LoginForm::default(),
            status: StatusHandle::new(),
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn status(&self) -> FormStatus {
        self.status.get()
    }

    pub fn watch_status(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.status.get().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.status.get().error
    }

    /// Validate and, if the form is valid, log in.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(e) = validate_login(&self.form) {
            info!(field_error = %e, "Login blocked by validation");
            self.status.reject(e);
            return SubmitOutcome::Blocked(e);
        }

        let span = info_span!("submission", flow = "login", attempt_id = %Uuid::new_v4());
        SubmitOutcome::Submitted(self.send().instrument(span).await)
    }

    async fn send(&mut self) -> SubmissionResult {
        self.status.begin();
        let request = LoginRequest::from(&self.form);
        let response = self.ctx.api.login(&request).await;
        let result = complete(&self.ctx, interpret(response)).await;
        self.status.settle(&result);
        result
    }
}
