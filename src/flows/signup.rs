use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::status::{FormStatus, StatusHandle};
use super::validation::validate_sign_up;
use super::{complete, interpret, SubmitOutcome};
use crate::error::RequestError;
use crate::models::{ProfileImage, RegisterRequest, SignUpForm, SubmissionResult};
use crate::state::FlowContext;

/// Account creation with an optional profile image.
pub struct SignUpFlow {
    ctx: FlowContext,
    form: SignUpForm,
    status: StatusHandle,
}

impl SignUpFlow {
    pub fn new(ctx: FlowContext) -> Self {
        Self {
            ctx,
            form: SignUpForm::default(),
            status: StatusHandle::new(),
        }
    }

    pub fn form(&self) -> &SignUpForm {
        &self.form
    }

    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.form.full_name = full_name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
    }

    pub fn set_profile_image(&mut self, image: Option<ProfileImage>) {
        self.form.profile_image = image;
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

    /// Validate and, if the form is valid, upload the image (if any) and register.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(e) = validate_sign_up(&self.form) {
            info!(field_error = %e, "Sign-up blocked by validation");
            self.status.reject(e);
            return SubmitOutcome::Blocked(e);
        }

        let span = info_span!("submission", flow = "signup", attempt_id = %Uuid::new_v4());
        SubmitOutcome::Submitted(self.send().instrument(span).await)
    }

    async fn send(&mut self) -> SubmissionResult {
        self.status.begin();

        // an upload failure aborts registration through the generic failure path
        let (response, profile_image_url) = match self.upload_image().await {
            Ok(url) => {
                let request = RegisterRequest::from_form(&self.form, url.clone());
                (self.ctx.api.register(&request).await, url)
            }
            Err(e) => (Err(e), String::new()),
        };

        let result = complete(&self.ctx, interpret(response)).await;
        if !result.is_success() && !profile_image_url.is_empty() {
            // no compensating delete exists on the backend
            warn!(
                image_url = profile_image_url.as_str(),
                "Registration did not complete; uploaded profile image is orphaned"
            );
        }
        self.status.settle(&result);
        result
    }

    /// Uploads the selected image and returns its URL, or "" when there is none.
    async fn upload_image(&self) -> Result<String, RequestError> {
        let Some(image) = &self.form.profile_image else {
            return Ok(String::new());
        };
        debug!("Uploading profile image before registration");
        let uploaded = self.ctx.api.upload_image(image).await?;
        Ok(uploaded.image_url.unwrap_or_default())
    }
}
