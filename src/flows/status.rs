//! The per-form submission state machine.
//!
//! `Idle -> Submitting -> (Success | Failed)`, and back to `Submitting` on
//! the next attempt. Every transition is published on a watch channel.

use tokio::sync::watch;
use tracing::debug;

use crate::error::ValidationError;
use crate::models::SubmissionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// What a form shows: where the submission stands and the error text, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormStatus {
    pub state: SubmissionState,
    pub error: Option<String>,
}

impl FormStatus {
    /// True exactly while a request is in flight.
    pub fn loading(&self) -> bool {
        self.state == SubmissionState::Submitting
    }
}

/// Owner side of a form's status.
pub(crate) struct StatusHandle {
    sender: watch::Sender<FormStatus>,
}

impl StatusHandle {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(FormStatus::default());
        Self { sender }
    }

    pub(crate) fn get(&self) -> FormStatus {
        self.sender.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.sender.subscribe()
    }

    fn set(&self, state: SubmissionState, error: Option<String>) {
        debug!(?state, error = error.as_deref(), "form status changed");
        self.sender.send_replace(FormStatus { state, error });
    }

    /// Validation failed: nothing is sent and loading stays off.
    pub(crate) fn reject(&self, error: ValidationError) {
        self.set(SubmissionState::Failed, Some(error.to_string()));
    }

    /// A valid form is being sent: loading on, prior error cleared.
    pub(crate) fn begin(&self) {
        self.set(SubmissionState::Submitting, None);
    }

    /// The request settled: loading off, whatever the outcome.
    pub(crate) fn settle(&self, result: &SubmissionResult) {
        match result {
            SubmissionResult::Success { .. } => self.set(SubmissionState::Success, None),
            SubmissionResult::Failure { message } => {
                self.set(SubmissionState::Failed, Some(message.clone()))
            }
            SubmissionResult::Unauthenticated => self.set(SubmissionState::Idle, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionToken, UserProfile};

    #[test]
    fn test_transitions() {
        let status = StatusHandle::new();
        assert_eq!(status.get(), FormStatus::default());
        assert!(!status.get().loading());

        status.reject(ValidationError::Email);
        assert_eq!(status.get().state, SubmissionState::Failed);
        assert_eq!(status.get().error.as_deref(), Some("Invalid email"));

        status.begin();
        assert!(status.get().loading());
        assert!(status.get().error.is_none());

        status.settle(&SubmissionResult::Failure {
            message: "nope".to_string(),
        });
        assert!(!status.get().loading());
        assert_eq!(status.get().error.as_deref(), Some("nope"));

        status.begin();
        status.settle(&SubmissionResult::Success {
            token: SessionToken::new("t"),
            user: UserProfile::default(),
        });
        assert_eq!(status.get().state, SubmissionState::Success);

        status.begin();
        status.settle(&SubmissionResult::Unauthenticated);
        assert_eq!(status.get(), FormStatus::default());
    }

    #[tokio::test]
    async fn test_subscribers_follow_transitions() {
        let status = StatusHandle::new();
        let mut rx = status.subscribe();

        status.begin();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().loading());
    }
}
