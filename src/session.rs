//! Shared holder of the currently authenticated user's profile.
//!
//! The store is a cheap, cloneable handle injected into every flow. Writers
//! go through [`SessionStore::update_user`]; readers either peek at the
//! current value or subscribe to changes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::models::UserProfile;

#[derive(Clone)]
pub struct SessionStore {
    sender: Arc<watch::Sender<Option<UserProfile>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Merge a server-returned profile into the session. A record for the
    /// same account is overlaid, anything else replaces the current user.
    pub fn update_user(&self, profile: UserProfile) {
        self.sender.send_modify(|current| match current {
            Some(existing) if existing.is_same_user(&profile) => {
                debug!("Merging profile update into current session user");
                existing.merge_from(profile);
            }
            _ => {
                info!("Session user set to '{}'", profile.email);
                *current = Some(profile);
            }
        });
    }

    pub fn clear_user(&self) {
        self.sender.send_replace(None);
        info!("Session user cleared");
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.sender.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Follow every change of the session user.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.sender.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
