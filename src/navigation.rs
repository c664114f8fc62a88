//! Imperative "go to path X" navigation.

use std::sync::{Mutex, PoisonError};

use tracing::info;

/// Where the flows send the user after a successful login or sign-up.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// A navigator that records every route change in order and logs it.
/// Stands in for a router when there is no UI, and is handy in tests.
#[derive(Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        info!("Navigating to {}", path);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
