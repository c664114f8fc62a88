#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use authflow::api::AuthApi;
use authflow::error::{RequestError, StorageError};
use authflow::flows::FormStatus;
use authflow::models::{
    AuthResponse, ImageUploadResponse, LoginRequest, ProfileImage, RegisterRequest,
};
use authflow::navigation::HistoryNavigator;
use authflow::session::SessionStore;
use authflow::state::FlowContext;
use authflow::storage::{ClientStorage, MemoryStorage};
use serde_json::Value;
use tokio::sync::watch;

/// A canned backend answer.
#[derive(Clone, Debug)]
pub enum Reply {
    Ok(Value),
    Status(u16, Option<String>),
    Unreachable,
}

impl Reply {
    fn into_result<T: serde::de::DeserializeOwned>(self) -> Result<T, RequestError> {
        match self {
            Reply::Ok(body) => serde_json::from_value(body)
                .map_err(|e| RequestError::Decode(e.to_string())),
            Reply::Status(status, message) => Err(RequestError::Status { status, message }),
            Reply::Unreachable => Err(RequestError::Transport("connection refused".to_string())),
        }
    }
}

/// An AuthApi that answers from a script and records every call.
pub struct ScriptedApi {
    auth_reply: Reply,
    upload_reply: Reply,
    pub logins: Mutex<Vec<LoginRequest>>,
    pub registrations: Mutex<Vec<RegisterRequest>>,
    pub uploads: Mutex<Vec<String>>,
    /// Status of the form observed at the moment each call was made.
    pub loading_during_calls: Mutex<Vec<bool>>,
    probe: Mutex<Option<watch::Receiver<FormStatus>>>,
}

impl ScriptedApi {
    pub fn new(auth_reply: Reply) -> Arc<Self> {
        Self::with_upload(auth_reply, Reply::Status(500, None))
    }

    pub fn with_upload(auth_reply: Reply, upload_reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            auth_reply,
            upload_reply,
            logins: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            loading_during_calls: Mutex::new(Vec::new()),
            probe: Mutex::new(None),
        })
    }

    /// Let the api look at the form status while it is being called.
    pub fn observe(&self, status: watch::Receiver<FormStatus>) {
        *self.probe.lock().unwrap() = Some(status);
    }

    fn record_loading(&self) {
        if let Some(rx) = self.probe.lock().unwrap().as_ref() {
            let loading = rx.borrow().loading();
            self.loading_during_calls.lock().unwrap().push(loading);
        }
    }

    pub fn call_count(&self) -> usize {
        self.logins.lock().unwrap().len()
            + self.registrations.lock().unwrap().len()
            + self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl AuthApi for ScriptedApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, RequestError> {
        self.record_loading();
        self.logins.lock().unwrap().push(request.clone());
        self.auth_reply.clone().into_result()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, RequestError> {
        self.record_loading();
        self.registrations.lock().unwrap().push(request.clone());
        self.auth_reply.clone().into_result()
    }

    async fn upload_image(&self, image: &ProfileImage) -> Result<ImageUploadResponse, RequestError> {
        self.record_loading();
        self.uploads.lock().unwrap().push(image.file_name.clone());
        self.upload_reply.clone().into_result()
    }
}

/// Storage whose writes always fail.
pub struct BrokenStorage;

#[async_trait]
impl ClientStorage for BrokenStorage {
    async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }

    async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn get_name(&self) -> &str {
        "broken"
    }
}

pub struct Harness {
    pub ctx: FlowContext,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<HistoryNavigator>,
    pub session: SessionStore,
}

pub fn harness(api: Arc<ScriptedApi>) -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let navigator = Arc::new(HistoryNavigator::new());
    let session = SessionStore::new();
    let ctx = FlowContext::new(api, storage.clone(), session.clone(), navigator.clone());
    Harness {
        ctx,
        storage,
        navigator,
        session,
    }
}

pub async fn stored_token(storage: &MemoryStorage) -> Option<String> {
    storage.get_item("token").await.unwrap()
}
