//! Stub storage backends for route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blobrelay_core::storage::{BlobBackend, BlobStorage, StorageError};
use blobrelay_shared::StorageSettings;
use bytes::Bytes;

use crate::AppState;

pub const CONTAINER_URL: &str = "https://relaydev.blob.core.windows.net/uploads";

/// Records every write; never fails.
#[derive(Default)]
pub struct RecordingBackend {
    writes: Mutex<Vec<(String, Bytes)>>,
}

impl RecordingBackend {
    pub fn writes(&self) -> Vec<(String, Bytes)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobBackend for RecordingBackend {
    fn container_url(&self) -> &str {
        CONTAINER_URL
    }

    async fn write(&self, name: &str, data: Bytes) -> Result<(), StorageError> {
        self.writes
            .lock()
            .unwrap()
            .push((name.to_string(), data));
        Ok(())
    }
}

/// Rejects every write the way an unauthorized account would.
pub struct FailingBackend;

#[async_trait]
impl BlobBackend for FailingBackend {
    fn container_url(&self) -> &str {
        CONTAINER_URL
    }

    async fn write(&self, _: &str, _: Bytes) -> Result<(), StorageError> {
        Err(StorageError::operation(
            "AuthorizationPermissionMismatch: This request is not authorized",
        ))
    }
}

fn settings() -> StorageSettings {
    StorageSettings::new("UseDevelopmentStorage=true", "uploads")
}

pub fn recording_state() -> (AppState, Arc<RecordingBackend>) {
    let backend = Arc::new(RecordingBackend::default());
    let storage = BlobStorage::with_backend(settings(), backend.clone());
    (AppState::new(storage), backend)
}

pub fn failing_state() -> AppState {
    AppState::new(BlobStorage::with_backend(settings(), Arc::new(FailingBackend)))
}
