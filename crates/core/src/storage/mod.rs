//! Blob storage built on Apache OpenDAL.
//!
//! Uploads go to a single container, addressed by an Azure-style connection
//! string. The backend sits behind a trait so the wrapper can be driven by
//! an in-process store in tests and local runs.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ BlobStorage                                                  │
//! │   upload_buffer(bytes, name)  ──►  client().write(name, ..)  │
//! │   upload_local_file(path, name) ─► tokio::fs::read + above   │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Arc<dyn BlobBackend>  (built once, shared by every request)  │
//! │   OpendalBackend: Azblob │ Memory │ Fs                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod backend;
mod connection;
mod error;
mod service;

pub use backend::{BlobBackend, OpendalBackend, object_url};
pub use connection::{ConnectionString, DEVELOPMENT_ACCOUNT_NAME, DEVELOPMENT_STORAGE_PROXY_URI};
pub use error::StorageError;
pub use service::BlobStorage;
