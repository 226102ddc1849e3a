//! Blob storage core for Blobrelay.
//!
//! This crate contains the storage client wrapper with ZERO web dependencies.
//! The HTTP layer hands it bytes and an object name; it hands back a URL.
//!
//! # Modules
//!
//! - `storage` - Connection string parsing, backend seam, upload operations

pub mod storage;
