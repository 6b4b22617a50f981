//! Output module: JSONL serialization and object storage upload.

pub mod jsonl;
mod uploader;

pub use uploader::{LocalDirStore, ObjectStore};
