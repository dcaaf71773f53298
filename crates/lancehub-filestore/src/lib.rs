//! Profile image storage for LanceHub.
//!
//! One image per account. `ProfileImageStore` owns the on-disk
//! directory; `AssetManager` runs the delete-write-repoint
//! replacement sequence against the accounts store.

pub mod asset_manager;
pub mod error;
pub mod image_store;

pub use asset_manager::AssetManager;
pub use error::{FilestoreError, FilestoreResult};
pub use image_store::{sanitize_file_name, ProfileImageStore};
