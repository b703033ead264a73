//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard state)
//! - Storage (LocalStorage on web, files on native)

pub mod input;
pub mod storage;

pub use input::{KeyCommand, KeyboardState};
pub use storage::{MemoryStorage, Storage, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
