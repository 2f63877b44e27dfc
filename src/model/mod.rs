//! Model loading and saving
//!
//! Strings-in/strings-out serialization of entity models with validation on
//! load. Transport and storage stay with the caller.

pub mod loader;
pub mod saver;

pub use loader::{ModelLoadError, ModelLoader};
pub use saver::{ModelSaveError, ModelSaver};
