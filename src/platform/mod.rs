//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (touch, keyboard) mapped to commands
//! - Outcome page redirects
//! - Storage (LocalStorage on web)

pub mod input;
pub mod redirect;
pub mod storage;

pub use input::{InputAction, RawInput, actions_for};
pub use redirect::PendingRedirect;
