//! Rendering module
//!
//! Builds a backend-neutral draw list from the game state and replays it on a
//! 2D canvas in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, Scene};
