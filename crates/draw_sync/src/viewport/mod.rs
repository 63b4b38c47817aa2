//! Viewer window adapter
//!
//! Ties a [`RenderEngine`](crate::render::RenderEngine) to a draw-set
//! synchronizer and maps mouse and keyboard gestures to camera operations.

mod navigation;
mod window;

pub use navigation::{Key, Modifiers, MouseButton, MouseButtons, NavigationController};
pub use window::Viewport;
