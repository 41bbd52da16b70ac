pub mod pointer;
pub mod window;

pub use pointer::PointerTracker;
pub use window::{create_window, PlatformConfig};
