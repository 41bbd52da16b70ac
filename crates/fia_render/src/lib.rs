pub mod gpu_context;
pub mod hud;
pub mod scene_renderer;

pub use gpu_context::{GpuContext, RenderError};
pub use hud::Hud;
pub use scene_renderer::SceneRenderer;
