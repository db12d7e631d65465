pub mod context;
pub mod error;
pub mod pipeline;
pub mod readback;
pub mod shader;
pub mod upload;

pub use context::GpuContext;
pub use error::RenderError;
pub use pipeline::{UnlitPipeline, UvWindow};
pub use readback::render_to_rgba8;
pub use shader::UNLIT_WGSL;
pub use upload::{create_sampler, upload_texture};
