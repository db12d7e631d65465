use thiserror::Error;

/// Host-side failures. The shading stage itself has no error paths; these
/// cover device acquisition and readback plumbing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("device polling ended before the readback completed")]
    ReadbackInterrupted,
}
