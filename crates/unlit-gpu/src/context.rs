use wgpu::{Device, Instance, Queue};

use crate::error::RenderError;

pub struct GpuContext {
    pub instance: Instance,
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    /// Create a headless GPU context (no surface). Used for offscreen
    /// rendering and testing. A surface-aware variant is created by
    /// `unlit-app`.
    pub async fn new_headless() -> Self {
        Self::request_headless()
            .await
            .expect("failed to create headless GPU context")
    }

    /// Fallible variant of [`Self::new_headless`]. Returns
    /// [`RenderError::NoAdapter`] on machines without a usable GPU so
    /// callers can skip GPU work instead of panicking.
    pub async fn request_headless() -> Result<Self, RenderError> {
        let instance = Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        log::debug!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("unlit-gpu device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Self {
            instance,
            device,
            queue,
        })
    }
}
