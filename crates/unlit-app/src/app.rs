use std::sync::Arc;

use glam::vec4;
use unlit_core::{AddressMode, Sampler, Texture2d};
use unlit_gpu::{
    pipeline::{UnlitPipeline, UvWindow},
    upload::{create_sampler, upload_texture},
};
use winit::window::Window;

use crate::input::{next_address_mode, next_filter, InputAction, InputState, Key};

/// Each widen/narrow press scales the UV window by this much.
const WINDOW_SCALE_STEP: f32 = 1.5;

struct DemoTexture {
    name: &'static str,
    view: wgpu::TextureView,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,

    pipeline: UnlitPipeline,

    // Viewer state: which texture is bound, through which sampler, and the
    // UV range the quad feeds the fragment stage
    textures: Vec<DemoTexture>,
    current_texture: usize,
    sampler: Sampler,
    uv_window: UvWindow,
    material: wgpu::BindGroup,

    input: InputState,
}

impl App {
    /// Initialise wgpu for a given window.  The window is wrapped in `Arc` so
    /// that the surface can safely hold a `'static` reference to it.
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // ---- Instance -------------------------------------------------------
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // ---- Surface --------------------------------------------------------
        let surface = instance
            .create_surface(Arc::clone(&window))
            .expect("failed to create wgpu surface");

        // ---- Adapter --------------------------------------------------------
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("no suitable GPU adapter found");

        log::info!("GPU adapter: {}", adapter.get_info().name);

        // ---- Device & Queue -------------------------------------------------
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("unlit-app device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("failed to create GPU device");

        // ---- Surface configuration ------------------------------------------
        let surface_caps = surface.get_capabilities(&adapter);

        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}×{} {:?} Fifo",
            surface_config.width,
            surface_config.height,
            format
        );

        // ---- Pipeline + demo material ----------------------------------------
        let pipeline = UnlitPipeline::new(&device, format);
        let textures = Self::build_demo_textures(&device, &queue);
        let sampler = Sampler::nearest(AddressMode::ClampToEdge);
        let gpu_sampler = create_sampler(&device, &sampler);
        let material = pipeline.bind_material(&device, &textures[0].view, &gpu_sampler);

        log::info!("Showing '{}' with {:?}", textures[0].name, sampler);

        Self {
            surface,
            device,
            queue,
            surface_config,
            pipeline,
            textures,
            current_texture: 0,
            sampler,
            uv_window: UvWindow::IDENTITY,
            material,
            input: InputState::new(),
        }
    }

    /// A few procedurally built textures that make the stage's behavior
    /// visible: hard texel edges, a smooth ramp, and a fully transparent
    /// source that still comes out opaque.
    fn build_demo_textures(device: &wgpu::Device, queue: &wgpu::Queue) -> Vec<DemoTexture> {
        let checker = Texture2d::checkerboard(
            8,
            8,
            vec4(1.0, 1.0, 1.0, 1.0),
            vec4(0.1, 0.1, 0.1, 1.0),
        );
        let ramp = Texture2d::from_fn(256, 256, |x, y| {
            vec4(x as f32 / 255.0, y as f32 / 255.0, 0.5, 1.0)
        });
        let glass = Texture2d::solid(vec4(0.2, 0.4, 0.6, 0.0));

        [("checker", checker), ("ramp", ramp), ("glass", glass)]
            .into_iter()
            .map(|(name, texture)| DemoTexture {
                name,
                view: upload_texture(device, queue, &texture).create_view(&Default::default()),
            })
            .collect()
    }

    fn rebuild_material(&mut self) {
        let gpu_sampler = create_sampler(&self.device, &self.sampler);
        self.material = self.pipeline.bind_material(
            &self.device,
            &self.textures[self.current_texture].view,
            &gpu_sampler,
        );
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Reconfigure the surface. Nothing else depends on the window size.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.surface.configure(&self.device, &self.surface_config);

        log::debug!("Surface resized to {}×{}", new_width, new_height);
    }

    // -------------------------------------------------------------------------
    // Input, called by main.rs window_event handler
    // -------------------------------------------------------------------------

    /// Translate a key press and return the resulting action, if any.
    pub fn on_key_pressed(&self, key: Key) -> Option<InputAction> {
        self.input.on_key(key)
    }

    /// Apply an action to the viewer state.
    ///
    /// Returns `true` if the app should exit (i.e. action was `Quit`).
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::CycleTexture => {
                self.current_texture = (self.current_texture + 1) % self.textures.len();
                log::info!("Texture: {}", self.textures[self.current_texture].name);
                self.rebuild_material();
            }

            InputAction::CycleFilter => {
                self.sampler.filter = next_filter(self.sampler.filter);
                log::info!("Filter: {:?}", self.sampler.filter);
                self.rebuild_material();
            }

            InputAction::CycleAddressMode => {
                let mode = next_address_mode(self.sampler.address_u);
                self.sampler.address_u = mode;
                self.sampler.address_v = mode;
                log::info!("Address mode: {mode:?}");
                self.rebuild_material();
            }

            InputAction::WidenWindow => {
                self.uv_window = self.uv_window.scaled(WINDOW_SCALE_STEP);
                log::debug!("UV window: {:?}", self.uv_window);
                self.pipeline.set_uv_window(&self.queue, self.uv_window);
            }

            InputAction::NarrowWindow => {
                self.uv_window = self.uv_window.scaled(1.0 / WINDOW_SCALE_STEP);
                log::debug!("UV window: {:?}", self.uv_window);
                self.pipeline.set_uv_window(&self.queue, self.uv_window);
            }

            InputAction::ResetView => {
                self.uv_window = UvWindow::IDENTITY;
                log::info!("UV window reset");
                self.pipeline.set_uv_window(&self.queue, self.uv_window);
            }

            InputAction::Quit => return true,
        }
        false
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Draw the textured quad to the surface.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        self.pipeline
            .encode(&mut encoder, &surface_view, &self.material);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
