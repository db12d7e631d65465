use unlit_core::{Sampler, Texture2d};

use crate::context::GpuContext;
use crate::error::RenderError;
use crate::pipeline::{UnlitPipeline, UvWindow};
use crate::upload::{create_sampler, upload_texture};

// ---------------------------------------------------------------------------
// One-shot offscreen render + readback
// ---------------------------------------------------------------------------

/// Render the quad once into an offscreen `width`×`height` `Rgba8Unorm`
/// target and read the result back as tightly packed RGBA rows, row 0 at the
/// top. The target format is linear, so a texel uploaded as byte 51 that the
/// shader passes through unchanged reads back as byte 51.
pub fn render_to_rgba8(
    ctx: &GpuContext,
    texture: &Texture2d,
    sampler: &Sampler,
    window: UvWindow,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, RenderError> {
    let device = &ctx.device;
    let queue = &ctx.queue;

    let pipeline = UnlitPipeline::new(device, wgpu::TextureFormat::Rgba8Unorm);
    pipeline.set_uv_window(queue, window);

    let gpu_tex = upload_texture(device, queue, texture);
    let view = gpu_tex.create_view(&Default::default());
    let gpu_sampler = create_sampler(device, sampler);
    let material = pipeline.bind_material(device, &view, &gpu_sampler);

    // --- offscreen target ----------------------------------------------------
    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("unlit_target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let target_view = target.create_view(&Default::default());

    // --- draw, then copy out ----------------------------------------------------
    // Texture-to-buffer copies need 256-byte row alignment.
    let unpadded = 4 * width;
    let padded = unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
        * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("unlit_readback"),
        size: u64::from(padded) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("unlit_readback_encoder"),
    });
    pipeline.encode(&mut encoder, &target_view, &material);
    encoder.copy_texture_to_buffer(
        wgpu::ImageCopyTexture {
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::ImageCopyBuffer {
            buffer: &readback,
            layout: wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    // --- map and strip the row padding -----------------------------------------
    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::Maintain::Wait);
    rx.recv().map_err(|_| RenderError::ReadbackInterrupted)??;

    let data = slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((unpadded * height) as usize);
    for row in data.chunks(padded as usize) {
        pixels.extend_from_slice(&row[..unpadded as usize]);
    }
    drop(data);
    readback.unmap();

    Ok(pixels)
}

// ---------------------------------------------------------------------------
// Tests: need a GPU; each test skips itself when no adapter is available
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{vec2, vec4, Vec4};
    use unlit_core::{unlit_fragment, AddressMode};

    const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

    fn context() -> Option<GpuContext> {
        match pollster::block_on(GpuContext::request_headless()) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                eprintln!("skipping GPU test: {err}");
                None
            }
        }
    }

    fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn transparent_source_renders_opaque() {
        let Some(ctx) = context() else { return };
        // 0.2 / 0.4 / 0.6 are exact in unorm8: 51 / 102 / 153
        let texture = Texture2d::solid(vec4(0.2, 0.4, 0.6, 0.0));
        let sampler = Sampler::nearest(AddressMode::ClampToEdge);
        let pixels =
            render_to_rgba8(&ctx, &texture, &sampler, UvWindow::IDENTITY, 4, 4).expect("render");
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(pixel(&pixels, 4, x, y), [51, 102, 153, 255], "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn checkerboard_maps_one_to_one() {
        let Some(ctx) = context() else { return };
        let texture = Texture2d::checkerboard(2, 2, WHITE, BLACK);
        let sampler = Sampler::nearest(AddressMode::ClampToEdge);
        let pixels =
            render_to_rgba8(&ctx, &texture, &sampler, UvWindow::IDENTITY, 2, 2).expect("render");
        // top row white|black, bottom row black|white
        assert_eq!(pixel(&pixels, 2, 0, 0), [255, 255, 255, 255]);
        assert_eq!(pixel(&pixels, 2, 1, 0), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixels, 2, 0, 1), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixels, 2, 1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn repeat_window_equals_wrapped_lookup() {
        let Some(ctx) = context() else { return };
        let texture = Texture2d::checkerboard(2, 2, WHITE, BLACK);
        let sampler = Sampler::nearest(AddressMode::Repeat);
        // (1.5, -0.5) wraps onto the same texel as (0.5, 0.5)
        let wrapped = render_to_rgba8(&ctx, &texture, &sampler, UvWindow::pinned(1.5, -0.5), 1, 1)
            .expect("render");
        let direct = render_to_rgba8(&ctx, &texture, &sampler, UvWindow::pinned(0.5, 0.5), 1, 1)
            .expect("render");
        assert_eq!(wrapped, direct);
        assert_eq!(wrapped[3], 255);
    }

    #[test]
    fn clamp_window_pins_to_edge_texel() {
        let Some(ctx) = context() else { return };
        // four distinct texels, all exact in unorm8
        let texture = Texture2d::from_texels(
            2,
            2,
            vec![
                vec4(0.2, 0.0, 0.0, 0.0),
                vec4(0.4, 0.0, 0.0, 0.0),
                vec4(0.6, 0.0, 0.0, 0.0),
                vec4(0.8, 0.0, 0.0, 0.0),
            ],
        );
        let sampler = Sampler::nearest(AddressMode::ClampToEdge);
        // u > 1 pins to the right column, v < 0 pins to the top row: texel (1, 0)
        let pixels = render_to_rgba8(&ctx, &texture, &sampler, UvWindow::pinned(1.5, -0.5), 1, 1)
            .expect("render");
        assert_eq!(&pixels[..], &[102, 0, 0, 255]);
    }

    #[test]
    fn linear_filtering_matches_cpu_reference() {
        let Some(ctx) = context() else { return };
        let texture = Texture2d::checkerboard(2, 2, WHITE, BLACK);
        let sampler = Sampler::linear(AddressMode::ClampToEdge);
        let pixels =
            render_to_rgba8(&ctx, &texture, &sampler, UvWindow::IDENTITY, 8, 8).expect("render");

        for y in 0..8u32 {
            for x in 0..8u32 {
                // identity window puts pixel centers at ((x+0.5)/8, (y+0.5)/8)
                let uv = vec2((x as f32 + 0.5) / 8.0, (y as f32 + 0.5) / 8.0);
                let want = unlit_fragment(&texture, &sampler, uv);
                let want = (want.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
                let got = pixel(&pixels, 8, x, y);
                for c in 0..4 {
                    let delta = (f32::from(got[c]) - want[c]).abs();
                    // GPU bilinear weights are fixed-point; allow a small gap
                    assert!(delta <= 4.0, "channel {c} at ({x}, {y}): {got:?} vs {want}");
                }
            }
        }
    }
}
