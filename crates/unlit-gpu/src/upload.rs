use glam::Vec4;
use unlit_core::{AddressMode, Filter, Sampler, Texture2d};
use wgpu::{Device, Queue};

// ---------------------------------------------------------------------------
// CPU texture / sampler state onto the GPU
// ---------------------------------------------------------------------------

/// Pack texels into tightly packed RGBA8 bytes, row 0 first.
/// Values outside [0, 1] saturate.
pub fn texels_to_rgba8(texture: &Texture2d) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(texture.texels().len() * 4);
    for texel in texture.texels() {
        let v = (texel.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
        bytes.extend_from_slice(&[v.x as u8, v.y as u8, v.z as u8, v.w as u8]);
    }
    bytes
}

/// Upload a texture as `Rgba8Unorm`. The format is linear, not sRGB, so the
/// bytes reach the shader untransformed (51 reads back as exactly 0.2).
pub fn upload_texture(device: &Device, queue: &Queue, texture: &Texture2d) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: texture.width(),
        height: texture.height(),
        depth_or_array_layers: 1,
    };
    let gpu_tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("unlit_color"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &gpu_tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &texels_to_rgba8(texture),
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * texture.width()),
            rows_per_image: Some(texture.height()),
        },
        size,
    );

    gpu_tex
}

/// Create the wgpu sampler matching a [`Sampler`] configuration.
pub fn create_sampler(device: &Device, sampler: &Sampler) -> wgpu::Sampler {
    let filter = match sampler.filter {
        Filter::Nearest => wgpu::FilterMode::Nearest,
        Filter::Linear => wgpu::FilterMode::Linear,
    };
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("unlit_sampler"),
        mag_filter: filter,
        min_filter: filter,
        address_mode_u: address_mode(sampler.address_u),
        address_mode_v: address_mode(sampler.address_v),
        ..Default::default()
    })
}

fn address_mode(mode: AddressMode) -> wgpu::AddressMode {
    match mode {
        AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        AddressMode::Repeat => wgpu::AddressMode::Repeat,
        AddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec4;

    #[test]
    fn rgba8_packing_is_exact_for_fifths() {
        // 0.2 * 255 = 51, 0.4 * 255 = 102, 0.6 * 255 = 153
        let t = Texture2d::solid(vec4(0.2, 0.4, 0.6, 0.0));
        assert_eq!(texels_to_rgba8(&t), vec![51, 102, 153, 0]);
    }

    #[test]
    fn rgba8_packing_saturates_out_of_range_values() {
        let t = Texture2d::solid(vec4(2.5, -0.25, 1.0, 1.0));
        assert_eq!(texels_to_rgba8(&t), vec![255, 0, 255, 255]);
    }

    #[test]
    fn rgba8_packing_is_row_major_top_first() {
        let t = Texture2d::from_texels(
            2,
            2,
            vec![
                vec4(1.0, 0.0, 0.0, 1.0),
                vec4(0.0, 1.0, 0.0, 1.0),
                vec4(0.0, 0.0, 1.0, 1.0),
                vec4(0.0, 0.0, 0.0, 1.0),
            ],
        );
        let bytes = texels_to_rgba8(&t);
        assert_eq!(&bytes[0..4], &[255, 0, 0, 255]); // (0, 0)
        assert_eq!(&bytes[4..8], &[0, 255, 0, 255]); // (1, 0)
        assert_eq!(&bytes[8..12], &[0, 0, 255, 255]); // (0, 1)
    }
}
