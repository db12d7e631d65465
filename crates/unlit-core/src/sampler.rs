use crate::texture::Texture2d;
use glam::{Vec2, Vec4};

// ---------------------------------------------------------------------------
// Filter / AddressMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

/// What a lookup outside [0, 1] resolves to, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

impl AddressMode {
    /// Maps an unbounded texel index onto [0, size).
    pub fn resolve(self, index: i64, size: u32) -> u32 {
        let n = i64::from(size);
        debug_assert!(n > 0);
        let resolved = match self {
            AddressMode::ClampToEdge => index.clamp(0, n - 1),
            AddressMode::Repeat => index.rem_euclid(n),
            AddressMode::MirrorRepeat => {
                // Fold every second period back on itself.
                let m = index.rem_euclid(2 * n);
                if m < n {
                    m
                } else {
                    2 * n - 1 - m
                }
            }
        };
        resolved as u32
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// Filtering and per-axis addressing configuration for texture lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
}

impl Sampler {
    pub fn nearest(address: AddressMode) -> Self {
        Self {
            filter: Filter::Nearest,
            address_u: address,
            address_v: address,
        }
    }

    pub fn linear(address: AddressMode) -> Self {
        Self {
            filter: Filter::Linear,
            address_u: address,
            address_v: address,
        }
    }

    /// Filtered lookup at `uv`; (0, 0) is the texture's top-left corner.
    /// Coordinates outside [0, 1] resolve through the address modes.
    pub fn sample(&self, texture: &Texture2d, uv: Vec2) -> Vec4 {
        match self.filter {
            Filter::Nearest => self.sample_nearest(texture, uv),
            Filter::Linear => self.sample_linear(texture, uv),
        }
    }

    fn sample_nearest(&self, texture: &Texture2d, uv: Vec2) -> Vec4 {
        let x = self
            .address_u
            .resolve(floor_index(uv.x, texture.width()), texture.width());
        let y = self
            .address_v
            .resolve(floor_index(uv.y, texture.height()), texture.height());
        texture.texel(x, y)
    }

    fn sample_linear(&self, texture: &Texture2d, uv: Vec2) -> Vec4 {
        // Texel centers sit at (i + 0.5) / size, so shift by half a texel
        // before taking the floor.
        let cx = uv.x * texture.width() as f32 - 0.5;
        let cy = uv.y * texture.height() as f32 - 0.5;
        let fx = cx - cx.floor();
        let fy = cy - cy.floor();
        let x0 = cx.floor() as i64;
        let y0 = cy.floor() as i64;

        let tap = |ix: i64, iy: i64| -> Vec4 {
            let x = self.address_u.resolve(ix, texture.width());
            let y = self.address_v.resolve(iy, texture.height());
            texture.texel(x, y)
        };

        let top = tap(x0, y0).lerp(tap(x0 + 1, y0), fx);
        let bottom = tap(x0, y0 + 1).lerp(tap(x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }
}

fn floor_index(coord: f32, size: u32) -> i64 {
    (coord * size as f32).floor() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
