use glam::Vec4;

// ---------------------------------------------------------------------------
// Texture2d: an owned RGBA texel grid, row 0 at the top (v = 0)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Texture2d {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl Texture2d {
    /// Row-major texels, row 0 first. Panics if the count doesn't match the
    /// dimensions or a dimension is zero.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Vec4>) -> Self {
        assert!(
            width > 0 && height > 0,
            "texture dimensions must be non-zero"
        );
        assert_eq!(
            texels.len(),
            (width * height) as usize,
            "texel count must match width * height"
        );
        Self {
            width,
            height,
            texels,
        }
    }

    /// Builds a texture by evaluating `f` at every texel coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Vec4) -> Self {
        let mut texels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self::from_texels(width, height, texels)
    }

    /// 1×1 texture holding a single color.
    pub fn solid(color: Vec4) -> Self {
        Self::from_texels(1, 1, vec![color])
    }

    /// Alternating `a`/`b` grid; (0, 0) gets `a`.
    pub fn checkerboard(width: u32, height: u32, a: Vec4, b: Vec4) -> Self {
        Self::from_fn(width, height, |x, y| if (x + y) % 2 == 0 { a } else { b })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at (x, y); x runs left to right, y runs top to bottom.
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        debug_assert!(x < self.width && y < self.height);
        self.texels[(y * self.width + x) as usize]
    }

    /// Row-major texel slice, row 0 first.
    pub fn texels(&self) -> &[Vec4] {
        &self.texels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
