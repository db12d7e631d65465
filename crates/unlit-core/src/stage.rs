use crate::sampler::Sampler;
use crate::texture::Texture2d;
use glam::{Vec2, Vec4};

// ---------------------------------------------------------------------------
// The fragment stage: one filtered lookup, rgb passed through, alpha pinned
// ---------------------------------------------------------------------------

/// Shades one fragment: samples `texture` through `sampler` at `uv` and
/// returns the sampled rgb with alpha forced to 1.0. The source alpha is
/// dropped, not blended. No clamping happens here; out-of-range coordinates
/// are the sampler's business.
pub fn unlit_fragment(texture: &Texture2d, sampler: &Sampler, uv: Vec2) -> Vec4 {
    sampler.sample(texture, uv).truncate().extend(1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{AddressMode, Filter};
    use glam::{vec2, vec4};

    const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

    fn assert_vec4_eq(a: Vec4, b: Vec4) {
        assert!((a - b).abs().max_element() < 1e-5, "got {a}, want {b}");
    }

    // --- Alpha ------------------------------------------------------------------

    #[test]
    fn alpha_is_exactly_one_for_opaque_source() {
        let t = Texture2d::solid(vec4(0.5, 0.5, 0.5, 1.0));
        let s = Sampler::nearest(AddressMode::ClampToEdge);
        assert_eq!(unlit_fragment(&t, &s, vec2(0.5, 0.5)).w, 1.0);
    }

    #[test]
    fn alpha_is_exactly_one_for_transparent_source() {
        // Source alpha 0 is dropped, not multiplied through
        let t = Texture2d::solid(vec4(0.2, 0.4, 0.6, 0.0));
        let s = Sampler::nearest(AddressMode::ClampToEdge);
        let out = unlit_fragment(&t, &s, vec2(0.5, 0.5));
        assert_vec4_eq(out, vec4(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn alpha_is_one_across_filters_modes_and_coordinates() {
        let t = Texture2d::checkerboard(4, 4, vec4(1.0, 0.0, 0.0, 0.3), vec4(0.0, 1.0, 0.0, 0.7));
        let uvs = [
            vec2(0.0, 0.0),
            vec2(0.5, 0.5),
            vec2(1.0, 1.0),
            vec2(-3.2, 7.9),
            vec2(100.0, -100.0),
        ];
        for filter in [Filter::Nearest, Filter::Linear] {
            for mode in [
                AddressMode::ClampToEdge,
                AddressMode::Repeat,
                AddressMode::MirrorRepeat,
            ] {
                let s = Sampler {
                    filter,
                    address_u: mode,
                    address_v: mode,
                };
                for uv in uvs {
                    let out = unlit_fragment(&t, &s, uv);
                    assert_eq!(out.w, 1.0, "alpha leaked at {uv} with {s:?}");
                }
            }
        }
    }

    // --- RGB passthrough --------------------------------------------------------

    #[test]
    fn rgb_matches_raw_lookup() {
        let t = Texture2d::checkerboard(2, 2, vec4(0.9, 0.1, 0.4, 0.5), vec4(0.2, 0.8, 0.3, 0.9));
        let s = Sampler::linear(AddressMode::Repeat);
        let uv = vec2(0.63, 0.37);
        let raw = s.sample(&t, uv);
        let out = unlit_fragment(&t, &s, uv);
        assert_vec4_eq(out, raw.truncate().extend(1.0));
    }

    #[test]
    fn rgb_outside_display_range_passes_through() {
        // No tone mapping, no clamping of the color values themselves
        let t = Texture2d::solid(vec4(2.5, -0.25, 0.0, 0.5));
        let s = Sampler::nearest(AddressMode::ClampToEdge);
        assert_vec4_eq(
            unlit_fragment(&t, &s, vec2(0.5, 0.5)),
            vec4(2.5, -0.25, 0.0, 1.0),
        );
    }

    // --- Purity -----------------------------------------------------------------

    #[test]
    fn same_inputs_produce_same_output() {
        let t = Texture2d::checkerboard(3, 3, WHITE, BLACK);
        let s = Sampler::linear(AddressMode::MirrorRepeat);
        let uv = vec2(1.7, -2.3);
        let first = unlit_fragment(&t, &s, uv);
        let second = unlit_fragment(&t, &s, uv);
        assert_eq!(first, second);
    }

    // --- Scenarios ----------------------------------------------------------------

    #[test]
    fn one_by_one_transparent_texture_shades_opaque() {
        let t = Texture2d::solid(vec4(0.2, 0.4, 0.6, 0.0));
        let s = Sampler::nearest(AddressMode::Repeat);
        assert_vec4_eq(
            unlit_fragment(&t, &s, vec2(0.5, 0.5)),
            vec4(0.2, 0.4, 0.6, 1.0),
        );
    }

    #[test]
    fn checkerboard_corner_lookup_hits_corner_texel() {
        let t = Texture2d::checkerboard(2, 2, WHITE, BLACK);
        let s = Sampler::nearest(AddressMode::ClampToEdge);
        assert_vec4_eq(unlit_fragment(&t, &s, vec2(0.01, 0.01)), WHITE);
    }

    #[test]
    fn repeat_mode_wraps_like_an_in_range_lookup() {
        let t = Texture2d::checkerboard(2, 2, WHITE, BLACK);
        let s = Sampler::nearest(AddressMode::Repeat);
        let wrapped = unlit_fragment(&t, &s, vec2(1.5, -0.5));
        let direct = unlit_fragment(&t, &s, vec2(0.5, 0.5));
        assert_vec4_eq(wrapped, direct);
        assert_eq!(wrapped.w, 1.0);
    }

    #[test]
    fn clamp_mode_shades_edge_texel_for_out_of_range_uv() {
        let t = Texture2d::from_texels(
            2,
            2,
            vec![
                vec4(0.1, 0.0, 0.0, 0.0),
                vec4(0.2, 0.0, 0.0, 0.0),
                vec4(0.3, 0.0, 0.0, 0.0),
                vec4(0.4, 0.0, 0.0, 0.0),
            ],
        );
        let s = Sampler::nearest(AddressMode::ClampToEdge);
        let out = unlit_fragment(&t, &s, vec2(1.5, -0.5));
        let edge = t.texel(1, 0);
        assert_vec4_eq(out, vec4(edge.x, edge.y, edge.z, 1.0));
    }
}
