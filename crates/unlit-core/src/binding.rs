// ---------------------------------------------------------------------------
// Binding contract: the fixed indices shared by the WGSL source, the host
// pipeline layout, and the reflection tests. Group 0 is host territory;
// group 1 carries the two material resources and nothing else.
// ---------------------------------------------------------------------------

/// Vertex-output / fragment-input location carrying the interpolated UV.
pub const UV_LOCATION: u32 = 0;

/// Fragment output location the final color is written to.
pub const COLOR_TARGET_LOCATION: u32 = 0;

/// Bind group holding the material resources.
pub const MATERIAL_GROUP: u32 = 1;

/// Binding of the sampled 2D color texture inside [`MATERIAL_GROUP`].
pub const TEXTURE_BINDING: u32 = 0;

/// Binding of the sampler inside [`MATERIAL_GROUP`].
pub const SAMPLER_BINDING: u32 = 1;
