pub mod binding;
pub mod sampler;
pub mod stage;
pub mod texture;

pub use sampler::{AddressMode, Filter, Sampler};
pub use stage::unlit_fragment;
pub use texture::Texture2d;
