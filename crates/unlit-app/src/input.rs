use unlit_core::{AddressMode, Filter};

// ---------------------------------------------------------------------------
// Key: windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A keyboard key, independent of any windowing library.
///
/// `main.rs` maps `winit::keyboard::PhysicalKey` onto `Key`; everything else
/// in the input pipeline works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    F,
    M,
    W,
    N,
    R,
    Q,
    Escape,
}

// ---------------------------------------------------------------------------
// InputAction: what the app does in response to input
// ---------------------------------------------------------------------------

/// High-level action produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    CycleTexture,
    CycleFilter,
    CycleAddressMode,
    /// Grow the UV window so coordinates leave [0, 1].
    WidenWindow,
    NarrowWindow,
    ResetView,
    Quit,
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Translate a `Key` press into an `InputAction`, if the key is mapped.
    pub fn on_key(&self, key: Key) -> Option<InputAction> {
        match key {
            Key::Space => Some(InputAction::CycleTexture),
            Key::F => Some(InputAction::CycleFilter),
            Key::M => Some(InputAction::CycleAddressMode),
            Key::W => Some(InputAction::WidenWindow),
            Key::N => Some(InputAction::NarrowWindow),
            Key::R => Some(InputAction::ResetView),
            Key::Q | Key::Escape => Some(InputAction::Quit),
        }
    }
}

// ---------------------------------------------------------------------------
// Sampler state cycling (pure, testable)
// ---------------------------------------------------------------------------

pub fn next_filter(filter: Filter) -> Filter {
    match filter {
        Filter::Nearest => Filter::Linear,
        Filter::Linear => Filter::Nearest,
    }
}

pub fn next_address_mode(mode: AddressMode) -> AddressMode {
    match mode {
        AddressMode::ClampToEdge => AddressMode::Repeat,
        AddressMode::Repeat => AddressMode::MirrorRepeat,
        AddressMode::MirrorRepeat => AddressMode::ClampToEdge,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
