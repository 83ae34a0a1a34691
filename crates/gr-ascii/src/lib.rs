/// Text conversion engine for glyphreel.
///
/// Converts pixel frames to palette-quantized text blocks.
pub mod luminance;
pub mod renderer;
pub mod resize;

pub use renderer::FrameRenderer;
