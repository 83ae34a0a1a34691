/// Configuration, types, and shared structures for glyphreel.
///
/// This crate contains the frame types, the glyph palette, the cancellation
/// token and the source trait shared across the glyphreel workspace.

pub mod cancel;
pub mod config;
pub mod error;
pub mod frame;
pub mod palette;
pub mod traits;

pub use cancel::CancelToken;
pub use config::PlayerConfig;
pub use error::CoreError;
pub use frame::{FrameBuffer, GridBuffer, PixelFormat, TextFrame};
pub use palette::Palette;
pub use traits::FrameSource;
