use crate::error::CoreError;
use crate::frame::FrameBuffer;

/// Fournit des frames au pipeline de lecture.
///
/// Implémenté par : `VideoReader`, `GifReader`. The playback loop only sees
/// this capability and treats both readers the same way.
///
/// # Example
/// ```
/// use gr_core::traits::FrameSource;
/// use gr_core::frame::FrameBuffer;
/// use gr_core::CoreError;
///
/// struct DummySource;
/// impl FrameSource for DummySource {
///     fn next_frame(&mut self) -> Option<&FrameBuffer> { None }
///     fn rewind(&mut self) -> Result<(), CoreError> { Ok(()) }
///     fn native_size(&self) -> (u32, u32) { (0, 0) }
/// }
/// ```
pub trait FrameSource {
    /// Retourne la prochaine frame.
    ///
    /// Retourne `None` si la passe courante est épuisée (fin de vidéo).
    /// Exhaustion is not an error: the caller rewinds and keeps going.
    fn next_frame(&mut self) -> Option<&FrameBuffer>;

    /// Restart from the first frame.
    ///
    /// # Errors
    /// Returns an error if the underlying media cannot be reopened.
    fn rewind(&mut self) -> Result<(), CoreError>;

    /// Dimensions natives de la source (avant resize).
    fn native_size(&self) -> (u32, u32);
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Option<&FrameBuffer> {
        (**self).next_frame()
    }

    fn rewind(&mut self) -> Result<(), CoreError> {
        (**self).rewind()
    }

    fn native_size(&self) -> (u32, u32) {
        (**self).native_size()
    }
}
