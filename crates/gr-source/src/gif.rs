use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use gr_core::CoreError;
use gr_core::frame::{FrameBuffer, PixelFormat};
use gr_core::traits::FrameSource;
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

/// Source GIF animé : toutes les frames sont décodées à l'ouverture.
///
/// `next_frame` parcourt la séquence en boucle (index modulo N), donc la
/// source ne signale jamais d'épuisement.
///
/// # Example
/// ```
/// use gr_core::frame::{FrameBuffer, PixelFormat};
/// use gr_core::traits::FrameSource;
/// use gr_source::gif::GifReader;
///
/// let frames = vec![FrameBuffer::new(2, 2, PixelFormat::Rgba); 3];
/// let mut reader = GifReader::from_frames(frames, "demo.gif").unwrap();
/// for _ in 0..10 {
///     assert!(reader.next_frame().is_some());
/// }
/// ```
pub struct GifReader {
    frames: Vec<FrameBuffer>,
    cursor: usize,
}

impl GifReader {
    /// Décode entièrement le GIF `path` en frames RGBA.
    ///
    /// # Errors
    /// [`CoreError::SourceUnavailable`] if the file cannot be opened or is not a
    /// GIF; [`CoreError::DecodeFailure`] if a frame cannot be decoded or the
    /// animation holds no frame.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| CoreError::unavailable(display.as_str(), e))?;
        let decoder = GifDecoder::new(BufReader::new(file))
            .map_err(|e| CoreError::unavailable(display.as_str(), e))?;

        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| CoreError::decode(display.as_str(), e))?
            .into_iter()
            .map(|frame| {
                let rgba = frame.into_buffer();
                let (width, height) = rgba.dimensions();
                FrameBuffer::from_raw(width, height, PixelFormat::Rgba, rgba.into_raw())
            })
            .collect();

        let reader = Self::from_frames(frames, &display)?;
        let (w, h) = reader.native_size();
        log::info!("GIF chargé : {} frames {w}x{h} ({display})", reader.len());
        Ok(reader)
    }

    /// Build a reader over already-decoded frames.
    ///
    /// # Errors
    /// [`CoreError::DecodeFailure`] if `frames` is empty.
    pub fn from_frames(frames: Vec<FrameBuffer>, label: &str) -> Result<Self, CoreError> {
        if frames.is_empty() {
            return Err(CoreError::decode(label, "aucune frame décodée"));
        }
        Ok(Self { frames, cursor: 0 })
    }

    /// Number of decoded frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: construction rejects empty sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for GifReader {
    fn next_frame(&mut self) -> Option<&FrameBuffer> {
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.frames.len().max(1);
        self.frames.get(idx)
    }

    fn rewind(&mut self) -> Result<(), CoreError> {
        self.cursor = 0;
        Ok(())
    }

    fn native_size(&self) -> (u32, u32) {
        self.frames.first().map_or((0, 0), |f| (f.width, f.height))
    }
}
