use std::fmt;

/// Layout of one pixel inside a [`FrameBuffer`].
///
/// # Example
/// ```
/// use gr_core::frame::PixelFormat;
/// assert_eq!(PixelFormat::Rgba.channels(), 4);
/// assert_eq!(PixelFormat::Gray.channels(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single-channel intensity.
    Gray,
    /// RGB, 3 bytes par pixel.
    Rgb,
    /// RGBA, 4 bytes par pixel (alpha ignoré pour la luminance).
    Rgba,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    #[inline]
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Frame brute produite par une source. Row-major, sans padding.
///
/// Owned by the source that produced it; the renderer only borrows it.
///
/// # Example
/// ```
/// use gr_core::frame::{FrameBuffer, PixelFormat};
/// let fb = FrameBuffer::new(10, 10, PixelFormat::Rgba);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixel bytes, row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout of `data`.
    pub format: PixelFormat,
}

impl FrameBuffer {
    /// Crée un buffer noir aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * format.channels()],
            width,
            height,
            format,
        }
    }

    /// Wraps existing bytes without validating their length.
    ///
    /// Validation happens when the frame is converted to intensity, so a
    /// malformed buffer degrades into a visible error block instead of a panic.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /// Byte length implied by `width × height × channels`.
    ///
    /// # Example
    /// ```
    /// use gr_core::frame::{FrameBuffer, PixelFormat};
    /// let fb = FrameBuffer::from_raw(2, 3, PixelFormat::Rgb, vec![]);
    /// assert_eq!(fb.expected_len(), 18);
    /// ```
    #[inline]
    #[must_use]
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.channels()
    }
}

/// Plan d'intensité mono-canal (entrée et sortie du redimensionnement).
///
/// # Example
/// ```
/// use gr_core::frame::GridBuffer;
/// let grid = GridBuffer::new(80, 24);
/// assert_eq!(grid.data.len(), 80 * 24);
/// assert_eq!(grid.rows().count(), 24);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBuffer {
    /// Intensities, row-major, one byte per cell.
    pub data: Vec<u8>,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl GridBuffer {
    /// Crée une grille à zéro.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width.max(1) as usize)
    }
}

/// Bloc de texte prêt à afficher : une `String` par ligne de la grille.
///
/// # Example
/// ```
/// use gr_core::frame::TextFrame;
/// let frame = TextFrame::from_lines(vec!["@@".into(), "..".into()]);
/// assert_eq!(frame.height(), 2);
/// assert_eq!(frame.width(), 2);
/// assert_eq!(frame.to_string(), "@@\n..");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFrame {
    lines: Vec<String>,
    sentinel: bool,
}

impl TextFrame {
    /// Build a frame from rendered rows.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            sentinel: false,
        }
    }

    /// Sentinel block shown in place of a frame that could not be rendered.
    ///
    /// # Example
    /// ```
    /// use gr_core::frame::TextFrame;
    /// let frame = TextFrame::error("Empty frame received");
    /// assert!(frame.is_sentinel());
    /// assert_eq!(frame.to_string(), "[ERROR: Empty frame received]");
    /// ```
    #[must_use]
    pub fn error(message: &str) -> Self {
        Self {
            lines: vec![format!("[ERROR: {message}]")],
            sentinel: true,
        }
    }

    /// Rows of the frame.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Width in characters of the first row (all rows share it).
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines.first().map_or(0, |l| l.chars().count())
    }

    /// `true` si ce bloc remplace une frame en erreur.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
