use gr_core::CoreError;
use gr_core::frame::{FrameBuffer, GridBuffer, PixelFormat};

/// Luma BT.601 entière (mêmes poids que la conversion gray d'ffmpeg).
///
/// # Example
/// ```
/// use gr_ascii::luminance::luma;
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(0, 0, 0), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

/// Convertit une frame brute en plan d'intensité mono-canal.
///
/// Gray frames are copied as-is; RGB/RGBA go through [`luma`] (alpha ignored).
///
/// # Errors
/// [`CoreError::MalformedFrame`] if the byte length does not match
/// `width × height × channels`.
///
/// # Example
/// ```
/// use gr_core::frame::{FrameBuffer, PixelFormat};
/// use gr_ascii::luminance::to_intensity;
/// let frame = FrameBuffer::from_raw(2, 1, PixelFormat::Rgb, vec![255, 255, 255, 0, 0, 0]);
/// let plane = to_intensity(&frame).unwrap();
/// assert_eq!(plane.data, vec![255, 0]);
/// ```
pub fn to_intensity(frame: &FrameBuffer) -> Result<GridBuffer, CoreError> {
    let expected = frame.expected_len();
    if frame.data.len() != expected {
        return Err(CoreError::MalformedFrame {
            expected,
            actual: frame.data.len(),
        });
    }

    let data = match frame.format {
        PixelFormat::Gray => frame.data.clone(),
        PixelFormat::Rgb | PixelFormat::Rgba => frame
            .data
            .chunks_exact(frame.format.channels())
            .map(|px| luma(px[0], px[1], px[2]))
            .collect(),
    };

    Ok(GridBuffer {
        data,
        width: frame.width,
        height: frame.height,
    })
}
