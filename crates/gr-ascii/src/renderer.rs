use gr_core::frame::{FrameBuffer, TextFrame};
use gr_core::palette::Palette;

use crate::luminance::to_intensity;
use crate::resize::GridResizer;

/// Renderer frame → texte : luminance, redimensionnement, quantification.
///
/// Errors never escape: an absent or malformed frame becomes a one-line
/// sentinel block so playback keeps going.
///
/// # Example
/// ```
/// use gr_ascii::renderer::FrameRenderer;
/// use gr_core::frame::{FrameBuffer, PixelFormat};
/// use gr_core::palette::Palette;
///
/// let mut renderer = FrameRenderer::new(Palette::default(), 0.55);
/// let frame = FrameBuffer::new(64, 36, PixelFormat::Rgba);
/// let text = renderer.render(Some(&frame), 32);
/// assert_eq!(text.width(), 32);
/// assert_eq!(text.height(), 10);
/// ```
pub struct FrameRenderer {
    palette: Palette,
    resizer: GridResizer,
}

impl FrameRenderer {
    /// Create a renderer with an immutable palette and cell aspect correction.
    #[must_use]
    pub fn new(palette: Palette, aspect: f32) -> Self {
        Self {
            palette,
            resizer: GridResizer::new(aspect),
        }
    }

    /// Render `frame` on a grid of `width` columns.
    pub fn render(&mut self, frame: Option<&FrameBuffer>, width: u32) -> TextFrame {
        let Some(frame) = frame else {
            return TextFrame::error("Empty frame received");
        };

        let mut intensity = match to_intensity(frame) {
            Ok(plane) => plane,
            Err(e) => {
                log::debug!("Frame ignorée : {e}");
                return TextFrame::error(&format!("Failed to convert frame to grayscale: {e}"));
            }
        };

        let grid = match self.resizer.resize(&mut intensity, width) {
            Ok(grid) => grid,
            Err(e) => {
                log::debug!("Frame ignorée : {e}");
                return TextFrame::error(&format!("Failed to resize frame: {e}"));
            }
        };

        let lines = grid
            .rows()
            .map(|row| row.iter().map(|&v| self.palette.map(v)).collect())
            .collect();
        TextFrame::from_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_core::frame::PixelFormat;

    fn renderer(glyphs: &str) -> FrameRenderer {
        FrameRenderer::new(Palette::new(glyphs).unwrap(), 0.55)
    }

    #[test]
    fn missing_frame_yields_sentinel() {
        let text = renderer("@+: ").render(None, 10);
        assert!(text.is_sentinel());
        assert_eq!(text.to_string(), "[ERROR: Empty frame received]");
    }

    #[test]
    fn malformed_frame_yields_sentinel() {
        let frame = FrameBuffer::from_raw(4, 4, PixelFormat::Rgb, vec![0; 7]);
        let text = renderer("@+: ").render(Some(&frame), 10);
        assert!(text.is_sentinel());
        assert!(text.to_string().starts_with("[ERROR: Failed to convert frame to grayscale:"));
    }

    #[test]
    fn zero_sized_frame_yields_sentinel() {
        let frame = FrameBuffer::new(0, 0, PixelFormat::Gray);
        let text = renderer("@+: ").render(Some(&frame), 10);
        assert!(text.is_sentinel());
    }

    #[test]
    fn huge_width_yields_sentinel() {
        let frame = FrameBuffer::from_raw(1, 1, PixelFormat::Gray, vec![128]);
        let text = renderer("@+: ").render(Some(&frame), u32::MAX);
        assert!(text.is_sentinel());
        assert!(text.to_string().starts_with("[ERROR: Failed to resize frame:"));
    }

    #[test]
    fn two_by_two_scenario() {
        // [[0, 255], [128, 128]], palette "@+: "
        let frame = FrameBuffer::from_raw(2, 2, PixelFormat::Gray, vec![0, 255, 128, 128]);
        let text = renderer("@+: ").render(Some(&frame), 2);
        assert!(!text.is_sentinel());
        assert_eq!(text.height(), 1); // round(1 × 2 × 0.55)
        assert!(text.lines().iter().all(|l| l.chars().count() == 2));
        assert!(text.to_string().chars().all(|c| "@+: ".contains(c)));
    }

    #[test]
    fn extremes_map_to_palette_ends() {
        // 2 colonnes × 4 lignes → grille 2×2 (round(2 × 2 × 0.55) = 2)
        let frame = FrameBuffer::from_raw(
            2,
            4,
            PixelFormat::Gray,
            vec![0, 255, 0, 255, 255, 0, 255, 0],
        );
        let text = renderer("@+: ").render(Some(&frame), 2);
        assert_eq!(text.lines(), &["@ ".to_string(), " @".to_string()]);
    }

    #[test]
    fn color_frames_use_luma() {
        let mut frame = FrameBuffer::new(8, 8, PixelFormat::Rgba);
        for px in frame.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[255, 255, 255, 255]);
        }
        let text = renderer("@+: ").render(Some(&frame), 4);
        assert!(text.to_string().lines().all(|l| l == "    "));
    }

    #[test]
    fn rendering_is_idempotent() {
        let data: Vec<u8> = (0..40 * 30).map(|i| (i * 7 % 256) as u8).collect();
        let frame = FrameBuffer::from_raw(40, 30, PixelFormat::Gray, data);
        let mut r = renderer("@%#*+=-:. ");
        let first = r.render(Some(&frame), 17);
        let second = r.render(Some(&frame), 17);
        assert_eq!(first, second);
        let fresh = renderer("@%#*+=-:. ").render(Some(&frame), 17);
        assert_eq!(first, fresh);
    }
}
