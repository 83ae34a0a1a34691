use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use gr_core::CoreError;
use gr_core::frame::GridBuffer;

/// Nombre maximal de cellules d'une grille de sortie.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

/// Hauteur de grille pour une source `src_w × src_h` affichée sur `width` colonnes.
///
/// `max(1, round(src_h / src_w × width × aspect))`. `aspect` compense les
/// cellules terminal plus hautes que larges (0.55 par défaut).
///
/// # Example
/// ```
/// use gr_ascii::resize::target_height;
/// assert_eq!(target_height(1920, 1080, 80, 0.55), 25);
/// assert_eq!(target_height(1000, 1, 10, 0.55), 1);
/// ```
#[must_use]
pub fn target_height(src_w: u32, src_h: u32, width: u32, aspect: f32) -> u32 {
    let ratio = f64::from(src_h) / f64::from(src_w.max(1));
    let h = (ratio * f64::from(width) * f64::from(aspect)).round();
    (h as u32).max(1)
}

/// Resizer réutilisable wrappant fast_image_resize (filtre box = moyenne de zone).
///
/// # Example
/// ```
/// use gr_ascii::resize::GridResizer;
/// use gr_core::frame::GridBuffer;
/// let mut r = GridResizer::new(0.55);
/// let mut src = GridBuffer::new(100, 100);
/// let grid = r.resize(&mut src, 40).unwrap();
/// assert_eq!((grid.width, grid.height), (40, 22));
/// ```
pub struct GridResizer {
    inner: FirResizer,
    options: ResizeOptions,
    aspect: f32,
}

impl GridResizer {
    /// Create a resizer applying the given cell aspect correction.
    #[must_use]
    pub fn new(aspect: f32) -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box)),
            aspect,
        }
    }

    /// Resize an intensity plane to `width` columns and the corrected height.
    ///
    /// `src` is borrowed mutably because fast_image_resize requires `&mut` on
    /// the source slice; its content is not modified.
    ///
    /// # Errors
    /// [`CoreError::InvalidDimensions`] if the source or `width` is zero or the
    /// output would exceed [`MAX_GRID_CELLS`]; [`CoreError::Resize`] if the
    /// backend fails.
    pub fn resize(&mut self, src: &mut GridBuffer, width: u32) -> Result<GridBuffer, CoreError> {
        if src.width == 0 || src.height == 0 {
            return Err(CoreError::InvalidDimensions {
                width: src.width,
                height: src.height,
            });
        }
        if width == 0 {
            return Err(CoreError::InvalidDimensions { width, height: 0 });
        }

        let height = target_height(src.width, src.height, width, self.aspect);
        if u64::from(width) * u64::from(height) > MAX_GRID_CELLS {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        if src.width == width && src.height == height {
            return Ok(src.clone());
        }

        let mut out = vec![0u8; width as usize * height as usize];
        {
            let src_image =
                Image::from_slice_u8(src.width, src.height, &mut src.data, PixelType::U8)
                    .map_err(|e| CoreError::Resize(e.to_string()))?;
            let mut dst_image = Image::from_slice_u8(width, height, &mut out, PixelType::U8)
                .map_err(|e| CoreError::Resize(e.to_string()))?;
            self.inner
                .resize(&src_image, &mut dst_image, Some(&self.options))
                .map_err(|e| CoreError::Resize(e.to_string()))?;
        }

        Ok(GridBuffer {
            data: out,
            width,
            height,
        })
    }
}

impl Default for GridResizer {
    fn default() -> Self {
        Self::new(0.55)
    }
}
