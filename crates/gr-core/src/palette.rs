use crate::error::CoreError;

/// 10 caractères, du plus sombre au plus clair.
pub const PALETTE_CLASSIC: &str = "@%#*+=-:. ";

/// 70 caractères (Paul Bourke), du plus dense au plus clair.
pub const PALETTE_DETAILED: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Blocs Unicode, du plein au vide.
pub const PALETTE_BLOCKS: &str = "█▓▒░ ";

/// Glyphes d'un preset nommé (`classic`, `detailed`, `blocks`), insensible à la casse.
///
/// # Example
/// ```
/// use gr_core::palette::{preset, PALETTE_BLOCKS};
/// assert_eq!(preset("Blocks"), Some(PALETTE_BLOCKS));
/// assert_eq!(preset("#. "), None);
/// ```
#[must_use]
pub fn preset(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "classic" => Some(PALETTE_CLASSIC),
        "detailed" => Some(PALETTE_DETAILED),
        "blocks" => Some(PALETTE_BLOCKS),
        _ => None,
    }
}

/// Ordered dark→light glyphs with a precomputed intensity lookup table.
///
/// Index for intensity `v` over `N` glyphs is `min(N - 1, v * N / 256)`, so
/// brighter pixels never map to an earlier (darker) glyph.
///
/// # Example
/// ```
/// use gr_core::palette::Palette;
/// let palette = Palette::new("@+: ").unwrap();
/// assert_eq!(palette.map(0), '@');
/// assert_eq!(palette.map(255), ' ');
/// assert_eq!(palette.map(128), ':');
/// ```
#[derive(Clone, Debug)]
pub struct Palette {
    glyphs: Vec<char>,
    lut: [char; 256],
}

impl Palette {
    /// Build a palette from glyphs ordered darkest→lightest.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPalette`] if `glyphs` has fewer than 2 characters.
    pub fn new(glyphs: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        let len = glyphs.len();
        if len < 2 {
            return Err(CoreError::InvalidPalette { len });
        }
        Ok(Self::build(glyphs))
    }

    fn build(glyphs: Vec<char>) -> Self {
        let mut lut = [' '; 256];
        for (v, slot) in lut.iter_mut().enumerate() {
            *slot = glyphs[Self::index_for(v, glyphs.len())];
        }
        Self { glyphs, lut }
    }

    #[inline(always)]
    fn index_for(v: usize, len: usize) -> usize {
        (v * len / 256).min(len - 1)
    }

    /// Map an intensity [0..255] to a glyph.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, intensity: u8) -> char {
        self.lut[intensity as usize]
    }

    /// Palette index chosen for `intensity`.
    ///
    /// # Example
    /// ```
    /// use gr_core::palette::{Palette, PALETTE_CLASSIC};
    /// let palette = Palette::new(PALETTE_CLASSIC).unwrap();
    /// assert_eq!(palette.index_of(0), 0);
    /// assert_eq!(palette.index_of(255), 9);
    /// ```
    #[inline]
    #[must_use]
    pub fn index_of(&self, intensity: u8) -> usize {
        Self::index_for(intensity as usize, self.glyphs.len())
    }

    /// Number of glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`: construction rejects short palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs, darkest first.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::build(PALETTE_CLASSIC.chars().collect())
    }
}
