use std::time::Duration;

use crate::error::CoreError;
use crate::palette::{PALETTE_CLASSIC, Palette, preset};

/// Configuration de lecture. Chaque champ a une valeur par défaut saine.
///
/// Layered as defaults → CLI overrides → [`PlayerConfig::clamp_all`].
/// The numeric defaults are empirical tuning values, not physical constants.
///
/// # Example
/// ```
/// use gr_core::config::PlayerConfig;
/// use std::time::Duration;
/// let config = PlayerConfig::default();
/// assert_eq!(config.gif_cadence(), Duration::from_millis(70));
/// assert!((config.aspect_correction - 0.55).abs() < f32::EPSILON);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerConfig {
    /// Glyphes du plus sombre au plus clair, ou nom de preset
    /// (`classic`, `detailed`, `blocks`).
    pub palette: String,
    /// Correction du ratio des cellules terminal (hauteur / largeur).
    pub aspect_correction: f32,
    /// Cadence vidéo en images par seconde.
    pub video_fps: f64,
    /// Délai fixe entre deux images d'un GIF, en millisecondes.
    pub gif_delay_ms: u64,
    /// Largeur utilisée si la taille du terminal est inconnue.
    pub fallback_width: u32,
    /// Largeur maximale du flux brut demandé à ffmpeg.
    pub max_pipe_width: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            palette: PALETTE_CLASSIC.to_string(),
            aspect_correction: 0.55,
            video_fps: 30.0,
            gif_delay_ms: 70,
            fallback_width: 80,
            max_pipe_width: 640,
        }
    }
}

impl PlayerConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after CLI overrides are applied.
    pub fn clamp_all(&mut self) {
        self.aspect_correction = if self.aspect_correction.is_finite() {
            self.aspect_correction.clamp(0.1, 4.0)
        } else {
            0.55
        };
        self.video_fps = if self.video_fps.is_finite() {
            self.video_fps.clamp(1.0, 120.0)
        } else {
            30.0
        };
        self.gif_delay_ms = self.gif_delay_ms.clamp(1, 2_000);
        self.fallback_width = self.fallback_width.max(1);
        self.max_pipe_width = self.max_pipe_width.clamp(16, 3_840);
    }

    /// Délai entre deux frames vidéo.
    #[must_use]
    pub fn video_cadence(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.video_fps.max(1.0))
    }

    /// Délai entre deux frames GIF.
    #[must_use]
    pub fn gif_cadence(&self) -> Duration {
        Duration::from_millis(self.gif_delay_ms)
    }

    /// Construit la palette configurée (preset nommé ou glyphes littéraux).
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidPalette`] if the configured glyphs are too few.
    pub fn build_palette(&self) -> Result<Palette, CoreError> {
        Palette::new(preset(&self.palette).unwrap_or(self.palette.as_str()))
    }
}
