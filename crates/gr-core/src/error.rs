use thiserror::Error;

/// Errors originating from the core pipeline (sources, resizer, palette).
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Palette with fewer than two glyphs.
    #[error("Palette invalide : au moins 2 caractères requis, {len} fourni(s)")]
    InvalidPalette {
        /// Number of glyphs supplied.
        len: usize,
    },

    /// Path missing, unreadable, or not a decodable container.
    #[error("Source indisponible : {path} ({reason})")]
    SourceUnavailable {
        /// Path that could not be opened.
        path: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Media opened but could not be decoded.
    #[error("Échec de décodage : {path} ({reason})")]
    DecodeFailure {
        /// Path of the media.
        path: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Unsupported file extension, rejected before any source is opened.
    #[error("Format non supporté : {format}. Utilisez .mp4, .avi, .mov, .mkv ou .gif")]
    UnsupportedFormat {
        /// The extension (or path) that is unsupported.
        format: String,
    },

    /// Pixel buffer whose length does not match its declared geometry.
    #[error("Buffer malformé : {expected} octets attendus, {actual} reçus")]
    MalformedFrame {
        /// Expected byte length.
        expected: usize,
        /// Actual byte length.
        actual: usize,
    },

    /// Resampling backend failure.
    #[error("Redimensionnement impossible : {0}")]
    Resize(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::SourceUnavailable`].
    pub fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for [`CoreError::DecodeFailure`].
    pub fn decode(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::DecodeFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
