use std::path::Path;
use std::time::Duration;

use gr_core::CoreError;
use gr_core::config::PlayerConfig;
use gr_core::traits::FrameSource;
use gr_source::{GifReader, VideoReader};

/// Category of a media file, determined by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    AnimatedImage,
}

impl MediaKind {
    /// Cadence d'affichage pour ce type de média.
    #[must_use]
    pub fn cadence(self, config: &PlayerConfig) -> Duration {
        match self {
            Self::Video => config.video_cadence(),
            Self::AnimatedImage => config.gif_cadence(),
        }
    }
}

/// Classify a file path into a media kind based on extension (case-insensitive).
///
/// Pure check: nothing is opened here.
///
/// # Errors
/// [`CoreError::UnsupportedFormat`] for any other extension.
pub fn classify_media(path: &Path) -> Result<MediaKind, CoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp4" | "avi" | "mov" | "mkv") => Ok(MediaKind::Video),
        Some("gif") => Ok(MediaKind::AnimatedImage),
        Some(other) => Err(CoreError::UnsupportedFormat {
            format: format!(".{other}"),
        }),
        None => Err(CoreError::UnsupportedFormat {
            format: path.display().to_string(),
        }),
    }
}

/// Ouvre le lecteur correspondant à `kind`.
///
/// # Errors
/// Propagates the reader's `SourceUnavailable` / `DecodeFailure`.
pub fn open_source(
    kind: MediaKind,
    path: &Path,
    config: &PlayerConfig,
) -> Result<Box<dyn FrameSource>, CoreError> {
    log::info!("Ouverture {kind:?} : {}", path.display());
    Ok(match kind {
        MediaKind::Video => Box::new(VideoReader::open(path, config.max_pipe_width)?),
        MediaKind::AnimatedImage => Box::new(GifReader::open(path)?),
    })
}
