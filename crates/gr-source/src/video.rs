// Ce module utilise ffmpeg via subprocess (std::process::Command).
// Prérequis : `ffmpeg` et `ffprobe` accessibles dans PATH.
//
// Architecture :
//   - `probe_video`       : interroge ffprobe pour obtenir width/height/fps
//   - `spawn_ffmpeg_pipe` : lance ffmpeg → flux raw gray sur stdout
//   - `VideoReader`       : lit une frame par appel, relance ffmpeg sur rewind
//
// Le processus ffmpeg appartient au `VideoReader` : il est tué puis attendu
// sur EOF, sur rewind et dans `Drop`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use gr_core::CoreError;
use gr_core::frame::{FrameBuffer, PixelFormat};
use gr_core::traits::FrameSource;

/// Lance le décodeur pour `path`, sortie `w × h` en gray sur stdout.
pub type Spawner = fn(&Path, u32, u32) -> std::io::Result<Child>;

/// Métadonnées extraites via ffprobe.
///
/// # Example
/// ```
/// use gr_source::video::VideoInfo;
/// let info = VideoInfo { width: 1920, height: 1080, fps: 24.0 };
/// assert_eq!(info.pipe_size(640), (640, 360));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Images par seconde (ex: 23.976, 24.0, 30.0, 60.0).
    pub fps: f64,
}

impl VideoInfo {
    /// Dimensions du flux brut : largeur plafonnée à `max_width`, ratio préservé.
    #[must_use]
    pub fn pipe_size(&self, max_width: u32) -> (u32, u32) {
        let w = self.width.min(max_width.max(1));
        let h = (f64::from(self.height) * f64::from(w) / f64::from(self.width.max(1))).round();
        (w, (h as u32).max(1))
    }
}

/// Parse la sortie `default=noprint_wrappers=1` de ffprobe.
///
/// Returns `None` when no usable video stream geometry is present.
///
/// # Example
/// ```
/// use gr_source::video::parse_probe_output;
/// let info = parse_probe_output("width=640\nheight=480\nr_frame_rate=30000/1001\n").unwrap();
/// assert_eq!((info.width, info.height), (640, 480));
/// assert!((info.fps - 29.97).abs() < 0.01);
/// ```
#[must_use]
pub fn parse_probe_output(text: &str) -> Option<VideoInfo> {
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;
    let mut fps: f64 = 30.0;

    for line in text.lines() {
        if let Some(val) = line.strip_prefix("width=") {
            width = val.trim().parse().ok();
        } else if let Some(val) = line.strip_prefix("height=") {
            height = val.trim().parse().ok();
        } else if let Some(val) = line.strip_prefix("r_frame_rate=") {
            // Format: "24/1" ou "30000/1001"
            let mut parts = val.trim().splitn(2, '/');
            let num: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);
            let den: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
            if den > 0.0 && num > 0.0 {
                fps = num / den;
            }
        }
    }

    match (width, height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Some(VideoInfo { width, height, fps })
        }
        _ => None,
    }
}

/// Interroge `ffprobe` pour obtenir les métadonnées du flux vidéo principal.
///
/// # Errors
/// Retourne [`CoreError::SourceUnavailable`] si `ffprobe` est introuvable ou si
/// le fichier ne contient aucun flux vidéo décodable.
pub fn probe_video(path: &Path) -> Result<VideoInfo, CoreError> {
    let display = path.display().to_string();

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate",
            "-of",
            "default=noprint_wrappers=1",
            "-i",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            CoreError::unavailable(
                display.as_str(),
                format!("impossible de lancer ffprobe ({e}), vérifiez qu'il est dans le PATH"),
            )
        })?;

    let text = String::from_utf8_lossy(&output.stdout);
    let Some(info) = parse_probe_output(&text) else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => "aucun flux vidéo trouvé",
            msg => msg,
        };
        return Err(CoreError::unavailable(display.as_str(), reason));
    };

    log::info!(
        "probe_video: {}x{} @ {:.3}fps ({display})",
        info.width,
        info.height,
        info.fps
    );
    Ok(info)
}

/// Lance un processus `ffmpeg` qui écrit des frames gray brutes sur stdout.
///
/// Chaque frame = `w × h` bytes (row-major, sans padding).
/// `-an` supprime l'audio.
///
/// # Errors
/// Returns the spawn error if `ffmpeg` cannot be launched.
pub fn spawn_ffmpeg_pipe(path: &Path, w: u32, h: u32) -> std::io::Result<Child> {
    let scale_filter = format!("scale={w}:{h}:flags=area");

    let child = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-i"])
        .arg(path)
        .args([
            "-vf",
            &scale_filter,
            "-f",
            "rawvideo",
            "-pix_fmt",
            "gray",
            "-an",
            "pipe:1",
        ])
        .stdout(Stdio::piped())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    log::debug!("ffmpeg spawné: {w}x{h} depuis {}", path.display());
    Ok(child)
}

/// Lit exactement `buf.len()` bytes depuis `reader`.
///
/// # Errors
/// Retourne `Ok(true)` si lu avec succès, `Ok(false)` sur EOF avant complétion,
/// `Err` sur erreur I/O fatale.
///
/// # Example
/// ```
/// use gr_source::video::read_exact_or_eof;
/// let mut input = std::io::Cursor::new(vec![1u8, 2, 3]);
/// let mut buf = [0u8; 2];
/// assert!(read_exact_or_eof(&mut input, &mut buf).unwrap());
/// assert!(!read_exact_or_eof(&mut input, &mut buf).unwrap());
/// ```
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false), // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}

/// Lecteur vidéo séquentiel.
///
/// Opened → Opened on each frame, Opened → Exhausted on EOF or read error.
/// [`FrameSource::rewind`] re-decodes from the start.
pub struct VideoReader {
    path: PathBuf,
    info: VideoInfo,
    /// Frame réutilisée à chaque lecture (gray, dimensions du pipe).
    frame: FrameBuffer,
    /// `None` = épuisé.
    child: Option<Child>,
    spawner: Spawner,
}

impl VideoReader {
    /// Probe `path` and start decoding from the first frame.
    ///
    /// # Errors
    /// Returns [`CoreError::SourceUnavailable`] if the path is not a readable
    /// file, `ffprobe`/`ffmpeg` cannot be launched, or no video stream exists.
    pub fn open(path: &Path, max_pipe_width: u32) -> Result<Self, CoreError> {
        if !path.is_file() {
            return Err(CoreError::unavailable(
                path.display().to_string(),
                "fichier introuvable",
            ));
        }
        let info = probe_video(path)?;
        Self::with_spawner(path, info, max_pipe_width, spawn_ffmpeg_pipe)
    }

    /// Start decoding already-probed `info` with a custom decoder launcher.
    ///
    /// [`VideoReader::open`] uses [`spawn_ffmpeg_pipe`]; any command writing
    /// raw gray frames of the pipe size on stdout works.
    ///
    /// # Errors
    /// Returns [`CoreError::SourceUnavailable`] if `spawner` fails.
    pub fn with_spawner(
        path: &Path,
        info: VideoInfo,
        max_pipe_width: u32,
        spawner: Spawner,
    ) -> Result<Self, CoreError> {
        let (w, h) = info.pipe_size(max_pipe_width);
        let mut reader = Self {
            path: path.to_path_buf(),
            info,
            frame: FrameBuffer::new(w, h, PixelFormat::Gray),
            child: None,
            spawner,
        };
        reader.spawn()?;
        Ok(reader)
    }

    fn spawn(&mut self) -> Result<(), CoreError> {
        let child = (self.spawner)(&self.path, self.frame.width, self.frame.height)
            .map_err(|e| {
                CoreError::unavailable(
                    self.path.display().to_string(),
                    format!("impossible de lancer ffmpeg: {e}"),
                )
            })?;
        self.child = Some(child);
        Ok(())
    }

    /// Tue et attend le décodeur courant, s'il existe.
    fn close(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    /// `true` once the current pass reached end of stream.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.child.is_none()
    }
}

impl FrameSource for VideoReader {
    fn next_frame(&mut self) -> Option<&FrameBuffer> {
        let stdout = self.child.as_mut().and_then(|c| c.stdout.as_mut())?;
        match read_exact_or_eof(stdout, &mut self.frame.data) {
            Ok(true) => Some(&self.frame),
            Ok(false) => {
                log::info!("Vidéo: fin du flux ({})", self.path.display());
                self.close();
                None
            }
            Err(e) => {
                // Une frame illisible termine la passe : la boucle relance.
                log::warn!("Vidéo: erreur lecture pipe: {e}");
                self.close();
                None
            }
        }
    }

    fn rewind(&mut self) -> Result<(), CoreError> {
        self.close();
        self.spawn()
    }

    fn native_size(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }
}

impl Drop for VideoReader {
    fn drop(&mut self) {
        self.close();
    }
}
