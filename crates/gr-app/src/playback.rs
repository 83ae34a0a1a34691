use std::time::Duration;

use anyhow::{Context, Result};
use gr_ascii::FrameRenderer;
use gr_core::CoreError;
use gr_core::cancel::CancelToken;
use gr_core::traits::FrameSource;
use gr_render::Surface;

/// État d'une session de lecture.
pub struct Session {
    /// Largeur de la grille en caractères.
    pub width: u32,
    /// Pause entre deux frames.
    pub cadence: Duration,
    /// Jeton observé entre les étapes et pendant la pause.
    pub cancel: CancelToken,
    /// Nom affiché dans les logs et les erreurs.
    pub label: String,
}

/// Bilan d'une lecture terminée par annulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Frames écrites sur la surface (blocs d'erreur compris).
    pub frames: u64,
    /// Relectures depuis le début après épuisement.
    pub restarts: u64,
    /// Frames remplacées par un bloc d'erreur.
    pub sentinels: u64,
}

/// Boucle de lecture : frame → rendu → affichage → pause, jusqu'à annulation.
///
/// `source` is owned by the loop and dropped on every return path, which
/// releases the decoder. An exhausted source is rewound; two exhaustions in a
/// row without a frame in between end the session with `DecodeFailure`.
///
/// # Errors
/// Returns an error if the source cannot be reopened, never yields a frame,
/// or the surface write fails.
pub fn run<S, D>(
    mut source: S,
    renderer: &mut FrameRenderer,
    surface: &mut D,
    session: &Session,
) -> Result<PlaybackReport>
where
    S: FrameSource,
    D: Surface + ?Sized,
{
    let mut report = PlaybackReport::default();
    let mut just_rewound = false;

    log::info!(
        "Lecture {} : largeur {}, cadence {:?}",
        session.label,
        session.width,
        session.cadence
    );

    while !session.cancel.is_cancelled() {
        let text = match source.next_frame() {
            Some(frame) => {
                just_rewound = false;
                renderer.render(Some(frame), session.width)
            }
            None => {
                if just_rewound {
                    return Err(CoreError::decode(
                        session.label.as_str(),
                        "la source ne produit aucune frame",
                    )
                    .into());
                }
                log::debug!("Source épuisée, relecture depuis le début");
                source
                    .rewind()
                    .with_context(|| format!("Relecture impossible : {}", session.label))?;
                report.restarts += 1;
                just_rewound = true;
                continue;
            }
        };

        if text.is_sentinel() {
            report.sentinels += 1;
        }
        surface.present(&text)?;
        report.frames += 1;

        if session.cancel.sleep(session.cadence) {
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_core::frame::{FrameBuffer, PixelFormat, TextFrame};
    use gr_core::palette::Palette;
    use gr_source::GifReader;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Instant;

    /// Source finie façon vidéo : `None` en fin de passe, `Drop` observable.
    struct ScriptedSource {
        frames: Vec<FrameBuffer>,
        cursor: usize,
        released: Arc<AtomicBool>,
    }

    impl ScriptedSource {
        fn new(frames: Vec<FrameBuffer>) -> (Self, Arc<AtomicBool>) {
            let released = Arc::new(AtomicBool::new(false));
            let source = Self {
                frames,
                cursor: 0,
                released: Arc::clone(&released),
            };
            (source, released)
        }
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> Option<&FrameBuffer> {
            let frame = self.frames.get(self.cursor)?;
            self.cursor += 1;
            Some(frame)
        }

        fn rewind(&mut self) -> Result<(), CoreError> {
            self.cursor = 0;
            Ok(())
        }

        fn native_size(&self) -> (u32, u32) {
            (4, 4)
        }
    }

    impl Drop for ScriptedSource {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    /// Surface qui enregistre les frames et annule après `cancel_after`.
    struct RecordingSurface {
        shown: Vec<TextFrame>,
        cancel_after: usize,
        cancel: CancelToken,
        fail: bool,
    }

    impl RecordingSurface {
        fn new(cancel: &CancelToken, cancel_after: usize) -> Self {
            Self {
                shown: Vec::new(),
                cancel_after,
                cancel: cancel.clone(),
                fail: false,
            }
        }
    }

    impl Surface for RecordingSurface {
        fn present(&mut self, frame: &TextFrame) -> Result<()> {
            if self.fail {
                anyhow::bail!("terminal fermé");
            }
            self.shown.push(frame.clone());
            if self.shown.len() >= self.cancel_after {
                self.cancel.cancel();
            }
            Ok(())
        }
    }

    fn gray(v: u8) -> FrameBuffer {
        FrameBuffer::from_raw(4, 4, PixelFormat::Gray, vec![v; 16])
    }

    fn session(cadence: Duration) -> Session {
        Session {
            width: 4,
            cadence,
            cancel: CancelToken::new(),
            label: "test".to_string(),
        }
    }

    fn renderer() -> FrameRenderer {
        FrameRenderer::new(Palette::new("@+: ").unwrap(), 0.55)
    }

    #[test]
    fn cancel_after_first_frame_releases_source() {
        let (source, released) = ScriptedSource::new(vec![gray(0), gray(128), gray(255)]);
        let session = session(Duration::from_secs_f64(1.0 / 30.0));
        let mut surface = RecordingSurface::new(&session.cancel, 1);

        let start = Instant::now();
        let report = run(source, &mut renderer(), &mut surface, &session).unwrap();

        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(report.frames, 1);
        assert_eq!(surface.shown.len(), 1);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn cancel_interrupts_the_cadence_sleep() {
        let (source, released) = ScriptedSource::new(vec![gray(0)]);
        let session = session(Duration::from_secs(30));
        let mut surface = RecordingSurface::new(&session.cancel, usize::MAX);

        let remote = session.cancel.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });

        let start = Instant::now();
        let report = run(source, &mut renderer(), &mut surface, &session).unwrap();
        canceller.join().unwrap();

        assert!(start.elapsed() < Duration::from_secs(10));
        assert_eq!(report.frames, 1);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn exhaustion_restarts_from_first_frame() {
        let (source, _) = ScriptedSource::new(vec![gray(0), gray(255)]);
        let session = session(Duration::from_millis(1));
        let mut surface = RecordingSurface::new(&session.cancel, 5);

        let report = run(source, &mut renderer(), &mut surface, &session).unwrap();

        assert_eq!(report.frames, 5);
        assert_eq!(report.restarts, 2);
        let first: Vec<String> = surface.shown.iter().map(ToString::to_string).collect();
        assert_eq!(first[0], first[2]);
        assert_eq!(first[1], first[3]);
        assert_eq!(first[0], first[4]);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn source_without_frames_is_fatal() {
        let (source, released) = ScriptedSource::new(Vec::new());
        let session = session(Duration::from_millis(1));
        let mut surface = RecordingSurface::new(&session.cancel, usize::MAX);

        let err = run(source, &mut renderer(), &mut surface, &session).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::DecodeFailure { .. })
        ));
        assert!(surface.shown.is_empty());
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn surface_failure_still_releases_source() {
        let (source, released) = ScriptedSource::new(vec![gray(0)]);
        let session = session(Duration::from_millis(1));
        let mut surface = RecordingSurface::new(&session.cancel, usize::MAX);
        surface.fail = true;

        assert!(run(source, &mut renderer(), &mut surface, &session).is_err());
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn already_cancelled_session_shows_nothing() {
        let (source, released) = ScriptedSource::new(vec![gray(0)]);
        let session = session(Duration::from_millis(1));
        session.cancel.cancel();
        let mut surface = RecordingSurface::new(&session.cancel, usize::MAX);

        let report = run(source, &mut renderer(), &mut surface, &session).unwrap();

        assert_eq!(report, PlaybackReport::default());
        assert!(surface.shown.is_empty());
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn bad_frame_is_shown_as_sentinel_and_playback_continues() {
        let malformed = FrameBuffer::from_raw(4, 4, PixelFormat::Rgb, vec![0; 3]);
        let (source, _) = ScriptedSource::new(vec![malformed, gray(255)]);
        let session = session(Duration::from_millis(1));
        let mut surface = RecordingSurface::new(&session.cancel, 2);

        let report = run(source, &mut renderer(), &mut surface, &session).unwrap();

        assert_eq!(report.frames, 2);
        assert_eq!(report.sentinels, 1);
        assert!(surface.shown[0].is_sentinel());
        assert!(!surface.shown[1].is_sentinel());
    }

    #[test]
    fn gif_source_never_restarts() {
        let frames = vec![gray(0), gray(128), gray(255)];
        let source = GifReader::from_frames(frames, "anim.gif").unwrap();
        let session = session(Duration::from_millis(1));
        let mut surface = RecordingSurface::new(&session.cancel, 7);

        let boxed: Box<dyn FrameSource> = Box::new(source);
        let report = run(boxed, &mut renderer(), &mut surface, &session).unwrap();

        assert_eq!(report.frames, 7);
        assert_eq!(report.restarts, 0);
        assert_eq!(surface.shown[0], surface.shown[3]);
        assert_eq!(surface.shown[0], surface.shown[6]);
    }

    #[cfg(unix)]
    mod with_video_reader {
        use super::*;
        use gr_source::VideoReader;
        use gr_source::video::VideoInfo;
        use std::path::Path;
        use std::process::{Child, Command, Stdio};
        use std::sync::atomic::AtomicU32;

        static DECODER_PID: AtomicU32 = AtomicU32::new(0);

        /// Flux de trois frames 2×2 gray.
        fn three_frames(_: &Path, _: u32, _: u32) -> std::io::Result<Child> {
            let child = Command::new("head")
                .args(["-c", "12", "/dev/zero"])
                .stdout(Stdio::piped())
                .stdin(Stdio::null())
                .spawn()?;
            DECODER_PID.store(child.id(), Ordering::SeqCst);
            Ok(child)
        }

        #[test]
        fn cancel_after_first_video_frame_releases_stream() {
            let info = VideoInfo {
                width: 2,
                height: 2,
                fps: 30.0,
            };
            let reader =
                VideoReader::with_spawner(Path::new("clip.mp4"), info, 640, three_frames).unwrap();
            let pid = DECODER_PID.load(Ordering::SeqCst);
            let session = session(Duration::from_secs_f64(1.0 / 30.0));
            let mut surface = RecordingSurface::new(&session.cancel, 1);

            let report = run(reader, &mut renderer(), &mut surface, &session).unwrap();

            assert_eq!(report.frames, 1);
            assert_eq!(surface.shown.len(), 1);
            assert!(!surface.shown[0].is_sentinel());
            if cfg!(target_os = "linux") {
                // tué et attendu : plus d'entrée, même zombie
                assert!(!Path::new(&format!("/proc/{pid}")).exists());
            }
        }
    }
}
