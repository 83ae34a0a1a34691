use std::path::PathBuf;

use clap::Parser;
use gr_core::config::PlayerConfig;

/// glyphreel : lecture en boucle de vidéos et GIF animés en texte dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier à lire : vidéo (.mp4, .avi, .mov, .mkv) ou GIF animé (.gif).
    pub path: Option<PathBuf>,

    /// Largeur de la grille en caractères (1 à 65535). Défaut : largeur du terminal (80 si inconnue).
    #[arg(value_parser = clap::value_parser!(u32).range(1..=i64::from(u16::MAX)))]
    pub width: Option<u32>,

    /// Palette : preset (classic, detailed, blocks) ou glyphes du plus sombre
    /// au plus clair (au moins 2 caractères).
    #[arg(long)]
    pub charset: Option<String>,

    /// Correction du ratio des cellules terminal (défaut : 0.55).
    #[arg(long)]
    pub aspect: Option<f32>,

    /// Cadence vidéo en images par seconde (défaut : 30).
    #[arg(long)]
    pub fps: Option<f64>,

    /// Délai entre deux images d'un GIF, en millisecondes (défaut : 70).
    #[arg(long)]
    pub gif_delay: Option<u64>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Applique les overrides CLI sur `config`, puis borne les valeurs.
    pub fn apply_overrides(&self, config: &mut PlayerConfig) {
        if let Some(ref charset) = self.charset {
            config.palette.clone_from(charset);
        }
        if let Some(aspect) = self.aspect {
            config.aspect_correction = aspect;
        }
        if let Some(fps) = self.fps {
            config.video_fps = fps;
        }
        if let Some(delay) = self.gif_delay {
            config.gif_delay_ms = delay;
        }
        config.clamp_all();
    }
}
