use anyhow::Result;
use clap::{CommandFactory, Parser};
use gr_ascii::FrameRenderer;
use gr_core::cancel::CancelToken;
use gr_core::config::PlayerConfig;
use gr_render::TerminalSurface;

pub mod cli;
pub mod dispatch;
pub mod input;
pub mod playback;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Sans chemin : usage, sortie sans erreur
    let Some(path) = cli.path.as_deref() else {
        cli::Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    // 4. Config : défauts puis overrides CLI
    let mut config = PlayerConfig::default();
    cli.apply_overrides(&mut config);
    let palette = config.build_palette()?;

    // 5. Valider l'extension AVANT toute ouverture, puis ouvrir la source.
    //    Extension refusée ou média illisible : erreur sur stderr, code non nul
    //    (seuls l'absence de chemin et l'interruption sortent avec 0).
    let kind = dispatch::classify_media(path)?;
    let source = dispatch::open_source(kind, path, &config)?;

    // 6. Session
    let cancel = CancelToken::new();
    input::install_interrupt_handler(&cancel)?;
    let session = playback::Session {
        width: cli
            .width
            .unwrap_or_else(|| terminal_width(config.fallback_width)),
        cadence: kind.cadence(&config),
        cancel: cancel.clone(),
        label: path.display().to_string(),
    };
    let mut renderer = FrameRenderer::new(palette, config.aspect_correction);

    // 7. Terminal + thread clavier
    let mut surface = TerminalSurface::new(ratatui::init());
    let keys = match input::spawn_key_watcher(cancel.clone()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("{e:#}");
            None
        }
    };

    // 8. Boucle de lecture (la source est libérée à sa sortie)
    let result = playback::run(source, &mut renderer, &mut surface, &session);

    // 9. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    cancel.cancel();
    if let Some(handle) = keys {
        let _ = handle.join();
    }
    ratatui::restore();

    let report = result?;
    log::info!(
        "Lecture terminée : {} frames, {} relectures, {} frames en erreur",
        report.frames,
        report.restarts,
        report.sentinels
    );
    println!("[INFO] Lecture interrompue par l'utilisateur.");
    Ok(())
}

/// Largeur du terminal en colonnes, `fallback` si inconnue.
fn terminal_width(fallback: u32) -> u32 {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => u32::from(cols),
        _ => fallback,
    }
}
