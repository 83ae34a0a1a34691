use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gr_core::cancel::CancelToken;

/// Intervalle de polling clavier : borne le délai de sortie du thread.
const KEY_POLL: Duration = Duration::from_millis(50);

/// Installe le handler SIGINT qui annule `cancel`.
///
/// # Errors
/// Returns an error if a handler is already installed.
pub fn install_interrupt_handler(cancel: &CancelToken) -> Result<()> {
    let token = cancel.clone();
    ctrlc::set_handler(move || token.cancel())
        .context("Impossible d'installer le handler Ctrl+C")
}

/// Spawne le thread clavier : en raw mode, Ctrl+C arrive comme un événement
/// touche et non comme SIGINT.
///
/// The thread only cancels the token and exits once the token is cancelled.
///
/// # Errors
/// Returns an error if the thread cannot be spawned.
pub fn spawn_key_watcher(cancel: CancelToken) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gr-keys".to_string())
        .spawn(move || watch_keys(&cancel))
        .context("Impossible de spawner le thread clavier")
}

fn watch_keys(cancel: &CancelToken) {
    while !cancel.is_cancelled() {
        match event::poll(KEY_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if is_quit_key(&key) => {
                    log::info!("Arrêt demandé au clavier");
                    cancel.cancel();
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Lecture clavier impossible : {e}");
                    return;
                }
            },
            Ok(false) => {}
            Err(e) => {
                log::warn!("Polling clavier impossible : {e}");
                return;
            }
        }
    }
}

/// `q`, `Esc` ou `Ctrl+C`.
#[must_use]
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
