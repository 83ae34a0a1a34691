use anyhow::{Context, Result};
use gr_core::frame::TextFrame;
use ratatui::DefaultTerminal;
use ratatui::widgets::Clear;

use crate::canvas::render_text;

/// Surface d'affichage : efface puis écrit un bloc de texte.
pub trait Surface {
    /// Clear the surface and show `frame`.
    ///
    /// # Errors
    /// Returns an error if the underlying terminal write fails.
    fn present(&mut self, frame: &TextFrame) -> Result<()>;
}

/// Terminal ratatui (écran alternatif + raw mode, voir `ratatui::init`).
///
/// The caller owns the lifecycle: `ratatui::restore()` must run once the
/// surface is no longer used.
pub struct TerminalSurface {
    terminal: DefaultTerminal,
}

impl TerminalSurface {
    /// Wrap an initialised terminal.
    #[must_use]
    pub fn new(terminal: DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl Surface for TerminalSurface {
    fn present(&mut self, frame: &TextFrame) -> Result<()> {
        self.terminal
            .draw(|f| {
                let area = f.area();
                f.render_widget(Clear, area);
                render_text(f.buffer_mut(), area, frame);
            })
            .context("Écriture terminal impossible")?;
        Ok(())
    }
}
