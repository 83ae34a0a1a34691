use gr_core::frame::TextFrame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Écrit directement un `TextFrame` dans un `ratatui::Buffer`.
///
/// Pas de widget Paragraph : écriture cellule par cellule, rognée à `area`.
///
/// # Example
/// ```
/// use gr_core::frame::TextFrame;
/// use gr_render::canvas::render_text;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 0, 2, 1);
/// let mut buf = Buffer::empty(area);
/// render_text(&mut buf, area, &TextFrame::from_lines(vec!["@:".into()]));
/// assert_eq!(buf, Buffer::with_lines(["@:"]));
/// ```
pub fn render_text(buf: &mut Buffer, area: Rect, frame: &TextFrame) {
    for (cy, line) in frame.lines().iter().take(area.height as usize).enumerate() {
        for (cx, ch) in line.chars().take(area.width as usize).enumerate() {
            let pos = (area.x + cx as u16, area.y + cy as u16);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(ch);
            }
        }
    }
}
