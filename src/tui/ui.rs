//! Thin device adapter: writes a computed [`FrameLayout`] to a ratatui
//! frame. All positioning decisions live in `layout`; this just places
//! spans. Ratatui starts each frame from an empty buffer, which gives the
//! full-screen clear.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::tui::layout::FrameLayout;

pub fn render(frame: &mut Frame, layout: &FrameLayout) {
    for placed in &layout.texts {
        let rect = Rect::new(placed.col, placed.row, placed.text.width() as u16, 1);
        frame.render_widget(Span::raw(placed.text.as_str()), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::layout::compute;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Size;

    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let symbols: Vec<&str> = buffer.content().iter().map(|c| c.symbol()).collect();
        symbols[row as usize * width..(row as usize + 1) * width].concat()
    }

    #[test]
    fn test_render_places_every_text() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let layout = compute(Size::new(80, 24), 120, 3, "5 + 3 = ", "12", None).unwrap();
        terminal.draw(|f| render(f, &layout)).unwrap();

        let time_score_row = row_text(&terminal, 8);
        assert_eq!(&time_score_row[26..30], "120s");
        assert_eq!(&time_score_row[53..54], "3");
        let equation_row = row_text(&terminal, 16);
        assert_eq!(equation_row.trim(), "5 + 3 =  12");
    }

    #[test]
    fn test_redraw_clears_previous_frame() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        let first = compute(Size::new(80, 24), 10, 0, "5 + 3 = ", "123", None).unwrap();
        terminal.draw(|f| render(f, &first)).unwrap();
        let second = compute(Size::new(80, 24), 9, 1, "5 + 3 = ", "", None).unwrap();
        terminal.draw(|f| render(f, &second)).unwrap();

        let equation_row = row_text(&terminal, 16);
        assert_eq!(equation_row.trim(), "5 + 3 =");
        assert!(!equation_row.contains("123"));
    }

    #[test]
    fn test_debug_line_renders_at_origin() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let layout =
            compute(Size::new(80, 24), 10, 0, "5 + 3 = ", "8", Some("buffer: \"8\"")).unwrap();
        terminal.draw(|f| render(f, &layout)).unwrap();
        assert!(row_text(&terminal, 0).starts_with("buffer: \"8\""));
    }
}
