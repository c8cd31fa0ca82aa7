//! The per-frame cell buffer and its conversion to terminal lines.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self { symbol: ' ', fg: None, bg: None, bold: false }
    }
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        self.symbol.is_whitespace()
    }

    pub fn style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = self.fg {
            style = style.fg(fg.into());
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg.into());
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    fn same_style(&self, other: &Cell) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.bold == other.bold
    }
}

/// A full frame. Every cell starts as a blank space and keeps whatever was painted last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Replaces a cell outright. Off-canvas writes are dropped.
    pub fn fill(&mut self, x: i32, y: i32, symbol: char, fg: Option<Rgb>, bg: Option<Rgb>) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { symbol, fg, bg, bold: false };
        }
    }

    /// Draws a glyph on top of whatever background the cell already has.
    pub fn paint(&mut self, x: i32, y: i32, symbol: char, fg: Rgb, bold: bool) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.symbol = symbol;
            cell.fg = Some(fg);
            cell.bold = bold;
        }
    }

    /// One line per row, with one span per run of identically styled cells.
    pub fn lines(&self) -> Vec<Line<'static>> {
        self.rows().map(row_to_line).collect()
    }
}

fn row_to_line(row: &[Cell]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut current: Option<&Cell> = None;

    for cell in row {
        match current {
            Some(head) if head.same_style(cell) => {},
            Some(head) => {
                spans.push(Span::styled(std::mem::take(&mut run), head.style()));
                current = Some(cell);
            },
            None => current = Some(cell),
        }
        run.push(cell.symbol);
    }
    if let Some(head) = current {
        spans.push(Span::styled(run, head.style()));
    }

    Line::from(spans)
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const NIGHT: Rgb = Rgb::new(6, 8, 12);

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.rows().count(), 3);
        assert!(canvas.rows().flatten().all(|c| *c == Cell::default()));
    }

    #[test]
    fn test_later_paint_wins_and_keeps_background() {
        let mut canvas = Canvas::new(3, 1);
        canvas.fill(1, 0, ' ', None, Some(NIGHT));
        canvas.paint(1, 0, 'a', RED, false);
        canvas.paint(1, 0, 'b', Rgb::WHITE, true);
        assert_eq!(canvas.get(1, 0), Some(&Cell { symbol: 'b', fg: Some(Rgb::WHITE), bg: Some(NIGHT), bold: true }));
    }

    #[test]
    fn test_off_canvas_writes_are_ignored() {
        let mut canvas = Canvas::new(2, 2);
        canvas.paint(-1, 0, 'x', RED, false);
        canvas.paint(0, 2, 'x', RED, false);
        canvas.fill(2, 0, 'x', None, None);
        assert_eq!(canvas, Canvas::new(2, 2));
        assert_eq!(canvas.get(-1, 0), None);
    }

    #[test]
    fn test_lines_group_style_runs() {
        let mut canvas = Canvas::new(6, 2);
        for x in 0..6 {
            canvas.fill(x, 0, ' ', None, Some(NIGHT));
        }
        canvas.paint(2, 0, '*', RED, false);
        canvas.paint(3, 0, '*', RED, false);

        let lines = canvas.lines();
        assert_eq!(lines.len(), 2);

        let spans: Vec<(String, Style)> =
            lines[0].spans.iter().map(|s| (s.content.to_string(), s.style)).collect();
        let night = Style::new().bg(Color::Rgb(6, 8, 12));
        assert_eq!(spans, vec![
            ("  ".to_string(), night),
            ("**".to_string(), night.fg(Color::Rgb(255, 0, 0))),
            ("  ".to_string(), night),
        ]);

        // An untouched row is one unstyled run.
        assert_eq!(lines[1].spans.len(), 1);
        assert_eq!(lines[1].spans[0].content, "      ");
    }

    #[test]
    fn test_renders_into_buffer() {
        let mut canvas = Canvas::new(3, 1);
        canvas.paint(1, 0, '★', RED, true);
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        (&canvas).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "★");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(255, 0, 0));
    }
}
