//! A named, rectangular text box on the screen.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Widget},
};
pub use ratatui::style::Color;

use crate::GuiError;

/// A view: rectangle, display flags and a line buffer with cursor and origin.
///
/// Corners are inclusive terminal cells; content is drawn inside them, one
/// cell in from every edge, whether or not the frame is shown. The cursor is
/// relative to the content area, the origin is the first visible line and
/// column of the buffer. Cursor and origin rows count buffer lines; in a
/// wrapped view one line may take several screen rows, and
/// [`View::scroll_to_cursor`] brings the cursor line back on screen.
///
/// Content is written through [`std::fmt::Write`]: `writeln!(view, "...")`
/// appends one line.
#[derive(Debug, Clone)]
pub struct View {
    name: String,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,

    pub title: String,
    pub frame: bool,
    pub highlight: bool,
    pub editable: bool,
    pub wrap: bool,
    pub overwrite: bool,

    pub fg_color: Color,
    pub bg_color: Color,
    pub sel_fg_color: Color,
    pub sel_bg_color: Color,

    lines: Vec<String>,
    /// Whether the last line still accepts characters (no newline written yet)
    line_open: bool,

    cx: usize,
    cy: usize,
    ox: usize,
    oy: usize,
}

impl View {
    pub(crate) fn new(name: &str, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            name: name.to_string(),
            x0,
            y0,
            x1,
            y1,
            title: String::new(),
            frame: true,
            highlight: false,
            editable: false,
            wrap: false,
            overwrite: false,
            fg_color: Color::Reset,
            bg_color: Color::Reset,
            sel_fg_color: Color::Reset,
            sel_bg_color: Color::Reset,
            lines: Vec::new(),
            line_open: false,
            cx: 0,
            cy: 0,
            ox: 0,
            oy: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Corners `(x0, y0, x1, y1)`.
    pub fn dimensions(&self) -> (i32, i32, i32, i32) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    pub(crate) fn set_dimensions(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.x0 = x0;
        self.y0 = y0;
        self.x1 = x1;
        self.y1 = y1;
    }

    /// Width and height of the content area.
    pub fn size(&self) -> (usize, usize) {
        (
            (self.x1 - self.x0 - 1).max(0) as usize,
            (self.y1 - self.y0 - 1).max(0) as usize,
        )
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    /// Move the cursor; fails if the point is outside the content area.
    pub fn set_cursor(&mut self, x: usize, y: usize) -> Result<(), GuiError> {
        let (max_x, max_y) = self.size();
        if x >= max_x || y >= max_y {
            return Err(GuiError::InvalidPoint { x, y });
        }
        self.cx = x;
        self.cy = y;
        Ok(())
    }

    pub fn origin(&self) -> (usize, usize) {
        (self.ox, self.oy)
    }

    /// Scroll the view; fails if the first visible line would be past the
    /// end of the content.
    pub fn set_origin(&mut self, x: usize, y: usize) -> Result<(), GuiError> {
        if y > self.lines.len() {
            return Err(GuiError::InvalidPoint { x, y });
        }
        self.ox = x;
        self.oy = y;
        Ok(())
    }

    /// Scroll down until every screen row of the cursor line is visible.
    ///
    /// Only wrapped views need it: elsewhere each line is one row and the
    /// cursor never leaves the content area. The cursor keeps pointing at
    /// the same buffer line. A line taller than the view ends up at the top.
    pub fn scroll_to_cursor(&mut self) {
        let (width, height) = self.size();
        if !self.wrap || height == 0 {
            return;
        }

        let target = self.oy + self.cy;
        let mut rows: usize = (self.oy..=target).map(|i| self.rows_of(i, width)).sum();
        while rows > height && self.oy < target {
            rows -= self.rows_of(self.oy, width);
            self.oy += 1;
        }
        self.cy = target - self.oy;
    }

    /// Screen rows taken by buffer line `idx`; a missing line counts as one.
    fn rows_of(&self, idx: usize, width: usize) -> usize {
        match self.lines.get(idx) {
            Some(line) if self.wrap && width > 0 => line.chars().count().div_ceil(width).max(1),
            _ => 1,
        }
    }

    /// Line at view row `y`, taking the origin into account.
    pub fn line(&self, y: usize) -> Option<&str> {
        self.lines.get(self.oy + y).map(String::as_str)
    }

    /// Line under the cursor.
    pub fn current_line(&self) -> Option<&str> {
        self.line(self.cy)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full content, every line terminated by a newline.
    pub fn buffer(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    /// Drop the content. Cursor and origin are kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.line_open = false;
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Apply a key press to the content of an editable view.
    ///
    /// Returns `false` if the key has no editing meaning.
    pub fn edit(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        match key.code {
            KeyCode::Char(ch) => self.edit_write(ch),
            KeyCode::Backspace => self.edit_delete(true),
            KeyCode::Delete => self.edit_delete(false),
            KeyCode::Enter => self.edit_newline(),
            KeyCode::Insert => self.overwrite = !self.overwrite,
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            _ => return false,
        }
        true
    }

    /// Buffer position `(row, col)` under the cursor.
    fn edit_position(&self) -> (usize, usize) {
        (self.oy + self.cy, self.ox + self.cx)
    }

    /// Place the cursor on a buffer position, scrolling the origin so it
    /// stays inside the content area.
    fn set_edit_position(&mut self, row: usize, col: usize) {
        let (width, height) = self.size();
        let (width, height) = (width.max(1), height.max(1));

        if row < self.oy {
            self.oy = row;
        } else if row >= self.oy + height {
            self.oy = row + 1 - height;
        }
        if col < self.ox {
            self.ox = col;
        } else if col >= self.ox + width {
            self.ox = col + 1 - width;
        }

        self.cy = row - self.oy;
        self.cx = col - self.ox;
        self.scroll_to_cursor();
    }

    fn ensure_line(&mut self, row: usize) {
        while self.lines.len() <= row {
            self.lines.push(String::new());
        }
    }

    fn edit_write(&mut self, ch: char) {
        let (row, col) = self.edit_position();
        self.ensure_line(row);

        let line = &mut self.lines[row];
        let len = line.chars().count();
        if col > len {
            line.extend(std::iter::repeat(' ').take(col - len));
        }
        let at = byte_index(line, col);
        if self.overwrite && col < len {
            line.remove(at);
        }
        line.insert(at, ch);

        self.set_edit_position(row, col + 1);
    }

    fn edit_delete(&mut self, back: bool) {
        let (row, col) = self.edit_position();
        if row >= self.lines.len() {
            if back && col > 0 {
                self.set_edit_position(row, col - 1);
            }
            return;
        }

        if back {
            if col > 0 {
                let line = &mut self.lines[row];
                if col <= line.chars().count() {
                    let at = byte_index(line, col - 1);
                    line.remove(at);
                }
                self.set_edit_position(row, col - 1);
            } else if row > 0 {
                let tail = self.lines.remove(row);
                let prev_len = self.lines[row - 1].chars().count();
                self.lines[row - 1].push_str(&tail);
                self.set_edit_position(row - 1, prev_len);
            }
        } else {
            let len = self.lines[row].chars().count();
            if col < len {
                let line = &mut self.lines[row];
                let at = byte_index(line, col);
                line.remove(at);
            } else if row + 1 < self.lines.len() {
                let next = self.lines.remove(row + 1);
                self.lines[row].push_str(&next);
            }
        }
    }

    fn edit_newline(&mut self) {
        let (row, col) = self.edit_position();
        self.ensure_line(row);

        let line = &mut self.lines[row];
        let at = byte_index(line, col);
        let tail = line.split_off(at);
        self.lines.insert(row + 1, tail);

        self.set_edit_position(row + 1, 0);
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let (row, col) = self.edit_position();
        let last_row = self.lines.len().saturating_sub(1);

        let row = match dy {
            d if d < 0 => row.saturating_sub(1),
            d if d > 0 => (row + 1).min(last_row),
            _ => row,
        };
        let line_len = self.lines.get(row).map_or(0, |l| l.chars().count());
        let col = match dx {
            d if d < 0 => col.saturating_sub(1),
            d if d > 0 => (col + 1).min(line_len),
            _ => col.min(line_len),
        };

        self.set_edit_position(row, col);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Screen cell under the cursor, if visible.
    pub(crate) fn cursor_screen_position(&self, area: Rect) -> Option<Position> {
        let (width, _) = self.size();
        let (col, row) = if self.wrap && width > 0 {
            // Rows taken by the lines above the cursor, then the wrapped part
            let above: usize = (self.oy..self.oy + self.cy).map(|i| self.rows_of(i, width)).sum();
            let col = self.ox + self.cx;
            (col % width, above + col / width)
        } else {
            (self.cx, self.cy)
        };
        let x = self.x0 + 1 + col as i32;
        let y = self.y0 + 1 + row as i32;
        let inside = x >= area.x as i32
            && y >= area.y as i32
            && x < area.right() as i32
            && y < area.bottom() as i32
            && x < self.x1
            && y < self.y1;
        inside.then(|| Position::new(x as u16, y as u16))
    }

    /// Draw the view into `buf`, clipped to `area`.
    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let Some(outer) = clip(self.x0, self.y0, self.x1, self.y1, area) else {
            return;
        };

        let base = Style::default().fg(self.fg_color).bg(self.bg_color);
        Clear.render(outer, buf);
        buf.set_style(outer, base);

        if self.frame {
            let border_style = if focused {
                base.add_modifier(Modifier::BOLD)
            } else {
                base
            };
            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style);
            if !self.title.is_empty() {
                block = block.title(Span::styled(format!(" {} ", self.title), border_style));
            }
            block.render(outer, buf);
        }

        let Some(inner) = clip(self.x0 + 1, self.y0 + 1, self.x1 - 1, self.y1 - 1, area) else {
            return;
        };
        // Parts of the content area cut off by the screen edge
        let skip_cols = (inner.x as i32 - (self.x0 + 1)).max(0) as usize;
        let skip_rows = (inner.y as i32 - (self.y0 + 1)).max(0) as usize;

        let (width, _) = self.size();
        let selected_row = self.oy + self.cy;
        let selected = Style::default().fg(self.sel_fg_color).bg(self.sel_bg_color);

        let rows = self.display_rows(width, skip_rows + inner.height as usize);
        for (i, (line_idx, text)) in rows.into_iter().skip(skip_rows).enumerate() {
            let y = inner.y + i as u16;
            let style = if self.highlight && line_idx == selected_row {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), selected);
                selected
            } else {
                base
            };
            let visible: String = text.chars().skip(skip_cols).collect();
            buf.set_stringn(inner.x, y, visible, inner.width as usize, style);
        }
    }

    /// Rows as displayed from the origin down, each tagged with the buffer
    /// line it comes from. Wrapped lines produce several rows.
    fn display_rows(&self, width: usize, max_rows: usize) -> Vec<(usize, String)> {
        let mut rows = Vec::new();
        for (idx, line) in self.lines.iter().enumerate().skip(self.oy) {
            if rows.len() >= max_rows {
                break;
            }
            if self.wrap && width > 0 {
                let chars: Vec<char> = line.chars().collect();
                if chars.is_empty() {
                    rows.push((idx, String::new()));
                }
                for chunk in chars.chunks(width) {
                    rows.push((idx, chunk.iter().collect()));
                }
            } else {
                rows.push((idx, line.chars().skip(self.ox).collect()));
            }
        }
        rows.truncate(max_rows);
        rows
    }
}

impl fmt::Write for View {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            match ch {
                '\n' => {
                    if !self.line_open {
                        self.lines.push(String::new());
                    }
                    self.line_open = false;
                }
                '\r' => {}
                _ => {
                    if !self.line_open {
                        self.lines.push(String::new());
                        self.line_open = true;
                    }
                    if let Some(last) = self.lines.last_mut() {
                        last.push(ch);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Byte offset of the char at `col`, or the end of the line.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(idx, _)| idx)
}

/// Inclusive corners clipped to `area`.
fn clip(x0: i32, y0: i32, x1: i32, y1: i32, area: Rect) -> Option<Rect> {
    let left = x0.max(area.x as i32);
    let top = y0.max(area.y as i32);
    let right = x1.min(area.right() as i32 - 1);
    let bottom = y1.min(area.bottom() as i32 - 1);
    if right < left || bottom < top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left + 1) as u16,
        (bottom - top + 1) as u16,
    ))
}
