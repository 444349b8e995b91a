use crate::decode::decode_all;
use crate::zchar::ZChar;
use crossterm::tty::IsTty;
use std::io::{self, Write};
use tui::buffer::Buffer;
use tui::layout::Rect;

/// Screen is everything input handling needs from the output side. It
/// should abstract the implementation details, so a variety of kinds of
/// screen would work.
pub trait Screen {
    /// story output
    fn put_str(&mut self, text: &str) -> Result<(), io::Error>;

    /// bring the user up to date before asking for input
    fn show_screen(&mut self, show_cursor: bool) -> Result<(), io::Error>;

    /// the one-character marker saying what kind of input is wanted
    fn show_prompt(&mut self, show_cursor: bool, glyph: char) -> Result<(), io::Error>;

    /// text straight to the user, bypassing the story's screen
    fn print(&mut self, text: &str) -> Result<(), io::Error>;

    /// a complaint about something the user typed
    fn warn(&mut self, text: &str) -> Result<(), io::Error>;

    /// input that has been accepted, so it shows up on the screen
    fn display_user_input(&mut self, input: &[ZChar]) -> Result<(), io::Error>;

    /// forget the last `count` characters of input on the cursor line
    fn discard_old_input(&mut self, count: usize) -> Result<(), io::Error>;

    /// show every line of the screen
    fn dump_screen(&mut self) -> Result<(), io::Error>;

    /// the more prompt is off; show what it would have paused on
    fn elide_more_prompt(&mut self) -> Result<(), io::Error>;

    /// Settings that belong to the screen. Returns false if it has never
    /// heard of `setting`.
    fn apply_setting(
        &mut self,
        setting: &str,
        show_cursor: bool,
        startup: bool,
    ) -> Result<bool, io::Error>;

    /// how many lines the screen has
    fn rows(&self) -> u16;
}

/// columns and rows of the controlling terminal, if there is one
pub fn terminal_size() -> Option<(u16, u16)> {
    if io::stdout().is_tty() {
        crossterm::terminal::size().ok()
    } else {
        None
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "ON"
    } else {
        "OFF"
    }
}

/// Plain text screen: a grid of cells that is written out line by line
/// whenever input is wanted. Nothing is ever redrawn in place, so it
/// works on a printer, a pipe or a log file.
pub struct TextScreen<W: Write> {
    out: W,
    grid: Buffer,
    cursor: (u16, u16),
    /// first row not yet shown
    shown: u16,
    line_numbers: bool,
    line_types: bool,
}

impl<W: Write> TextScreen<W> {
    pub fn new(out: W, rows: u16, columns: u16) -> Self {
        TextScreen {
            out,
            grid: Buffer::empty(Rect::new(0, 0, columns.max(1), rows.max(1))),
            cursor: (0, 0),
            shown: 0,
            line_numbers: false,
            line_types: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn width(&self) -> u16 {
        self.grid.area.width
    }

    fn height(&self) -> u16 {
        self.grid.area.height
    }

    fn put_char(&mut self, ch: char) {
        if ch == '\n' {
            self.new_line();
            return;
        }
        let (x, y) = self.cursor;
        self.grid.get_mut(x, y).set_char(ch);
        if x + 1 == self.width() {
            self.new_line();
        } else {
            self.cursor.0 += 1;
        }
    }

    fn new_line(&mut self) {
        self.cursor.0 = 0;
        if self.cursor.1 + 1 < self.height() {
            self.cursor.1 += 1;
            return;
        }
        // scroll by a line
        let w = usize::from(self.width());
        self.grid.content.drain(..w);
        self.grid.content.resize(w * usize::from(self.height()), Default::default());
        self.shown = self.shown.saturating_sub(1);
    }

    fn row_text(&self, y: u16) -> String {
        let text: String = (0..self.width())
            .map(|x| self.grid.get(x, y).symbol.as_str())
            .collect();
        text.trim_end().to_string()
    }

    fn write_row(&mut self, y: u16) -> Result<(), io::Error> {
        let text = self.row_text(y);
        if self.line_numbers {
            write!(self.out, "{:2} ", y + 1)?;
        }
        if self.line_types {
            let marker = if y == self.cursor.1 { ']' } else { ' ' };
            write!(self.out, "{}", marker)?;
        }
        writeln!(self.out, "{}", text)
    }
}

impl<W: Write> Screen for TextScreen<W> {
    fn put_str(&mut self, text: &str) -> Result<(), io::Error> {
        for ch in text.chars() {
            self.put_char(ch);
        }
        Ok(())
    }

    fn show_screen(&mut self, _show_cursor: bool) -> Result<(), io::Error> {
        // everything new, except the cursor line which the prompt shows
        for y in self.shown..self.cursor.1 {
            self.write_row(y)?;
        }
        self.shown = self.cursor.1;
        Ok(())
    }

    fn show_prompt(&mut self, _show_cursor: bool, glyph: char) -> Result<(), io::Error> {
        if self.line_numbers {
            write!(self.out, "{:2} ", self.cursor.1 + 1)?;
        }
        if self.line_types {
            write!(self.out, "{}", glyph)?;
        }
        let text = self.row_text(self.cursor.1);
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn print(&mut self, text: &str) -> Result<(), io::Error> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn warn(&mut self, text: &str) -> Result<(), io::Error> {
        log::debug!("warning shown: {}", text);
        writeln!(io::stderr(), "{}", text)
    }

    fn display_user_input(&mut self, input: &[ZChar]) -> Result<(), io::Error> {
        for c in input {
            self.put_char(char::from_u32(u32::from(*c)).unwrap_or('?'));
        }
        Ok(())
    }

    fn discard_old_input(&mut self, count: usize) -> Result<(), io::Error> {
        let count = u16::try_from(count).unwrap_or(u16::MAX).min(self.cursor.0);
        let (x, y) = self.cursor;
        for col in x - count..x {
            self.grid.get_mut(col, y).reset();
        }
        self.cursor.0 = x - count;
        Ok(())
    }

    fn dump_screen(&mut self) -> Result<(), io::Error> {
        writeln!(self.out)?;
        for y in 0..self.height() {
            self.write_row(y)?;
        }
        Ok(())
    }

    fn elide_more_prompt(&mut self) -> Result<(), io::Error> {
        // no pause, but don't let the text scroll away unseen either
        self.show_screen(false)
    }

    fn apply_setting(
        &mut self,
        setting: &str,
        _show_cursor: bool,
        _startup: bool,
    ) -> Result<bool, io::Error> {
        if let Some(arg) = setting.strip_prefix("ln") {
            crate::command::toggle(&mut self.line_numbers, arg.chars().next());
            writeln!(self.out, "Line Numbering {}", on_off(self.line_numbers))?;
        } else if let Some(arg) = setting.strip_prefix("lt") {
            crate::command::toggle(&mut self.line_types, arg.chars().next());
            writeln!(self.out, "Line-Type display {}", on_off(self.line_types))?;
        } else if setting == "set" {
            writeln!(self.out, "Line Numbering {}", on_off(self.line_numbers))?;
            writeln!(self.out, "Line-Type display {}", on_off(self.line_types))?;
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    fn rows(&self) -> u16 {
        self.height()
    }
}

/// Screen that writes down everything it is asked to do; for tests.
#[derive(Debug, Default)]
pub struct DummyScreen {
    pub rows: u16,
    pub story: String,
    pub output: String,
    pub warnings: Vec<String>,
    pub prompts: Vec<char>,
    pub echoed: Vec<String>,
    pub discarded: Vec<usize>,
    pub settings: Vec<String>,
    pub known_settings: Vec<&'static str>,
    pub shows: usize,
    pub dumps: usize,
    pub elided: usize,
}

impl DummyScreen {
    pub fn new() -> Self {
        DummyScreen {
            rows: 24,
            known_settings: vec!["ln", "lt", "set"],
            ..Default::default()
        }
    }
}

impl Screen for DummyScreen {
    fn put_str(&mut self, text: &str) -> Result<(), io::Error> {
        self.story.push_str(text);
        Ok(())
    }

    fn show_screen(&mut self, _show_cursor: bool) -> Result<(), io::Error> {
        self.shows += 1;
        Ok(())
    }

    fn show_prompt(&mut self, _show_cursor: bool, glyph: char) -> Result<(), io::Error> {
        self.prompts.push(glyph);
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), io::Error> {
        self.output.push_str(text);
        Ok(())
    }

    fn warn(&mut self, text: &str) -> Result<(), io::Error> {
        self.warnings.push(text.to_string());
        Ok(())
    }

    fn display_user_input(&mut self, input: &[ZChar]) -> Result<(), io::Error> {
        let text = input
            .iter()
            .map(|c| char::from_u32(u32::from(*c)).unwrap_or('?'))
            .collect();
        self.echoed.push(text);
        Ok(())
    }

    fn discard_old_input(&mut self, count: usize) -> Result<(), io::Error> {
        self.discarded.push(count);
        Ok(())
    }

    fn dump_screen(&mut self) -> Result<(), io::Error> {
        self.dumps += 1;
        Ok(())
    }

    fn elide_more_prompt(&mut self) -> Result<(), io::Error> {
        self.elided += 1;
        Ok(())
    }

    fn apply_setting(
        &mut self,
        setting: &str,
        _show_cursor: bool,
        _startup: bool,
    ) -> Result<bool, io::Error> {
        self.settings.push(setting.to_string());
        Ok(self
            .known_settings
            .iter()
            .any(|k| setting.starts_with(k)))
    }

    fn rows(&self) -> u16 {
        self.rows
    }
}

/// handy for turning a stream-form line back into text, e.g. for logging
pub fn stream_text(bytes: &[u8]) -> String {
    decode_all(bytes)
        .into_iter()
        .map(|c| char::from_u32(u32::from(c)).unwrap_or('?'))
        .collect()
}
