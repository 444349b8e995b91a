//! # session
//!
//! One input session per story run. It owns the state that outlives a
//! single read: the time bank, the speed factor, the read-ahead, and
//! whether the last line read timed out.
//!
//! Every read the story asks for goes through [`InputSession::read_raw_line`],
//! which prompts, reads whole lines from the console, runs commands until
//! a data line turns up, translates it and does the timeout sums.
use crate::budget::{simulated_tenths, Charge, Start, TimeBudget};
use crate::clock::Clock;
use crate::command::{self, Applied, Command, InputSettings, HELP_MORE, USAGE};
use crate::display::{stream_text, Screen};
use crate::error::InputError;
use crate::escape;
use crate::header::{Config, Flags, StoryHeader};
use crate::input::Console;
use crate::readahead::ReadAhead;
use crate::zchar::{self, ZChar};
use std::path::PathBuf;

/// longest raw line, terminator included, is one less than this
pub const INPUT_BUFFER_SIZE: usize = 200;

/// most characters a line read will hand back
pub const LINE_CAPACITY: usize = INPUT_BUFFER_SIZE - 2;

/// What the story is waiting for. Decides the prompt, and whether `\d`
/// has anything to discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Key,
    Line,
    /// a line read picking up input typed before an earlier timeout
    LineContinued,
}

impl InputType {
    pub fn glyph(self, timed: bool) -> char {
        match (self, timed) {
            (InputType::Key, false) => ')',
            (InputType::Line, false) => '>',
            (InputType::LineContinued, false) => '}',
            (InputType::Key, true) => 't',
            (InputType::Line, true) => 'T',
            (InputType::LineContinued, true) => 'D',
        }
    }
}

/// Start-up settings for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub speed: f32,
    pub more_prompts: bool,
    /// keep every file inside this directory
    pub restricted_path: Option<PathBuf>,
    /// a restore is already under way; file names are not asked for
    pub restore_mode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            speed: 1.0,
            more_prompts: false,
            restricted_path: None,
            restore_mode: false,
        }
    }
}

/// a line as it came back from the read loop
struct RawLine {
    /// stream form; empty when the timeout was forced
    bytes: Vec<u8>,
    timed_out: bool,
}

impl RawLine {
    fn expired() -> Self {
        RawLine {
            bytes: Vec::new(),
            timed_out: true,
        }
    }
}

pub struct InputSession<'a> {
    console: &'a mut dyn Console,
    pub(crate) screen: &'a mut dyn Screen,
    clock: &'a dyn Clock,
    settings: InputSettings,
    budget: TimeBudget,
    ahead: ReadAhead,
    last_timed_out: bool,
    pub(crate) restricted_path: Option<PathBuf>,
    pub(crate) restore_mode: bool,
    is_terminator: Box<dyn Fn(ZChar) -> bool>,
}

impl<'a> InputSession<'a> {
    pub fn new(
        console: &'a mut dyn Console,
        screen: &'a mut dyn Screen,
        clock: &'a dyn Clock,
        config: SessionConfig,
    ) -> InputSession<'a> {
        InputSession {
            console,
            screen,
            clock,
            settings: InputSettings {
                speed: config.speed,
                more_prompts: config.more_prompts,
            },
            budget: TimeBudget::new(),
            ahead: ReadAhead::Empty,
            last_timed_out: false,
            restricted_path: config.restricted_path,
            restore_mode: config.restore_mode,
            is_terminator: Box::new(zchar::is_default_terminator),
        }
    }

    /// use the story's own set of line terminators
    pub fn set_terminators(&mut self, is_terminator: impl Fn(ZChar) -> bool + 'static) {
        self.is_terminator = Box::new(is_terminator);
    }

    pub fn set_restore_mode(&mut self, on: bool) {
        self.restore_mode = on;
    }

    pub fn speed(&self) -> f32 {
        self.settings.speed
    }

    pub fn more_prompts(&self) -> bool {
        self.settings.more_prompts
    }

    /// tenths of a second the user is ahead of the story
    pub fn time_ahead(&self) -> u32 {
        self.budget.ahead()
    }

    pub fn read_ahead(&self) -> &ReadAhead {
        &self.ahead
    }

    /// the screen the session prompts on, for the story's own output
    pub fn screen(&mut self) -> &mut dyn Screen {
        &mut *self.screen
    }

    /// Tell the story what this front end can do.
    pub fn init_input(&self, header: &mut StoryHeader) {
        if header.version >= 4 && self.settings.speed != 0.0 {
            header.config |= Config::TIMED_INPUT;
        }
        if header.version >= 5 {
            header.flags.remove(Flags::MOUSE | Flags::MENU);
        }
        log::debug!("header after input init: {:?}", header);
    }

    /// Apply a setting, from the command line at startup or from a
    /// command at runtime. Returns false if neither input handling nor
    /// the screen knows it.
    pub fn apply_setting(
        &mut self,
        setting: &str,
        show_cursor: bool,
        startup: bool,
    ) -> Result<bool, InputError> {
        match self.settings.apply(setting) {
            Applied::Done(msg) => {
                self.screen.print(&msg)?;
                Ok(true)
            }
            Applied::Rejected(msg) => {
                self.screen.warn(&msg)?;
                Ok(true)
            }
            Applied::Delegate(report) => {
                if let Some(report) = report {
                    self.screen.print(&report)?;
                }
                Ok(self.screen.apply_setting(setting, show_cursor, startup)?)
            }
        }
    }

    /// One line straight from the console, no commands, no timing, no
    /// read-ahead. Overlong lines are cut short.
    pub(crate) fn read_console_line(&mut self) -> Result<Vec<u8>, InputError> {
        let mut line = self.console.read_line()?.ok_or(InputError::EndOfInput)?;
        if line.len() > INPUT_BUFFER_SIZE - 1 {
            line.truncate(INPUT_BUFFER_SIZE - 2);
            line.push(b'\n');
            self.screen.print(&format!(
                "Line too long, truncated to {}",
                String::from_utf8_lossy(&line)
            ))?;
        }
        Ok(line)
    }

    /// Read until a data line turns up, carrying out any commands on the
    /// way. Returns the translated line, or an empty one if a command
    /// forced a timeout.
    fn read_raw_line(
        &mut self,
        prompt: Option<&str>,
        show_cursor: bool,
        timeout: u32,
        mut kind: InputType,
        mut continued: Option<&mut Vec<ZChar>>,
    ) -> Result<RawLine, InputError> {
        let mut remaining = match self.budget.begin(timeout) {
            Start::Expired => return Ok(RawLine::expired()),
            Start::Untimed => 0,
            Start::Wait(tenths) => tenths,
        };
        let mut started = self.clock.now();

        self.screen.show_screen(show_cursor)?;
        loop {
            match prompt {
                Some(p) => self.screen.print(p)?,
                None => self.screen.show_prompt(show_cursor, kind.glyph(remaining != 0))?,
            }
            let line = self.read_console_line()?;

            if !command::is_command(&line) {
                let t = escape::translate(&line);
                for c in t.unknown {
                    self.screen.warn(&format!("unknown escape char: {}", c))?;
                    self.screen.warn("Enter \\help to see the list")?;
                }
                let mut timed_out = false;
                if remaining != 0 {
                    let real = self.clock.now().saturating_sub(started);
                    let elapsed = simulated_tenths(real, self.settings.speed);
                    timed_out = matches!(
                        self.budget.settle(elapsed, remaining),
                        Charge::TimedOut { .. }
                    );
                }
                log::debug!("data line {:?}, timed out: {}", stream_text(&t.bytes), timed_out);
                return Ok(RawLine {
                    bytes: t.bytes,
                    timed_out,
                });
            }

            let cmd = command::parse(&line);
            log::debug!("command {:?}", cmd);
            match cmd {
                Command::Timeout => {
                    if remaining != 0 {
                        self.budget.force();
                        return Ok(RawLine::expired());
                    }
                }
                Command::Wait(tenths) => {
                    if remaining != 0 {
                        let now = self.clock.now();
                        let elapsed = tenths.unwrap_or_else(|| {
                            simulated_tenths(now.saturating_sub(started), self.settings.speed)
                        });
                        match self.budget.settle(elapsed, remaining) {
                            Charge::TimedOut { .. } => return Ok(RawLine::expired()),
                            Charge::Remaining(left) => {
                                remaining = left;
                                started = now;
                            }
                        }
                    }
                }
                Command::Discard => match continued.as_deref_mut() {
                    Some(chars) if kind == InputType::LineContinued => {
                        self.screen.discard_old_input(chars.len())?;
                        chars.clear();
                        kind = InputType::Line;
                    }
                    _ => self.screen.warn("No input to discard")?,
                },
                Command::Help => self.show_help()?,
                Command::Dump => self.screen.dump_screen()?,
                Command::Setting(setting) => {
                    if !self.apply_setting(&setting, show_cursor, false)? {
                        let text = String::from_utf8_lossy(&line);
                        self.screen
                            .warn(&format!("unknown command: {}", text.trim_end()))?;
                        self.screen.warn("Enter \\help to see the list of commands")?;
                    }
                }
            }
        }
    }

    /// The usage text, a page at a time if more prompts are on. The
    /// page prompts read straight from the console; the read-ahead is
    /// busy with the read that's in progress.
    fn show_help(&mut self) -> Result<(), InputError> {
        if !self.settings.more_prompts {
            self.screen.print(USAGE)?;
            return Ok(());
        }
        let pages = command::paginate(USAGE, self.screen.rows());
        for (i, page) in pages.iter().enumerate() {
            self.screen.print(page)?;
            if i + 1 == pages.len() {
                break;
            }
            self.screen.print(HELP_MORE)?;
            if self.read_console_line()? == b"q\n" {
                break;
            }
        }
        Ok(())
    }

    /// A line that isn't story input (file names, more prompts), without
    /// its terminator.
    pub(crate) fn read_misc_line(&mut self, prompt: &str) -> Result<String, InputError> {
        let mut raw = self.read_raw_line(Some(prompt), false, 0, InputType::Key, None)?;
        if raw.bytes.last() == Some(&(zchar::RETURN as u8)) {
            raw.bytes.pop();
        }
        Ok(stream_text(&raw.bytes))
    }

    /// Read one key, waiting at most `timeout` tenths of a second
    /// (0 for no limit). Returns [`zchar::TIME_OUT`] on timeout.
    ///
    /// A line typed for a key is used up a key at a time, so `abc` on
    /// one line answers three key reads. An empty line is one RETURN.
    pub fn read_key(&mut self, timeout: u32, show_cursor: bool) -> Result<ZChar, InputError> {
        self.ahead.drop_line();

        let timed_out = if self.ahead.has_keys() {
            self.budget.check_cached(timeout)
        } else {
            let mut raw = self.read_raw_line(None, show_cursor, timeout, InputType::Key, None)?;
            // only a line with nothing else on it counts as RETURN
            if raw.bytes.len() > 1 && raw.bytes.last() == Some(&(zchar::RETURN as u8)) {
                raw.bytes.pop();
            }
            if !raw.bytes.is_empty() {
                self.ahead = ReadAhead::Key(raw.bytes);
            }
            raw.timed_out
        };

        if timed_out {
            return Ok(zchar::TIME_OUT);
        }
        Ok(self.ahead.next_key().unwrap_or(zchar::RETURN))
    }

    /// Read a line into `buf`, waiting at most `timeout` tenths of a
    /// second (0 for no limit).
    ///
    /// Anything already in `buf` is input from before a timeout, which
    /// the user may discard with `\d`; `continued` says the story is
    /// carrying on with that same input. Returns the terminating key, or
    /// [`zchar::TIME_OUT`].
    pub fn read_line(
        &mut self,
        max: usize,
        buf: &mut Vec<ZChar>,
        timeout: u32,
        _width: u16,
        continued: bool,
    ) -> Result<ZChar, InputError> {
        self.ahead.drop_keys();
        // after a timeout, input typed for the abandoned line is stale
        if self.last_timed_out && !continued {
            self.ahead.drop_line();
        }

        let timed_out = if self.ahead.has_line() {
            self.budget.check_cached(timeout)
        } else {
            let kind = if buf.is_empty() {
                InputType::Line
            } else {
                InputType::LineContinued
            };
            let raw = self.read_raw_line(None, true, timeout, kind, Some(&mut *buf))?;
            if !raw.bytes.is_empty() {
                self.ahead = ReadAhead::Line(raw.bytes);
            }
            raw.timed_out
        };

        if timed_out {
            self.last_timed_out = true;
            return Ok(zchar::TIME_OUT);
        }

        let (chars, terminator) = self.ahead.next_line(&*self.is_terminator);
        self.screen.display_user_input(&chars)?;

        let capacity = if max == 0 {
            LINE_CAPACITY
        } else {
            max.min(LINE_CAPACITY)
        };
        let room = capacity.saturating_sub(buf.len());
        if chars.len() > room {
            log::debug!("line input cut from {} to {} characters", chars.len(), room);
            let kept: String = chars[..room]
                .iter()
                .map(|c| char::from_u32(u32::from(*c)).unwrap_or('?'))
                .collect();
            self.screen
                .warn(&format!("Input too long, truncated to {}", kept))?;
        }
        buf.extend(chars.into_iter().take(room));

        self.last_timed_out = false;
        Ok(terminator)
    }

    /// Pause until the user has read the screen, if they want that.
    pub fn more_prompt(&mut self) -> Result<(), InputError> {
        if self.settings.more_prompts {
            self.read_misc_line("***MORE***")?;
        } else {
            self.screen.elide_more_prompt()?;
        }
        Ok(())
    }
}
