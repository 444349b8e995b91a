//! # commands
//!
//! Lines that start with the marker and then a lowercase letter are
//! instructions to the front end rather than input for the story:
//!
//! ```text
//!   \help  \set  \s  \d  \wN  \w  \t  \sfX  \mp[0|1]  + screen settings
//! ```
//!
//! Everything else, including marker + uppercase/punctuation, is data and
//! goes to the escape translator.
use crate::escape::MARKER;

pub const USAGE: &str = "\
Runtime help:
  General Commands:
    \\help    Show this message.
    \\set     Show the current values of runtime settings.
    \\s       Show the current contents of the whole screen.
    \\d       Discard the part of the input before the cursor.
    \\wN      Advance clock N/10 seconds, possibly causing the current
                and subsequent inputs to timeout.
    \\w       Advance clock by the amount of real time since this input
                started (times the current speed factor).
    \\t       Advance clock just enough to timeout the current input
  Settings:
    \\sfX     Set speed factor to X.  (0 = never timeout automatically).
    \\mp      Toggle use of MORE prompts
    \\ln      Toggle display of line numbers.
    \\lt      Toggle display of the line type identification chars.
    (Toggle commands can be followed by a 1 or 0 to set value ON or OFF.)
  Character Escapes:
    \\\\  backslash    \\?  backspace    \\[  escape    \\_  return
    \\^ \\. \\< \\>  cursor up, down, left, right
    \\1 ..\\0  f1..f10
    \\R \\P \\S \\U \\N \\X \\D \\H  hotkeys: record, playback, seed, undo,
                              restart, quit, debug, help
  Line Type Identification Characters:
    Input lines:
      untimed  timed
      >        T      A regular line-oriented input
      )        t      A single-character input
      }        D      A line input with some input before the cursor.
                         (Use \\d to discard it.)
    Output lines:
      ]     Output line that contains the cursor.
            (blank) Any other output line.
";

pub const HELP_MORE: &str = "HELP: Type <return> for more, or q <return> to stop: ";

/// Is this raw line (terminator included) a command?
pub fn is_command(line: &[u8]) -> bool {
    line.first() == Some(&MARKER)
        && match line.get(1) {
            None => true,
            Some(b) => b.is_ascii_lowercase(),
        }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `t`
    Timeout,
    /// `w` / `wN`; `None` means "however long it's been"
    Wait(Option<u32>),
    /// `d`
    Discard,
    /// `help`
    Help,
    /// `s`
    Dump,
    /// anything else is a setting, ours or the screen's
    Setting(String),
}

/// Strip the marker and terminator from a command line and work out
/// what it asks for.
pub fn parse(line: &[u8]) -> Command {
    let body = line.strip_prefix(&[MARKER]).unwrap_or(line);
    let body = body.strip_suffix(b"\n").unwrap_or(body);
    let text = String::from_utf8_lossy(body).into_owned();
    match text.as_str() {
        "t" => Command::Timeout,
        "d" => Command::Discard,
        "help" => Command::Help,
        "s" => Command::Dump,
        _ if text.starts_with('w') => {
            Command::Wait(leading_int(&text[1..]).filter(|n| *n > 0))
        }
        _ => Command::Setting(text),
    }
}

fn numeric_prefix(s: &str, allow: impl Fn(usize, char) -> bool) -> &str {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(i, c)| !allow(*i, *c))
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

/// the digits at the start of `s`, if any
pub fn leading_int(s: &str) -> Option<u32> {
    numeric_prefix(s, |_, c| c.is_ascii_digit()).parse().ok()
}

/// the longest prefix of `s` that reads as a float, or 0
pub fn leading_float(s: &str) -> f32 {
    let prefix = numeric_prefix(s, |i, c| {
        c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))
    });
    // "1.5." and the like: back off until it parses
    let mut end = prefix.len();
    while end > 0 {
        if let Ok(v) = prefix[..end].parse() {
            return v;
        }
        end -= 1;
    }
    0.0
}

/// `1` turns on, `0` turns off, anything else flips
pub fn toggle(var: &mut bool, val: Option<char>) {
    *var = val == Some('1') || (val != Some('0') && !*var);
}

fn on_off(v: bool) -> &'static str {
    if v {
        "ON"
    } else {
        "OFF"
    }
}

/// The settings input handling owns itself.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSettings {
    pub speed: f32,
    pub more_prompts: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        InputSettings {
            speed: 1.0,
            more_prompts: false,
        }
    }
}

/// What applying a setting string to [`InputSettings`] came to.
#[derive(Debug, PartialEq)]
pub enum Applied {
    /// ours; here's what to tell the user
    Done(String),
    /// ours, but the value was no good
    Rejected(String),
    /// not ours; pass it on, after printing the report if there is one
    Delegate(Option<String>),
}

impl InputSettings {
    pub fn report(&self) -> String {
        format!(
            "Speed Factor {}\nMore Prompts {}\n",
            self.speed,
            on_off(self.more_prompts)
        )
    }

    pub fn apply(&mut self, setting: &str) -> Applied {
        if let Some(arg) = setting.strip_prefix("sf") {
            let speed = leading_float(arg);
            if speed < 0.0 {
                return Applied::Rejected(format!("speed factor can't be negative: {}", arg));
            }
            self.speed = speed;
            Applied::Done(format!("Speed Factor {}\n", self.speed))
        } else if let Some(arg) = setting.strip_prefix("mp") {
            toggle(&mut self.more_prompts, arg.chars().next());
            Applied::Done(format!("More prompts {}\n", on_off(self.more_prompts)))
        } else if setting == "set" {
            Applied::Delegate(Some(self.report()))
        } else {
            Applied::Delegate(None)
        }
    }
}

/// Split `text` into pages of at most `rows - 2` lines, for showing the
/// help on a screen `rows` tall with room for the prompt.
pub fn paginate(text: &str, rows: u16) -> Vec<&str> {
    let per_page = usize::from(rows.saturating_sub(2)).max(1);
    let mut pages = Vec::new();
    let mut start = 0;
    let mut lines = 0;
    for (i, _) in text.match_indices('\n') {
        lines += 1;
        if lines == per_page {
            pages.push(&text[start..=i]);
            start = i + 1;
            lines = 0;
        }
    }
    if start < text.len() {
        pages.push(&text[start..]);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(is_command(b"\\help\n"));
        assert!(is_command(b"\\w30\n"));
        assert!(is_command(b"\\"));
        assert!(!is_command(b"\\H\n"));
        assert!(!is_command(b"\\\n"));
        assert!(!is_command(b"\\1\n"));
        assert!(!is_command(b"help\n"));
        assert!(!is_command(b""));
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse(b"\\t\n"), Command::Timeout);
        assert_eq!(parse(b"\\d\n"), Command::Discard);
        assert_eq!(parse(b"\\help\n"), Command::Help);
        assert_eq!(parse(b"\\s\n"), Command::Dump);
        assert_eq!(parse(b"\\w30\n"), Command::Wait(Some(30)));
        assert_eq!(parse(b"\\w\n"), Command::Wait(None));
        assert_eq!(parse(b"\\w0\n"), Command::Wait(None));
        assert_eq!(parse(b"\\sf2.0\n"), Command::Setting("sf2.0".to_string()));
        assert_eq!(parse(b"\\set\n"), Command::Setting("set".to_string()));
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("2.0"), 2.0);
        assert_eq!(leading_float("0.5x"), 0.5);
        assert_eq!(leading_float("1.5.2"), 1.5);
        assert_eq!(leading_float("fast"), 0.0);
        assert_eq!(leading_float(""), 0.0);
        assert_eq!(leading_float("-3"), -3.0);
    }

    #[test]
    fn test_toggle() {
        let mut v = false;
        toggle(&mut v, None);
        assert!(v);
        toggle(&mut v, None);
        assert!(!v);
        toggle(&mut v, Some('1'));
        assert!(v);
        toggle(&mut v, Some('1'));
        assert!(v);
        toggle(&mut v, Some('0'));
        assert!(!v);
    }

    #[test]
    fn test_apply_speed() {
        let mut s = InputSettings::default();
        assert_eq!(s.apply("sf2.5"), Applied::Done("Speed Factor 2.5\n".to_string()));
        assert_eq!(s.speed, 2.5);
        assert!(matches!(s.apply("sf-1"), Applied::Rejected(_)));
        assert_eq!(s.speed, 2.5);
        assert_eq!(s.apply("sf0"), Applied::Done("Speed Factor 0\n".to_string()));
    }

    #[test]
    fn test_apply_more_prompts() {
        let mut s = InputSettings::default();
        assert_eq!(s.apply("mp"), Applied::Done("More prompts ON\n".to_string()));
        assert_eq!(s.apply("mp1"), Applied::Done("More prompts ON\n".to_string()));
        assert_eq!(s.apply("mp0"), Applied::Done("More prompts OFF\n".to_string()));
    }

    #[test]
    fn test_apply_set_and_others() {
        let mut s = InputSettings::default();
        assert_eq!(
            s.apply("set"),
            Applied::Delegate(Some("Speed Factor 1\nMore Prompts OFF\n".to_string()))
        );
        assert_eq!(s.apply("ln"), Applied::Delegate(None));
    }

    #[test]
    fn test_paginate() {
        let text = "1\n2\n3\n4\n5\n";
        assert_eq!(paginate(text, 4), vec!["1\n2\n", "3\n4\n", "5\n"]);
        assert_eq!(paginate(text, 100), vec![text]);
        // too short a screen still makes progress
        assert_eq!(paginate("a\nb\n", 1), vec!["a\n", "b\n"]);
        assert_eq!(paginate(USAGE, 24).concat(), USAGE);
    }
}
