use crate::zchar::{self, ZChar};

/// the character that introduces both escapes and commands
pub const MARKER: u8 = b'\\';

/// escape letter to internal code, e.g. `\^` is cursor up
pub const ESCAPES: [(u8, ZChar); 26] = [
    (b'\\', MARKER as ZChar),
    (b'?', zchar::BACKSPACE),
    (b'[', zchar::ESCAPE),
    (b'_', zchar::RETURN),
    (b'^', zchar::ARROW_UP),
    (b'.', zchar::ARROW_DOWN),
    (b'<', zchar::ARROW_LEFT),
    (b'>', zchar::ARROW_RIGHT),
    (b'R', zchar::HKEY_RECORD),
    (b'P', zchar::HKEY_PLAYBACK),
    (b'S', zchar::HKEY_SEED),
    (b'U', zchar::HKEY_UNDO),
    (b'N', zchar::HKEY_RESTART),
    (b'X', zchar::HKEY_QUIT),
    (b'D', zchar::HKEY_DEBUG),
    (b'H', zchar::HKEY_HELP),
    (b'1', zchar::FKEY_F1),
    (b'2', zchar::FKEY_F2),
    (b'3', zchar::FKEY_F3),
    (b'4', zchar::FKEY_F4),
    (b'5', zchar::FKEY_F5),
    (b'6', zchar::FKEY_F6),
    (b'7', zchar::FKEY_F7),
    (b'8', zchar::FKEY_F8),
    (b'9', zchar::FKEY_F9),
    (b'0', zchar::FKEY_F10),
];

fn lookup(letter: u8) -> Option<ZChar> {
    ESCAPES
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, code)| *code)
}

/// the escape sequence a user would type to produce `code`
pub fn sequence_for(code: ZChar) -> Option<String> {
    ESCAPES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(l, _)| format!("\\{}", *l as char))
}

/// Result of translating one data line.
#[derive(Debug, Default, PartialEq)]
pub struct Translation {
    /// the line in stream form; never longer than the input
    pub bytes: Vec<u8>,
    /// escape letters that meant nothing, in order of appearance
    pub unknown: Vec<char>,
}

/// Translate the escapes and the newline in a raw data line.
///
/// A raw newline, and a marker right before one, become RETURN. Unknown
/// escapes are dropped from the output and listed in `unknown` for the
/// caller to complain about.
pub fn translate(line: &[u8]) -> Translation {
    let mut t = Translation {
        bytes: Vec::with_capacity(line.len()),
        unknown: Vec::new(),
    };
    let mut src = line.iter().copied();
    while let Some(b) = src.next() {
        match b {
            b'\n' => zchar::push_code(&mut t.bytes, zchar::RETURN),
            MARKER => match src.next() {
                Some(b'\n') => zchar::push_code(&mut t.bytes, zchar::RETURN),
                Some(letter) => match lookup(letter) {
                    Some(code) => zchar::push_code(&mut t.bytes, code),
                    None => t.unknown.push(letter as char),
                },
                // marker as the very last byte; nothing to escape
                None => t.unknown.push(' '),
            },
            _ => t.bytes.push(b),
        }
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_all;

    #[test]
    fn test_plain_line() {
        let t = translate(b"open door\n");
        assert_eq!(t.bytes, b"open door\r");
        assert!(t.unknown.is_empty());
    }

    #[test]
    fn test_literal_marker_and_return() {
        assert_eq!(translate(b"a\\\\b\\_\n").bytes, b"a\\b\r\r");
    }

    #[test]
    fn test_marker_before_newline_is_return() {
        assert_eq!(translate(b"\\\n").bytes, b"\r");
    }

    #[test]
    fn test_unknown_escape_dropped() {
        let t = translate(b"go \\znorth\n");
        assert_eq!(t.bytes, b"go north\r");
        assert_eq!(t.unknown, vec!['z']);
    }

    #[test]
    fn test_every_escape_round_trips() {
        for (_, code) in ESCAPES.iter() {
            let seq = sequence_for(*code).unwrap();
            let t = translate(seq.as_bytes());
            assert_eq!(decode_all(&t.bytes), vec![*code], "escape {}", seq);
        }
    }

    #[test]
    fn test_never_longer_than_input() {
        let mut line = Vec::new();
        for (letter, _) in ESCAPES.iter() {
            line.push(MARKER);
            line.push(*letter);
        }
        line.extend_from_slice(b"\\q plain text\n");
        assert!(translate(&line).bytes.len() <= line.len());
    }
}
