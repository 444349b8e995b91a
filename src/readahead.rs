use crate::decode::decode;
use crate::zchar::{self, ZChar};

/// Input typed ahead of what the story has asked for.
///
/// A line read for a single key leaves the rest of the line for the next
/// keys; a line read for line input leaves whatever followed the first
/// terminator (e.g. `look\Uinventory`) for the next line. Asking for the
/// other kind of input throws the read-ahead away, so there is only ever
/// one of the two.
///
/// Both hold the translated byte stream; characters are decoded as they
/// are taken.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ReadAhead {
    #[default]
    Empty,
    Key(Vec<u8>),
    Line(Vec<u8>),
}

impl ReadAhead {
    pub fn has_keys(&self) -> bool {
        matches!(self, ReadAhead::Key(b) if !b.is_empty())
    }

    pub fn has_line(&self) -> bool {
        matches!(self, ReadAhead::Line(b) if !b.is_empty())
    }

    /// drop line read-ahead; key read-ahead survives
    pub fn drop_line(&mut self) {
        if let ReadAhead::Line(_) = self {
            log::debug!("discarding line read-ahead");
            *self = ReadAhead::Empty;
        }
    }

    /// drop key read-ahead; line read-ahead survives
    pub fn drop_keys(&mut self) {
        if let ReadAhead::Key(_) = self {
            log::debug!("discarding key read-ahead");
            *self = ReadAhead::Empty;
        }
    }

    /// Take the next key, if there is one. Anything held for line input
    /// is lost.
    pub fn next_key(&mut self) -> Option<ZChar> {
        let ReadAhead::Key(bytes) = self else {
            *self = ReadAhead::Empty;
            return None;
        };
        if bytes.is_empty() {
            *self = ReadAhead::Empty;
            return None;
        }
        let (ch, next) = decode(bytes, 0);
        bytes.drain(..next.min(bytes.len()));
        if bytes.is_empty() {
            *self = ReadAhead::Empty;
        }
        Some(ch)
    }

    /// Take everything up to the first terminator.
    ///
    /// Returns the characters before it and the terminator; the rest is
    /// kept for next time, unless it's nothing but a RETURN. Running out
    /// of input counts as a RETURN.
    pub fn next_line(&mut self, is_terminator: &dyn Fn(ZChar) -> bool) -> (Vec<ZChar>, ZChar) {
        let bytes = match std::mem::take(self) {
            ReadAhead::Line(b) => b,
            _ => Vec::new(),
        };
        let mut chars = Vec::new();
        let mut idx = 0;
        let mut terminator = zchar::RETURN;
        while idx < bytes.len() {
            let (ch, next) = decode(&bytes, idx);
            idx = next;
            if is_terminator(ch) {
                terminator = ch;
                break;
            }
            chars.push(ch);
        }
        let rest = &bytes[idx.min(bytes.len())..];
        if !rest.is_empty() && rest != [zchar::RETURN as u8] {
            *self = ReadAhead::Line(rest.to_vec());
        }
        (chars, terminator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::translate;
    use crate::zchar::is_default_terminator;

    fn z(s: &str) -> Vec<ZChar> {
        s.bytes().map(ZChar::from).collect()
    }

    #[test]
    fn test_keys_one_at_a_time() {
        let mut ra = ReadAhead::Key(b"ab".to_vec());
        assert_eq!(ra.next_key(), Some(b'a' as ZChar));
        assert_eq!(ra, ReadAhead::Key(b"b".to_vec()));
        assert_eq!(ra.next_key(), Some(b'b' as ZChar));
        assert_eq!(ra, ReadAhead::Empty);
        assert_eq!(ra.next_key(), None);
    }

    #[test]
    fn test_multibyte_key() {
        let mut ra = ReadAhead::Key("éx".as_bytes().to_vec());
        assert_eq!(ra.next_key(), Some(0xe9));
        assert_eq!(ra.next_key(), Some(b'x' as ZChar));
    }

    #[test]
    fn test_key_read_drops_line() {
        let mut ra = ReadAhead::Line(b"look\r".to_vec());
        assert_eq!(ra.next_key(), None);
        assert_eq!(ra, ReadAhead::Empty);
    }

    #[test]
    fn test_line_split_on_hotkey() {
        let mut ra = ReadAhead::Line(translate(b"look\\Uinventory\n").bytes);
        let (chars, term) = ra.next_line(&is_default_terminator);
        assert_eq!(chars, z("look"));
        assert_eq!(term, zchar::HKEY_UNDO);
        assert!(ra.has_line());
        let (chars, term) = ra.next_line(&is_default_terminator);
        assert_eq!(chars, z("inventory"));
        assert_eq!(term, zchar::RETURN);
        assert_eq!(ra, ReadAhead::Empty);
    }

    #[test]
    fn test_bare_return_remainder_dropped() {
        let mut ra = ReadAhead::Line(translate(b"quit\\X\n").bytes);
        let (chars, term) = ra.next_line(&is_default_terminator);
        assert_eq!(chars, z("quit"));
        assert_eq!(term, zchar::HKEY_QUIT);
        assert_eq!(ra, ReadAhead::Empty);
    }

    #[test]
    fn test_remainder_kept_unless_bare_return() {
        let mut ra = ReadAhead::Line(b"a\r\r".to_vec());
        ra.next_line(&is_default_terminator);
        assert_eq!(ra, ReadAhead::Empty);
        let mut ra = ReadAhead::Line(b"a\rb\r".to_vec());
        ra.next_line(&is_default_terminator);
        assert_eq!(ra, ReadAhead::Line(b"b\r".to_vec()));
    }

    #[test]
    fn test_drops_are_kind_specific() {
        let mut ra = ReadAhead::Key(b"x".to_vec());
        ra.drop_line();
        assert!(ra.has_keys());
        ra.drop_keys();
        assert_eq!(ra, ReadAhead::Empty);
    }
}
