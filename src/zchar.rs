/// Internal key codes, as the story machine expects them.
///
/// Printable ASCII maps to itself; everything the console can't type
/// directly (cursor keys, function keys, hotkeys) lives in the control
/// ranges below 0x20 or between 0x80 and 0x9f.
pub type ZChar = u16;

pub const TIME_OUT: ZChar = 0x00;
pub const BACKSPACE: ZChar = 0x08;
pub const RETURN: ZChar = 0x0d;
pub const ESCAPE: ZChar = 0x1b;

/// hotkeys: named interpreter actions rather than text
pub const HKEY_RECORD: ZChar = 0x0e;
pub const HKEY_PLAYBACK: ZChar = 0x0f;
pub const HKEY_SEED: ZChar = 0x10;
pub const HKEY_UNDO: ZChar = 0x11;
pub const HKEY_RESTART: ZChar = 0x12;
pub const HKEY_QUIT: ZChar = 0x13;
pub const HKEY_DEBUG: ZChar = 0x14;
pub const HKEY_HELP: ZChar = 0x15;
pub const HKEY_MIN: ZChar = HKEY_RECORD;
pub const HKEY_MAX: ZChar = HKEY_HELP;

pub const ARROW_UP: ZChar = 0x81;
pub const ARROW_DOWN: ZChar = 0x82;
pub const ARROW_LEFT: ZChar = 0x83;
pub const ARROW_RIGHT: ZChar = 0x84;

pub const FKEY_F1: ZChar = 0x85;
pub const FKEY_F2: ZChar = 0x86;
pub const FKEY_F3: ZChar = 0x87;
pub const FKEY_F4: ZChar = 0x88;
pub const FKEY_F5: ZChar = 0x89;
pub const FKEY_F6: ZChar = 0x8a;
pub const FKEY_F7: ZChar = 0x8b;
pub const FKEY_F8: ZChar = 0x8c;
pub const FKEY_F9: ZChar = 0x8d;
pub const FKEY_F10: ZChar = 0x8e;
pub const FKEY_F11: ZChar = 0x8f;
pub const FKEY_F12: ZChar = 0x90;

/// what the decoder hands back when the input is garbage
pub const REPLACEMENT: ZChar = b'?' as ZChar;

pub fn is_hotkey(c: ZChar) -> bool {
    (HKEY_MIN..=HKEY_MAX).contains(&c)
}

/// Line terminators when the story hasn't installed its own table:
/// return, and any hotkey so that e.g. `\U` on its own line reaches the
/// interpreter as an undo request.
pub fn is_default_terminator(c: ZChar) -> bool {
    c == RETURN || is_hotkey(c)
}

/// append the stream form of an internal code to `out`
///
/// codes are carried through the byte stream as the UTF-8 encoding of
/// the matching code point, so the decoder gives back exactly `c`
pub fn push_code(out: &mut Vec<u8>, c: ZChar) {
    let ch = char::from_u32(u32::from(c)).unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut tmp = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotkey_range() {
        assert!(is_hotkey(HKEY_UNDO));
        assert!(!is_hotkey(RETURN));
        assert!(!is_hotkey(FKEY_F1));
    }

    #[test]
    fn test_default_terminators() {
        assert!(is_default_terminator(RETURN));
        assert!(is_default_terminator(HKEY_QUIT));
        assert!(!is_default_terminator(b'a' as ZChar));
        assert!(!is_default_terminator(ARROW_UP));
    }

    #[test]
    fn test_push_code_widths() {
        let mut out = Vec::new();
        push_code(&mut out, RETURN);
        assert_eq!(out, [0x0d]);
        out.clear();
        push_code(&mut out, ARROW_UP);
        assert_eq!(out, [0xc2, 0x81]);
        out.clear();
        push_code(&mut out, FKEY_F10);
        assert_eq!(out, [0xc2, 0x8e]);
    }
}
