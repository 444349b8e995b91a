use crate::zchar::{ZChar, REPLACEMENT};

// NB. bytes past the end of the slice read as 0x00, which never passes
//     for a continuation byte

fn byte_at(bytes: &[u8], idx: usize) -> u8 {
    bytes.get(idx).copied().unwrap_or(0)
}

fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

/// Decode the character starting at `bytes[idx]`.
///
/// Returns the internal code and the index of the next character. One,
/// two and three byte sequences are understood; anything else (a stray
/// continuation byte, a four byte lead, a broken sequence) comes back as
/// a single `?`, skipping the whole run of continuation bytes that
/// follows a bad lead byte.
pub fn decode(bytes: &[u8], idx: usize) -> (ZChar, usize) {
    let lead = byte_at(bytes, idx);
    if lead & 0x80 == 0 {
        return (ZChar::from(lead), idx + 1);
    }

    let (mut ch, tail) = if lead & 0xe0 == 0xc0 {
        (ZChar::from(lead & 0x1f), 1)
    } else if lead & 0xf0 == 0xe0 {
        (ZChar::from(lead & 0x0f), 2)
    } else {
        // resynchronise on the next non-continuation byte
        let mut next = idx + 1;
        while is_continuation(byte_at(bytes, next)) {
            next += 1;
        }
        return (REPLACEMENT, next);
    };

    let mut next = idx + 1;
    for _ in 0..tail {
        let b = byte_at(bytes, next);
        if !is_continuation(b) {
            return (REPLACEMENT, next);
        }
        ch = (ch << 6) | ZChar::from(b & 0x3f);
        next += 1;
    }
    (ch, next)
}

/// decode a whole slice; handy for echoing and for tests
pub fn decode_all(bytes: &[u8]) -> Vec<ZChar> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        let (ch, next) = decode(bytes, idx);
        out.push(ch);
        idx = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(decode(b"ab", 0), (b'a' as ZChar, 1));
        assert_eq!(decode(b"ab", 1), (b'b' as ZChar, 2));
    }

    #[test]
    fn test_two_byte() {
        // e with acute
        assert_eq!(decode("é".as_bytes(), 0), (0xe9, 2));
    }

    #[test]
    fn test_three_byte() {
        // euro sign
        assert_eq!(decode("€x".as_bytes(), 0), (0x20ac, 3));
    }

    #[test]
    fn test_stray_continuation_run_is_one_replacement() {
        let bytes: &[u8] = &[0x80, 0x81, 0xbf, b'a'];
        assert_eq!(decode(bytes, 0), (REPLACEMENT, 3));
        assert_eq!(decode_all(bytes), vec![REPLACEMENT, b'a' as ZChar]);
    }

    #[test]
    fn test_four_byte_lead_is_skipped_whole() {
        // four byte forms are not supported
        let bytes = "😀z".as_bytes();
        assert_eq!(decode_all(bytes), vec![REPLACEMENT, b'z' as ZChar]);
    }

    #[test]
    fn test_truncated_sequence() {
        let bytes: &[u8] = &[0xe2, 0x82, b'q'];
        assert_eq!(decode(bytes, 0), (REPLACEMENT, 2));
        assert_eq!(decode(bytes, 2), (b'q' as ZChar, 3));
    }

    #[test]
    fn test_sequence_cut_by_end_of_slice() {
        assert_eq!(decode(&[0xc3], 0), (REPLACEMENT, 1));
    }

    #[test]
    fn test_every_bad_lead_yields_one_replacement() {
        for lead in (0x80u8..0xc0).chain(0xf0..=0xff) {
            let bytes = [lead, 0x80, 0x80, b'!'];
            assert_eq!(decode_all(&bytes), vec![REPLACEMENT, b'!' as ZChar], "lead {:02x}", lead);
        }
    }
}
