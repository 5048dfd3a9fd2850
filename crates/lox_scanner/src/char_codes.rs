//! Character classes recognised by the scanner.
//!
//! Lox source is classified byte by byte: every character that can begin or
//! continue a lexeme is ASCII, so anything else is an unexpected character.

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const TAB: u8 = b'\t';
pub const SPACE: u8 = b' ';
pub const DOUBLE_QUOTE: u8 = b'"';
pub const DOT: u8 = b'.';
pub const EQUALS: u8 = b'=';
pub const SLASH: u8 = b'/';

/// Whitespace that produces no token and does not end a line.
#[inline]
pub fn is_white_space_single_line(ch: u8) -> bool {
    matches!(ch, SPACE | CARRIAGE_RETURN | TAB)
}

#[inline]
pub fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Check if a character can be part of an identifier.
#[inline]
pub fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start(b'_'));
        assert!(is_identifier_start(b'z'));
        assert!(!is_identifier_start(b'7'));
        assert!(is_identifier_part(b'7'));
        assert!(!is_identifier_part(b'$'));
        assert!(!is_identifier_part(0xC3));
    }

    #[test]
    fn test_white_space() {
        assert!(is_white_space_single_line(b' '));
        assert!(is_white_space_single_line(b'\r'));
        assert!(is_white_space_single_line(b'\t'));
        assert!(!is_white_space_single_line(b'\n'));
        assert!(!is_white_space_single_line(0x0B));
    }
}
