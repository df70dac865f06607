//! Character Codes
//!
//! Byte constants and classifiers used by the hand-written scanners. All
//! template syntax is ASCII, so scanners walk bytes and only slice the
//! source at ASCII positions.

pub const TAB: u8 = b'\t';
pub const LF: u8 = b'\n';
pub const CR: u8 = b'\r';
pub const SPACE: u8 = b' ';

pub const DQ: u8 = b'"';
pub const HASH: u8 = b'#';
pub const SQ: u8 = b'\'';
pub const LPAREN: u8 = b'(';
pub const RPAREN: u8 = b')';
pub const STAR: u8 = b'*';
pub const MINUS: u8 = b'-';
pub const SLASH: u8 = b'/';
pub const LT: u8 = b'<';
pub const EQ: u8 = b'=';
pub const GT: u8 = b'>';
pub const QUESTION: u8 = b'?';
pub const AT: u8 = b'@';
pub const BACKSLASH: u8 = b'\\';
pub const LBRACE: u8 = b'{';

/// `\s` in the ASCII sense (space, tab, newlines, vertical tab, form feed).
#[inline]
pub fn is_whitespace(code: u8) -> bool {
    matches!(code, SPACE | TAB | LF | CR | 0x0B | 0x0C)
}

#[inline]
pub fn is_quote(code: u8) -> bool {
    code == SQ || code == DQ
}
