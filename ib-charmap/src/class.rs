//! Predefined character classes.
use crate::map::CharMap;

pub static LOWERCASE: CharMap = CharMap::from_range(b'a', b'z');

pub static UPPERCASE: CharMap = CharMap::from_range(b'A', b'Z');

pub static DIGITS: CharMap = CharMap::from_range(b'0', b'9');

pub static HEX_DIGITS: CharMap = CharMap::from_range(b'0', b'9')
    .union(CharMap::from_range(b'a', b'f'))
    .union(CharMap::from_range(b'A', b'F'));

/// The same set as [`u8::is_ascii_whitespace()`]: space, `\t`, `\n`, `\x0C` and `\r`.
pub static ASCII_WHITESPACE: CharMap = CharMap::from_bytes(b" \t\n\x0C\r");

/// All bytes `< 0x80`.
pub static ASCII: CharMap = CharMap::from_range(0, 0x7F);
