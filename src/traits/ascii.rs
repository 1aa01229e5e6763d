// traits/ascii.rs - Narrow (single-byte) character traits.
// Only code points below 128 carry a classification; the domain is 0..=255.

use super::{is_newline_char, ClassMask, RegexTraits};

// === ASCII Traits Struct ===
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiTraits;

impl RegexTraits for AsciiTraits {
    fn narrow(&self) -> bool {
        true
    }

    fn translate(&self, ch: char) -> char {
        ch
    }

    fn translate_nocase(&self, ch: char) -> char {
        ch.to_ascii_lowercase()
    }

    fn class_of(&self, ch: char) -> ClassMask {
        let mut mask = ClassMask::empty();
        if !ch.is_ascii() {
            return mask;
        }
        if is_newline_char(ch) {
            mask |= ClassMask::NEWLINE;
        }
        if ch.is_ascii_alphabetic() {
            mask |= ClassMask::ALPHA;
        }
        if ch == ' ' || ch == '\t' {
            mask |= ClassMask::BLANK;
        }
        if ch.is_ascii_control() {
            mask |= ClassMask::CNTRL;
        }
        if ch.is_ascii_digit() {
            mask |= ClassMask::DIGIT;
        }
        if ch.is_ascii_graphic() {
            mask |= ClassMask::GRAPH | ClassMask::PRINT;
        }
        if ch == ' ' {
            mask |= ClassMask::PRINT;
        }
        if ch.is_ascii_lowercase() {
            mask |= ClassMask::LOWER;
        }
        if ch.is_ascii_uppercase() {
            mask |= ClassMask::UPPER;
        }
        if ch.is_ascii_punctuation() {
            mask |= ClassMask::PUNCT;
        }
        if ch.is_ascii_whitespace() || ch == '\u{0b}' {
            mask |= ClassMask::SPACE;
        }
        if ch.is_ascii_hexdigit() {
            mask |= ClassMask::XDIGIT;
        }
        if ch == '_' {
            mask |= ClassMask::UNDERSCORE;
        }
        mask
    }

    fn in_range_nocase(&self, first: char, last: char, ch: char) -> bool {
        let range = first..=last;
        range.contains(&ch)
            || range.contains(&ch.to_ascii_lowercase())
            || range.contains(&ch.to_ascii_uppercase())
    }
}
