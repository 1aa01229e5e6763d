// traits/unicode.rs - Wide character traits backed by the standard Unicode tables.

use super::{is_newline_char, ClassMask, RegexTraits};

#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTraits;

/// Single-character lowercase mapping, or `ch` itself when the mapping expands.
fn simple_lower(ch: char) -> char {
    let mut it = ch.to_lowercase();
    match (it.next(), it.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

fn simple_upper(ch: char) -> char {
    let mut it = ch.to_uppercase();
    match (it.next(), it.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

impl RegexTraits for UnicodeTraits {
    fn narrow(&self) -> bool {
        false
    }

    fn translate(&self, ch: char) -> char {
        ch
    }

    fn translate_nocase(&self, ch: char) -> char {
        simple_lower(ch)
    }

    fn class_of(&self, ch: char) -> ClassMask {
        let mut mask = ClassMask::empty();
        if is_newline_char(ch) {
            mask |= ClassMask::NEWLINE;
        }
        if ch.is_alphabetic() {
            mask |= ClassMask::ALPHA;
        }
        if ch == '\t' || (ch.is_whitespace() && !is_newline_char(ch)) {
            mask |= ClassMask::BLANK;
        }
        if ch.is_control() {
            mask |= ClassMask::CNTRL;
        }
        if ch.is_numeric() {
            mask |= ClassMask::DIGIT;
        }
        if ch.is_lowercase() {
            mask |= ClassMask::LOWER;
        }
        if ch.is_uppercase() {
            mask |= ClassMask::UPPER;
        }
        if ch.is_whitespace() {
            mask |= ClassMask::SPACE;
        } else if !ch.is_control() {
            mask |= ClassMask::GRAPH | ClassMask::PRINT;
            if !ch.is_alphanumeric() {
                mask |= ClassMask::PUNCT;
            }
        }
        if ch == ' ' {
            mask |= ClassMask::PRINT;
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
        range.contains(&ch) || range.contains(&simple_lower(ch)) || range.contains(&simple_upper(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_domain() {
        assert!(!UnicodeTraits.narrow());
    }

    #[test]
    fn classify_non_ascii() {
        let t = UnicodeTraits;
        assert!(t.isctype('é', ClassMask::ALPHA));
        assert!(t.isctype('é', ClassMask::LOWER));
        assert!(t.isctype('Ж', ClassMask::UPPER));
        assert!(t.isctype('\u{2028}', ClassMask::NEWLINE));
        assert!(t.isctype('-', ClassMask::PUNCT));
        assert!(!t.isctype('-', ClassMask::WORD));
    }

    #[test]
    fn fold_keeps_expanding_chars() {
        // 'İ' lowercases to two chars; the simple fold keeps it unchanged.
        assert_eq!(UnicodeTraits.translate_nocase('İ'), 'İ');
        assert_eq!(UnicodeTraits.translate_nocase('Ж'), 'ж');
    }

    #[test]
    fn nocase_range() {
        assert!(UnicodeTraits.in_range_nocase('а', 'я', 'Ж'));
        assert!(!UnicodeTraits.in_range_nocase('а', 'в', 'Ж'));
    }
}
