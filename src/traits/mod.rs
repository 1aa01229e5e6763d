// traits/mod.rs - Character traits boundary.
// Classification, case folding and class-name lookup used while compiling.

pub mod ascii;
pub mod unicode;

use std::fmt::Debug;

use bitflags::bitflags;

pub use ascii::AsciiTraits;
pub use unicode::UnicodeTraits;

// === Class Mask ===
bitflags! {
    /// Character classification bits. A mask tests positive when any of its
    /// bits is present in the character's own classification.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClassMask: u16 {
        const NEWLINE = 1 << 0;
        const ALPHA = 1 << 1;
        const BLANK = 1 << 2;
        const CNTRL = 1 << 3;
        const DIGIT = 1 << 4;
        const GRAPH = 1 << 5;
        const LOWER = 1 << 6;
        const PRINT = 1 << 7;
        const PUNCT = 1 << 8;
        const SPACE = 1 << 9;
        const UPPER = 1 << 10;
        const XDIGIT = 1 << 11;
        const UNDERSCORE = 1 << 12;
        const ALNUM = Self::ALPHA.bits() | Self::DIGIT.bits();
        const WORD = Self::ALNUM.bits() | Self::UNDERSCORE.bits();
    }
}

// === Class Name Table ===
// Sorted by name.
static CLASS_NAMES: &[(&str, ClassMask)] = &[
    ("alnum", ClassMask::ALNUM),
    ("alpha", ClassMask::ALPHA),
    ("blank", ClassMask::BLANK),
    ("cntrl", ClassMask::CNTRL),
    ("d", ClassMask::DIGIT),
    ("digit", ClassMask::DIGIT),
    ("graph", ClassMask::GRAPH),
    ("lower", ClassMask::LOWER),
    ("newline", ClassMask::NEWLINE),
    ("print", ClassMask::PRINT),
    ("punct", ClassMask::PUNCT),
    ("s", ClassMask::SPACE),
    ("space", ClassMask::SPACE),
    ("upper", ClassMask::UPPER),
    ("w", ClassMask::WORD),
    ("xdigit", ClassMask::XDIGIT),
];

/// Is `name` one of the standard class names every traits implementation knows?
pub fn is_class_name(name: &str) -> bool {
    CLASS_NAMES.binary_search_by(|(n, _)| (*n).cmp(name)).is_ok()
}

/// Standard name-to-mask lookup. Under case-insensitivity `upper` and
/// `lower` both widen to `upper|lower`. Unknown names yield an empty mask.
pub fn standard_classname(name: &str, icase: bool) -> ClassMask {
    let mask = match CLASS_NAMES.binary_search_by(|(n, _)| (*n).cmp(name)) {
        Ok(idx) => CLASS_NAMES[idx].1,
        Err(_) => return ClassMask::empty(),
    };
    if icase && (mask == ClassMask::UPPER || mask == ClassMask::LOWER) {
        ClassMask::UPPER | ClassMask::LOWER
    } else {
        mask
    }
}

/// Characters classified as a logical newline.
#[inline]
pub fn is_newline_char(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

// === Traits Trait ===

/// The character traits consulted by the compiler.
///
/// The compiler only translates characters, resolves class names and asks
/// membership questions; it never inspects input text.
pub trait RegexTraits: Debug + Send + Sync {
    /// True when every character fits a 256-entry dense bitmap.
    fn narrow(&self) -> bool;

    /// Locale normalization of a literal character.
    fn translate(&self, ch: char) -> char;

    /// Case fold used for case-insensitive comparison.
    fn translate_nocase(&self, ch: char) -> char;

    /// Classification of a single character.
    fn class_of(&self, ch: char) -> ClassMask;

    /// Does `ch` belong to any class in `mask`?
    fn isctype(&self, ch: char, mask: ClassMask) -> bool {
        self.class_of(ch).intersects(mask)
    }

    /// Resolve a class name to its mask.
    fn lookup_classname(&self, name: &str, icase: bool) -> ClassMask {
        standard_classname(name, icase)
    }

    /// Case-insensitive range membership.
    fn in_range_nocase(&self, first: char, last: char, ch: char) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_table_is_sorted() {
        for pair in CLASS_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(standard_classname("alpha", false), ClassMask::ALPHA);
        assert_eq!(standard_classname("w", false), ClassMask::WORD);
        assert!(standard_classname("nope", false).is_empty());
        assert!(is_class_name("xdigit"));
        assert!(!is_class_name("Alpha"));
    }

    #[test]
    fn icase_widens_upper_and_lower() {
        let both = ClassMask::UPPER | ClassMask::LOWER;
        assert_eq!(standard_classname("upper", true), both);
        assert_eq!(standard_classname("lower", true), both);
        assert_eq!(standard_classname("upper", false), ClassMask::UPPER);
        assert_eq!(standard_classname("digit", true), ClassMask::DIGIT);
    }

    #[test]
    fn newline_chars() {
        assert!(is_newline_char('\n'));
        assert!(is_newline_char('\u{2028}'));
        assert!(!is_newline_char(' '));
    }
}
