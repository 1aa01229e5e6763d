// charset.rs - Character-set accumulation and the set[...] builder.
//
// Narrow traits use a dense 256-bit bitmap. Wide traits use a compound set:
// bitmap below 256, sorted disjoint code ranges above, and class masks tested
// through the traits. Operands of `set[a | b | ...]` are compiled one by one
// and merged into a single accumulator; the result is sealed into a
// `CharsetMatcher` and can only be inverted as a whole.

use smallvec::SmallVec;

use crate::alternates::flatten_alternates;
use crate::error::RegexError;
use crate::expr::Expr;
use crate::grammar;
use crate::matcher::{CharsetMatcher, Matcher, Sequence};
use crate::traits::{ClassMask, RegexTraits};
use crate::visitor::Visitor;

// === BitSet (256 bits for single-byte code points) ===
pub const SINGLE_BYTE_SIZE: usize = 1 << 8;
pub const BITS_IN_ROOM: usize = 32;
pub const BITSET_REAL_SIZE: usize = SINGLE_BYTE_SIZE / BITS_IN_ROOM;
pub type Bits = u32;
pub type BitSet = [Bits; BITSET_REAL_SIZE];

#[inline]
fn bs_room(pos: usize) -> usize {
    pos >> 5
}

#[inline]
fn bs_bit(pos: usize) -> u32 {
    1u32 << (pos & 0x1f)
}

#[inline]
pub fn bitset_at(bs: &BitSet, pos: usize) -> bool {
    (bs[bs_room(pos)] & bs_bit(pos)) != 0
}

#[inline]
pub fn bitset_set_bit(bs: &mut BitSet, pos: usize) {
    bs[bs_room(pos)] |= bs_bit(pos);
}

#[inline]
pub fn bitset_invert(bs: &mut BitSet) {
    for room in bs.iter_mut() {
        *room = !*room;
    }
}

#[inline]
pub fn bitset_or(dest: &mut BitSet, src: &BitSet) {
    for (d, s) in dest.iter_mut().zip(src.iter()) {
        *d |= *s;
    }
}

// === Code Ranges ===
// Sorted, disjoint, non-adjacent inclusive ranges.
pub type CodeRanges = SmallVec<[(u32, u32); 4]>;

/// Insert `from..=to`, merging with any overlapping or adjacent ranges.
pub fn add_code_range(ranges: &mut CodeRanges, from: u32, to: u32) {
    let (from, to) = if from > to { (to, from) } else { (from, to) };

    // First range that could touch `from`.
    let low = ranges.partition_point(|&(_, hi)| hi.saturating_add(1) < from);
    // One past the last range that could touch `to`.
    let high = ranges.partition_point(|&(lo, _)| lo <= to.saturating_add(1));

    if low >= high {
        ranges.insert(low, (from, to));
        return;
    }

    let merged = (from.min(ranges[low].0), to.max(ranges[high - 1].1));
    ranges.drain(low..high);
    ranges.insert(low, merged);
}

pub fn code_ranges_contain(ranges: &CodeRanges, code: u32) -> bool {
    let idx = ranges.partition_point(|&(_, hi)| hi < code);
    idx < ranges.len() && ranges[idx].0 <= code
}

// === Compound Charset ===

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundCharset {
    bs: BitSet,
    ranges: CodeRanges,
    posix_yes: ClassMask,
    posix_no: SmallVec<[ClassMask; 2]>,
    complement: bool,
}

// === Charset ===

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Charset {
    Basic(BitSet),
    Compound(CompoundCharset),
}

fn fold(ch: char, icase: bool, traits: &dyn RegexTraits) -> char {
    if icase {
        traits.translate_nocase(ch)
    } else {
        ch
    }
}

impl Charset {
    pub fn new(narrow: bool) -> Charset {
        if narrow {
            Charset::Basic([0; BITSET_REAL_SIZE])
        } else {
            Charset::Compound(CompoundCharset::default())
        }
    }

    pub fn set_char(&mut self, ch: char, icase: bool, traits: &dyn RegexTraits) {
        let code = fold(ch, icase, traits) as u32;
        match self {
            Charset::Basic(bs) => {
                // Code points above the narrow domain never occur in input.
                if (code as usize) < SINGLE_BYTE_SIZE {
                    bitset_set_bit(bs, code as usize);
                }
            }
            Charset::Compound(cs) => {
                if (code as usize) < SINGLE_BYTE_SIZE {
                    bitset_set_bit(&mut cs.bs, code as usize);
                } else {
                    add_code_range(&mut cs.ranges, code, code);
                }
            }
        }
    }

    pub fn set_range(&mut self, min: char, max: char, icase: bool, traits: &dyn RegexTraits) {
        let (lo, hi) = (min as u32, max as u32);
        let narrow_hi = hi.min(SINGLE_BYTE_SIZE as u32 - 1);
        let bs = match self {
            Charset::Basic(bs) => bs,
            Charset::Compound(cs) => {
                if hi >= SINGLE_BYTE_SIZE as u32 {
                    let wide_lo = lo.max(SINGLE_BYTE_SIZE as u32);
                    add_code_range(&mut cs.ranges, wide_lo, hi);
                    if icase {
                        // Wide members whose fold lands in the bitmap.
                        for ch in (wide_lo..=hi).filter_map(char::from_u32) {
                            let folded = fold(ch, icase, traits) as usize;
                            if folded < SINGLE_BYTE_SIZE {
                                bitset_set_bit(&mut cs.bs, folded);
                            }
                        }
                    }
                }
                &mut cs.bs
            }
        };
        if lo > narrow_hi {
            return;
        }
        for code in lo..=narrow_hi {
            if let Some(ch) = char::from_u32(code) {
                let folded = fold(ch, icase, traits) as u32;
                if (folded as usize) < SINGLE_BYTE_SIZE {
                    bitset_set_bit(bs, folded as usize);
                }
            }
        }
    }

    pub fn set_class(&mut self, mask: ClassMask, not: bool, icase: bool, traits: &dyn RegexTraits) {
        match self {
            Charset::Basic(bs) => {
                for code in 0..SINGLE_BYTE_SIZE as u32 {
                    let Some(ch) = char::from_u32(code) else { continue };
                    if traits.isctype(ch, mask) != not {
                        let folded = fold(ch, icase, traits) as usize;
                        if folded < SINGLE_BYTE_SIZE {
                            bitset_set_bit(bs, folded);
                        }
                    }
                }
            }
            Charset::Compound(cs) => {
                if not {
                    cs.posix_no.push(mask);
                } else {
                    cs.posix_yes |= mask;
                }
            }
        }
    }

    /// Union another sealed, non-complemented charset into this one.
    pub fn union(&mut self, other: &Charset) -> Result<(), RegexError> {
        match (self, other) {
            (Charset::Basic(dest), Charset::Basic(src)) => bitset_or(dest, src),
            (Charset::Compound(dest), Charset::Compound(src)) => {
                if src.complement {
                    return Err(RegexError::unsupported("complemented set nested inside a character set"));
                }
                bitset_or(&mut dest.bs, &src.bs);
                for &(lo, hi) in &src.ranges {
                    add_code_range(&mut dest.ranges, lo, hi);
                }
                dest.posix_yes |= src.posix_yes;
                dest.posix_no.extend(src.posix_no.iter().copied());
            }
            _ => return Err(RegexError::unsupported("character sets built with different traits")),
        }
        Ok(())
    }

    /// Logical complement of the whole set.
    pub fn inverse(&mut self) {
        match self {
            Charset::Basic(bs) => bitset_invert(bs),
            Charset::Compound(cs) => cs.complement = !cs.complement,
        }
    }

    pub fn test(&self, ch: char, icase: bool, traits: &dyn RegexTraits) -> bool {
        let code = fold(ch, icase, traits) as u32;
        match self {
            Charset::Basic(bs) => (code as usize) < SINGLE_BYTE_SIZE && bitset_at(bs, code as usize),
            Charset::Compound(cs) => {
                let in_bitmap = (code as usize) < SINGLE_BYTE_SIZE && bitset_at(&cs.bs, code as usize);
                let in_ranges = if icase {
                    cs.ranges.iter().any(|&(lo, hi)| match (char::from_u32(lo), char::from_u32(hi)) {
                        (Some(lo), Some(hi)) => traits.in_range_nocase(lo, hi, ch),
                        _ => false,
                    })
                } else {
                    code_ranges_contain(&cs.ranges, code)
                };
                let found = in_bitmap
                    || in_ranges
                    || traits.isctype(ch, cs.posix_yes)
                    || cs.posix_no.iter().any(|&mask| !traits.isctype(ch, mask));
                found != cs.complement
            }
        }
    }
}

// === Accumulator ===

/// In-progress character class. Append-only until sealed.
pub struct CharsetBuilder<'t> {
    traits: &'t dyn RegexTraits,
    icase: bool,
    charset: Charset,
}

impl<'t> CharsetBuilder<'t> {
    pub fn new(traits: &'t dyn RegexTraits, icase: bool) -> Self {
        CharsetBuilder {
            traits,
            icase,
            charset: Charset::new(traits.narrow()),
        }
    }

    /// Fold one compiled operand into the accumulator.
    ///
    /// Negated literals, ranges and list sets cannot be folded into a shared
    /// positive set and are rejected; class matchers carry their polarity.
    pub fn merge(&mut self, matcher: &Matcher) -> Result<(), RegexError> {
        match matcher {
            Matcher::Literal(lit) => {
                if lit.not {
                    return Err(RegexError::unsupported("negated literal inside a character set"));
                }
                self.charset.set_char(lit.ch, self.icase, self.traits);
            }
            Matcher::Range(rg) => {
                if rg.not {
                    return Err(RegexError::unsupported("negated range inside a character set"));
                }
                self.charset.set_range(rg.min, rg.max, self.icase, self.traits);
            }
            Matcher::Set(set) => {
                if set.not {
                    return Err(RegexError::unsupported("negated list set inside a character set"));
                }
                for &ch in &set.chars {
                    self.charset.set_char(ch, self.icase, self.traits);
                }
            }
            Matcher::Posix(posix) => {
                self.charset.set_class(posix.mask, posix.not, self.icase, self.traits);
            }
            Matcher::LogicalNewline => {
                self.charset.set_class(ClassMask::NEWLINE, false, self.icase, self.traits);
            }
            Matcher::Charset(nested) => self.charset.union(&nested.charset)?,
            _ => return Err(RegexError::unsupported("non-character operand inside a character set")),
        }
        Ok(())
    }

    pub fn seal(self) -> CharsetMatcher {
        CharsetMatcher {
            charset: self.charset,
            icase: self.icase,
        }
    }
}

// === Set Builder ===

/// Compile the body of `set[a | b | ...]` into one charset matcher.
pub fn compile_set(operands: &Expr, visitor: &mut Visitor) -> Result<CharsetMatcher, RegexError> {
    let mut leaves = Vec::new();
    flatten_alternates(operands, &mut leaves);

    let traits = visitor.traits_handle();
    let mut builder = CharsetBuilder::new(traits.as_ref(), visitor.icase());
    for leaf in leaves {
        let compiled = grammar::compile(leaf, Some(Sequence::single(Matcher::End)), visitor)?;
        builder.merge(compiled.head())?;
    }
    log::trace!("sealed charset over {} traits", if traits.narrow() { "narrow" } else { "wide" });
    Ok(builder.seal())
}
