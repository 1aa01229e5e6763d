// visitor.rs - Per-compilation context.
//
// Threaded by `&mut` through every compile call. Holds the character traits,
// the current case-sensitivity flag, the hidden-mark counter and the
// recursion depth. Modifier scopes are entered through `ModifierScope`, which
// restores the previous traits and flag when dropped.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::error::RegexError;
use crate::expr::{MarkIndex, Modifier};
use crate::traits::RegexTraits;

/// Default limit on expression nesting.
pub const DEFAULT_DEPTH_LIMIT: u32 = 4096;

#[derive(Debug)]
pub struct Visitor {
    traits: Arc<dyn RegexTraits>,
    icase: bool,
    hidden_marks: u32,
    depth: u32,
    depth_limit: u32,
}

impl Visitor {
    pub fn new(traits: Arc<dyn RegexTraits>, icase: bool, depth_limit: u32) -> Self {
        Visitor {
            traits,
            icase,
            hidden_marks: 0,
            depth: 0,
            depth_limit,
        }
    }

    pub fn traits(&self) -> &dyn RegexTraits {
        self.traits.as_ref()
    }

    /// Shared handle to the current traits, for builders that must borrow
    /// the traits while the visitor is mutably borrowed.
    pub fn traits_handle(&self) -> Arc<dyn RegexTraits> {
        Arc::clone(&self.traits)
    }

    pub fn icase(&self) -> bool {
        self.icase
    }

    /// Allocate a fresh hidden mark. Hidden marks count down from -1 so they
    /// never collide with user marks.
    pub fn get_hidden_mark(&mut self) -> MarkIndex {
        self.hidden_marks += 1;
        let mark = -(self.hidden_marks as MarkIndex);
        log::debug!("allocated hidden mark {}", mark);
        mark
    }

    /// Number of hidden marks allocated so far.
    pub fn hidden_mark_count(&self) -> u32 {
        self.hidden_marks
    }

    /// Enter one level of recursion.
    pub fn enter(&mut self) -> Result<(), RegexError> {
        if self.depth >= self.depth_limit {
            return Err(RegexError::DepthLimitOver {
                limit: self.depth_limit,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Apply `modifier` until the returned guard is dropped.
    pub fn push(&mut self, modifier: &Modifier) -> ModifierScope<'_> {
        let saved_icase = self.icase;
        let saved_traits = match modifier {
            Modifier::ICase => {
                self.icase = true;
                None
            }
            Modifier::Case => {
                self.icase = false;
                None
            }
            Modifier::Imbue(traits) => Some(std::mem::replace(&mut self.traits, Arc::clone(traits))),
        };
        ModifierScope {
            visitor: self,
            saved_icase,
            saved_traits,
        }
    }
}

// === Modifier Scope ===

pub struct ModifierScope<'v> {
    visitor: &'v mut Visitor,
    saved_icase: bool,
    saved_traits: Option<Arc<dyn RegexTraits>>,
}

impl Deref for ModifierScope<'_> {
    type Target = Visitor;

    fn deref(&self) -> &Visitor {
        self.visitor
    }
}

impl DerefMut for ModifierScope<'_> {
    fn deref_mut(&mut self) -> &mut Visitor {
        self.visitor
    }
}

impl Drop for ModifierScope<'_> {
    fn drop(&mut self) {
        self.visitor.icase = self.saved_icase;
        if let Some(traits) = self.saved_traits.take() {
            self.visitor.traits = traits;
        }
    }
}
