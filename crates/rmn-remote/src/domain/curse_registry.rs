//! # Curse Registry
//!
//! Set of cursed subjects. Cursing the [`GLOBAL_CURSE_SUBJECT`] halts every
//! lane regardless of per-chain state.
//!
//! Enumeration order is insertion order; removal moves the last subject into
//! the vacated slot. The order is stable until the next mutation.

use super::entities::{Subject, GLOBAL_CURSE_SUBJECT};
use super::errors::{RmnError, RmnResult};
use std::collections::{HashMap, HashSet};

/// Enumerable set of cursed subjects.
#[derive(Clone, Debug, Default)]
pub struct CurseRegistry {
    subjects: Vec<Subject>,
    positions: HashMap<Subject, usize>,
}

impl CurseRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cursed subjects.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether nothing is cursed.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Raw membership, ignoring the global sentinel.
    pub fn contains(&self, subject: &Subject) -> bool {
        self.positions.contains_key(subject)
    }

    /// Whether `subject` is cursed directly or through a global curse.
    pub fn is_cursed(&self, subject: &Subject) -> bool {
        if self.is_empty() {
            return false;
        }
        self.contains(subject) || self.contains(&GLOBAL_CURSE_SUBJECT)
    }

    /// Whether the global sentinel is cursed.
    pub fn is_globally_cursed(&self) -> bool {
        self.contains(&GLOBAL_CURSE_SUBJECT)
    }

    /// All cursed subjects.
    pub fn cursed_subjects(&self) -> Vec<Subject> {
        self.subjects.clone()
    }

    /// Curse every subject in `subjects`. Fails with `AlreadyCursed` on the
    /// first subject that is already cursed (or repeated in the batch), in
    /// which case nothing is added.
    pub fn curse(&mut self, subjects: &[Subject]) -> RmnResult<()> {
        let mut batch = HashSet::with_capacity(subjects.len());
        for subject in subjects {
            if self.contains(subject) || !batch.insert(*subject) {
                return Err(RmnError::AlreadyCursed(*subject));
            }
        }

        for subject in subjects {
            self.positions.insert(*subject, self.subjects.len());
            self.subjects.push(*subject);
        }
        Ok(())
    }

    /// Uncurse every subject in `subjects`. Fails with `NotCursed` on the
    /// first subject that is not cursed (or repeated in the batch), in which
    /// case nothing is removed.
    pub fn uncurse(&mut self, subjects: &[Subject]) -> RmnResult<()> {
        let mut batch = HashSet::with_capacity(subjects.len());
        for subject in subjects {
            if !self.contains(subject) || !batch.insert(*subject) {
                return Err(RmnError::NotCursed(*subject));
            }
        }

        for subject in subjects {
            self.remove(subject);
        }
        Ok(())
    }

    fn remove(&mut self, subject: &Subject) {
        let Some(index) = self.positions.remove(subject) else {
            return;
        };
        self.subjects.swap_remove(index);
        if let Some(moved) = self.subjects.get(index) {
            self.positions.insert(*moved, index);
        }
    }
}
