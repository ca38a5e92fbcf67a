use std::rc::Rc;

use tempo_common::BoxError;

/// A render hook. Identity is the `Rc` allocation: keep a clone of the
/// handle you registered to remove it later.
pub type Hook<C> = Rc<dyn Fn(&C) -> Result<(), BoxError>>;

/// Wrap a closure as a [`Hook`].
pub fn hook<C, F>(f: F) -> Hook<C>
where
    F: Fn(&C) -> Result<(), BoxError> + 'static,
{
    Rc::new(f)
}

/// Where a hook is inserted into a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Append after every existing entry.
    #[default]
    End,
    /// Insert before the entry currently at this index. Indices past the end
    /// append.
    At(usize),
}

/// A hook returned an error; the rest of the pass was not run.
#[derive(Debug, thiserror::Error)]
#[error("hook at position {position} failed: {source}")]
pub struct HookFailure {
    /// Index of the failing entry within the chain.
    pub position: usize,
    #[source]
    pub source: BoxError,
}

/// Ordered chain of hooks.
///
/// Entries may be absent (an empty slot keeps its place in the order but is
/// skipped when the chain runs). Cloning is cheap and yields an independent
/// snapshot: later registrations on the original do not affect the clone.
pub struct HookRegistry<C> {
    entries: Vec<Option<Hook<C>>>,
}

impl<C> HookRegistry<C> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries, including absent slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chain has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a hook. Never fails.
    pub fn register(&mut self, hook: Hook<C>, at: Position) {
        self.register_slot(Some(hook), at);
    }

    /// Insert a possibly-absent entry. Absent entries are skipped by
    /// [`invoke_all`](Self::invoke_all).
    pub fn register_slot(&mut self, slot: Option<Hook<C>>, at: Position) {
        match at {
            Position::End => self.entries.push(slot),
            Position::At(index) => {
                let index = index.min(self.entries.len());
                self.entries.insert(index, slot);
            }
        }
        tracing::trace!(len = self.entries.len(), ?at, "hook registered");
    }

    /// Remove the entry at `index`. Out of range is a no-op returning `false`.
    pub fn unregister_by_index(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        true
    }

    /// Remove the first entry that is the same allocation as `hook`.
    /// Returns `false`, leaving the chain untouched, if there is none.
    pub fn unregister_by_reference(&mut self, hook: &Hook<C>) -> bool {
        match self.position_of(hook) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Index of the first entry that is the same allocation as `hook`.
    pub fn position_of(&self, hook: &Hook<C>) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry
                .as_ref()
                .is_some_and(|h| std::ptr::addr_eq(Rc::as_ptr(h), Rc::as_ptr(hook)))
        })
    }

    /// Whether `hook` is registered at least once.
    pub fn contains(&self, hook: &Hook<C>) -> bool {
        self.position_of(hook).is_some()
    }

    /// Run every present entry in order with `ctx`.
    ///
    /// Stops at the first hook that returns an error.
    pub fn invoke_all(&self, ctx: &C) -> Result<(), HookFailure> {
        for (position, entry) in self.entries.iter().enumerate() {
            let Some(hook) = entry else {
                continue;
            };
            hook(ctx).map_err(|source| HookFailure { position, source })?;
        }
        Ok(())
    }
}

impl<C> Default for HookRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for HookRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<C> std::fmt::Debug for HookRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("len", &self.entries.len())
            .field("present", &self.entries.iter().flatten().count())
            .finish()
    }
}
