use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tempo_common::SubscriptionId;

use crate::platform::{Listener, Observable, UpdateSource};

/// A deep-observable value.
///
/// Every mutation goes through [`set`](Self::set) or
/// [`update`](Self::update), so anything reachable inside `T` is covered.
/// Other observables can be attached with [`nest`](Self::nest); their
/// mutations then count as mutations of this value.
///
/// Clones share the same value.
pub struct Reactive<T> {
    inner: Rc<ReactiveInner<T>>,
}

struct ReactiveInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: Cell<u64>,
    revision: Cell<u64>,
    children: RefCell<Vec<(UpdateSource, SubscriptionId)>>,
    notifying: Cell<bool>,
}

impl<T> ReactiveInner<T> {
    fn notify(&self) {
        // A nesting cycle leads back here; the outer call already covers it.
        if self.notifying.replace(true) {
            return;
        }
        self.revision.set(self.revision.get() + 1);
        // Listeners may (un)subscribe while being called.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener();
        }
        self.notifying.set(false);
    }
}

impl<T: 'static> Observable for ReactiveInner<T> {
    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    fn revision(&self) -> u64 {
        self.revision.get()
    }
}

impl<T> Drop for ReactiveInner<T> {
    fn drop(&mut self) {
        for (child, id) in self.children.get_mut().drain(..) {
            child.unsubscribe(id);
        }
    }
}

impl<T: 'static> Reactive<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(ReactiveInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                revision: Cell::new(0),
                children: RefCell::new(Vec::new()),
                notifying: Cell::new(false),
            }),
        }
    }

    /// Copy of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Read the value in place.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value. Notifies only if it actually changed.
    pub fn set(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut slot = self.inner.value.borrow_mut();
            if *slot == value {
                return false;
            }
            *slot = value;
        }
        self.inner.notify();
        true
    }

    /// Mutate the value in place. Always notifies.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = {
            let mut slot = self.inner.value.borrow_mut();
            f(&mut slot)
        };
        self.inner.notify();
        out
    }

    /// Attach `child` so that its mutations notify this value's listeners.
    ///
    /// Nesting may form a cycle: each value notifies its own listeners at
    /// most once per mutation.
    pub fn nest(&self, child: &UpdateSource) {
        let parent: Weak<ReactiveInner<T>> = Rc::downgrade(&self.inner);
        let id = child.subscribe(Rc::new(move || {
            if let Some(parent) = parent.upgrade() {
                parent.notify();
            }
        }));
        self.inner
            .children
            .borrow_mut()
            .push((Rc::clone(child), id));
    }

    /// Number of mutations observed so far, nested ones included.
    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }

    /// Number of active listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// This value as an update source. Every call returns a handle to the
    /// same allocation, so identity comparisons hold.
    pub fn as_source(&self) -> UpdateSource {
        self.inner.clone()
    }
}

impl<T> Clone for Reactive<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Reactive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactive")
            .field("value", &self.inner.value.borrow())
            .field("revision", &self.inner.revision.get())
            .finish()
    }
}
