//! Observable state cells.
//!
//! A [`MutableState`] holds one value and a list of subscribers that run
//! synchronously, in subscription order, whenever the value changes. Setting
//! an equal value is not a change.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: RefCell<T>,
    observers: RefCell<SmallVec<[(u64, Observer<T>); 2]>>,
    next_observer_id: Cell<u64>,
}

/// Shared, observable value. Clones refer to the same cell.
pub struct MutableState<T> {
    inner: Rc<StateInner<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                observers: RefCell::new(SmallVec::new()),
                next_observer_id: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Store `value`, notifying subscribers when it differs from the
    /// current one. Returns whether anything changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    /// Register `observer`. It stays registered until the returned
    /// subscription is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> StateSubscription {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Rc::new(observer)));
        let weak: Weak<StateInner<T>> = Rc::downgrade(&self.inner);
        StateSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .observers
                    .borrow_mut()
                    .retain(|(observer_id, _)| *observer_id != id);
            }
        })
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: self.clone(),
        }
    }

    fn notify(&self) {
        // Observers may read or subscribe to this state; release borrows first.
        let observers: SmallVec<[Observer<T>; 2]> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        if observers.is_empty() {
            return;
        }
        let value = self.get();
        for observer in observers {
            observer(&value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

/// Read-only view of a [`MutableState`].
#[derive(Clone)]
pub struct State<T> {
    inner: MutableState<T>,
}

impl<T: Clone + PartialEq + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.get()
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> StateSubscription {
        self.inner.subscribe(observer)
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// Keeps an observer registered. Dropping it unsubscribes.
pub struct StateSubscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl StateSubscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for StateSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSubscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
