//! Type aliases for the single-threaded shared state used by the designer.
//!
//! The designer is driven from one UI event loop, so sharing is done with
//! `Rc<RefCell<T>>` rather than `Arc<Mutex<T>>`. Non-owning back references
//! (for example a preview pointing at the session-wide validity indicator)
//! use [`WeakShared`] so no ownership cycles form.
//!
//! ## Usage
//!
//! ```rust
//! use latticekit_core::types::{shared, Shared, WeakShared};
//! use std::rc::Rc;
//!
//! let state: Shared<u32> = shared(1);
//! let observer: WeakShared<u32> = Rc::downgrade(&state);
//! *state.borrow_mut() += 1;
//! assert_eq!(observer.upgrade().map(|s| *s.borrow()), Some(2));
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// A non-owning observer of a [`Shared`] value.
///
/// Upgrading fails once every owner has been dropped.
pub type WeakShared<T> = Weak<RefCell<T>>;

/// Create a new `Shared<T>` from a value.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
