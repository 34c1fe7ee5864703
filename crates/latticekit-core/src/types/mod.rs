//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` and its weak counterpart.

pub mod aliases;

pub use aliases::*;
