//! Open-addressing dictionary and set over arena-owned storage.
//!
//! [`Dictionary`] maps [`Datum`](scree_core::Datum) keys to datum values
//! in a single slot array owned by an [`Arena`](scree_arena::Arena),
//! resolving collisions by triangular-number probing instead of
//! chaining. [`Set`] is the dictionary specialised to membership
//! tracking.
//!
//! Callers supply the hash and comparison functions; the table never
//! relies on built-in equality.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dict;
pub mod set;

pub use dict::{CompareFn, Dictionary, HashFn};
pub use set::Set;
