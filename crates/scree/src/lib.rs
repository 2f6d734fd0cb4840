//! Scree: arena-scoped storage and collection primitives.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Scree sub-crates. For most users, adding `scree` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use scree::prelude::*;
//!
//! fn int_hash(key: Datum) -> u64 {
//!     key.as_int().unwrap_or(0) as u64
//! }
//!
//! // One arena owns everything built in this scope.
//! let mut arena = Arena::new();
//!
//! let mut greeting = Buffer::create(&mut arena, 1);
//! greeting.append(&mut arena, b"hello");
//! assert_eq!(greeting.as_slice(&arena), b"hello");
//!
//! let mut squares = Dictionary::create(&mut arena, int_hash, int_compare, 16);
//! for i in 0..20 {
//!     squares.add(&mut arena, Datum::Int(i), Datum::Int(i * i));
//! }
//! assert_eq!(squares.lookup(&arena, Datum::Int(7)), Some(Datum::Int(49)));
//!
//! // One call releases every allocation made above.
//! arena.complete();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `scree-core` | `Datum`, `Entry`, handles, block payloads |
//! | [`arena`] | `scree-arena` | `Arena`, `Buffer`, `List`, exhaustion policy |
//! | [`hash`] | `scree-hash` | `Dictionary`, `Set` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and handles (`scree-core`).
///
/// Contains [`types::Datum`], [`types::Entry`], the identifier types, and
/// the block payload vocabulary shared by the arena and its clients.
pub use scree_core as types;

/// Arena engine and growable primitives (`scree-arena`).
///
/// The [`arena::Arena`] ownership scope, the [`arena::Buffer`] and
/// [`arena::List`] collections backed by it, and the exhaustion policy
/// types.
pub use scree_arena as arena;

/// Open-addressing dictionary and set (`scree-hash`).
pub use scree_hash as hash;

/// Common imports for typical Scree usage.
///
/// ```rust
/// use scree::prelude::*;
/// ```
pub mod prelude {
    // Core values and handles
    pub use scree_core::{int_compare, ArenaId, BlockHandle, BlockPayload, Cleanup, Datum, Entry};

    // Arena and the primitives built on it
    pub use scree_arena::{
        AbortHandler, Arena, ArenaConfig, Buffer, Exhausted, ExhaustionHandler, List,
    };

    // Dictionary and set
    pub use scree_hash::{CompareFn, Dictionary, HashFn, Set};
}
