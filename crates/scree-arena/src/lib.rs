//! Scoped ownership arena and the growable primitives built on it.
//!
//! An [`Arena`] owns a set of allocations and releases them all, running
//! any registered cleanup callbacks, at one explicit completion point.
//! [`Buffer`] (bytes) and [`List`] (datums) are growable value structs
//! whose backing storage lives in an arena, so completing the arena tears
//! down everything built on it in one step.
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── slot vector of Blocks (payload + optional cleanup)
//! ├── intrusive doubly-linked chain, head = most recently allocated
//! ├── monotonic generation counter (stale-handle detection)
//! └── byte budget + injected ExhaustionHandler
//! ```
//!
//! Blocks are addressed by [`BlockHandle`](scree_core::BlockHandle), an
//! (arena, slot, generation) triple rather than a raw pointer, so owner
//! lookup, unlink, and staleness checks are all O(1) and safe.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod buffer;
pub mod config;
pub mod error;
pub mod list;

pub use arena::Arena;
pub use buffer::Buffer;
pub use config::ArenaConfig;
pub use error::{AbortHandler, Exhausted, ExhaustionHandler};
pub use list::List;
