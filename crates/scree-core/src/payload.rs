//! Block payload shapes and the cleanup callback type.
//!
//! The arena manages three storage shapes: raw bytes (buffers, string
//! clients), datum slots (lists), and key/value entries (dictionaries).
//! Making the shape explicit in the payload, rather than handing out
//! untyped byte runs to be cast, is what lets the safe accessors exist.

use crate::datum::{Datum, Entry};

/// The storage carried by one arena block.
#[derive(Debug)]
pub enum BlockPayload {
    /// Raw bytes, zero-initialised at allocation.
    Bytes(Vec<u8>),
    /// Datum slots, initialised to [`Datum::None`].
    Data(Vec<Datum>),
    /// Dictionary entries, initialised to [`Entry::EMPTY`].
    Entries(Vec<Entry>),
}

impl BlockPayload {
    /// The payload's size in bytes, as charged against the arena budget.
    pub fn byte_len(&self) -> usize {
        match self {
            Self::Bytes(v) => v.len(),
            Self::Data(v) => v.len() * std::mem::size_of::<Datum>(),
            Self::Entries(v) => v.len() * std::mem::size_of::<Entry>(),
        }
    }

    /// The payload's length in elements of its own shape.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(v) => v.len(),
            Self::Data(v) => v.len(),
            Self::Entries(v) => v.len(),
        }
    }

    /// Whether the payload has zero elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the payload's shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Data(_) => "data",
            Self::Entries(_) => "entries",
        }
    }
}

/// A cleanup callback, invoked exactly once with the block's payload when
/// the owning arena completes.
///
/// The boxed closure carries its own captured state, replacing the
/// function-pointer-plus-untyped-context shape such callbacks
/// traditionally take.
pub type Cleanup = Box<dyn FnOnce(&mut BlockPayload)>;
