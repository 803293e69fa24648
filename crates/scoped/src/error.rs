//! Owner-specific error types.

use std::error::Error;
use std::fmt;

/// Which owner type produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnerKind {
    /// A [`SingleOwner`](crate::SingleOwner).
    Single,
    /// An [`ArrayOwner`](crate::ArrayOwner).
    Array,
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "SingleOwner"),
            Self::Array => write!(f, "ArrayOwner"),
        }
    }
}

/// Errors reported by the checked accessors of the owner types.
///
/// The operator paths (`*owner`, `owner[i]`) panic with the same message
/// instead of returning one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnerError {
    /// The owner holds no allocation.
    Empty {
        /// The owner that was accessed.
        kind: OwnerKind,
    },
    /// An element index past the end of the owned block.
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of elements in the owned block.
        len: usize,
    },
}

impl fmt::Display for OwnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} holds no allocation"),
            Self::OutOfBounds { index, len } => {
                write!(
                    f,
                    "index {index} out of bounds for owned block of length {len}"
                )
            }
        }
    }
}

impl Error for OwnerError {}

/// Panic for a dereference or index through an empty owner.
#[cold]
#[track_caller]
pub(crate) fn empty_access(kind: OwnerKind) -> ! {
    panic!("{}", OwnerError::Empty { kind })
}
