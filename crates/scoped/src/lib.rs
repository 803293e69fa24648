//! Exclusive-ownership smart pointers.
//!
//! Two move-only owners, each responsible for releasing exactly one heap
//! allocation exactly once:
//!
//! - [`SingleOwner<T>`]: zero or one heap-allocated `T` (`Box<T>`).
//! - [`ArrayOwner<T>`]: zero or one heap-allocated block of `T` (`Box<[T]>`).
//!
//! Ownership moves in through construction or [`reset`](SingleOwner::reset),
//! moves out through [`release`](SingleOwner::release), and is exchanged
//! with [`swap`](SingleOwner::swap). Neither type is `Clone`, so there is
//! no way to end up with two owners of the same allocation without going
//! through an `unsafe` raw-pointer constructor.
//!
//! # Architecture
//!
//! ```text
//! SingleOwner<T> ──┐
//!                  ├── raw::OwnedSlot<P>   (Option<NonNull<P>>, frees via Box::<P>::from_raw)
//! ArrayOwner<T>  ──┘       P = T  | P = [T]
//! ```
//!
//! Because the single-object and block owners wrap `OwnedSlot<T>` and
//! `OwnedSlot<[T]>` respectively, the release mechanism always matches the
//! allocation mechanism.
//!
//! # Empty owners
//!
//! Dereferencing or indexing an empty owner panics with an
//! [`OwnerError::Empty`] message. The checked accessors
//! ([`SingleOwner::value`], [`ArrayOwner::at`]) report the same condition as
//! an `Err` instead.
//!
//! # Example
//!
//! ```
//! use scoped::{ArrayOwner, SingleOwner};
//!
//! let mut a = SingleOwner::from_box(Box::new(400));
//! let mut b = SingleOwner::from_box(Box::new(500));
//! a.swap(&mut b);
//! assert_eq!((*a, *b), (500, 400));
//!
//! a.reset(Some(Box::new(600)));
//! assert_eq!(*a, 600);
//!
//! let block = ArrayOwner::from(vec![1, 2, 3]);
//! assert_eq!(block[2], 3);
//! ```
//!
//! # Features
//!
//! - `trace`: emit `log::trace!` events (target `scoped`) when an owner
//!   releases, resets over, or drops a live allocation. The events are
//!   covered by `tests/trace_events.rs`
//!   (`cargo test -p scoped --features trace`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(feature = "trace")]
macro_rules! trace_event {
    ($($arg:tt)+) => {
        log::trace!(target: "scoped", $($arg)+)
    };
}

#[cfg(not(feature = "trace"))]
macro_rules! trace_event {
    ($($arg:tt)+) => {};
}

pub mod array;
pub mod error;
mod raw;
pub mod single;

// Public re-exports for the primary API surface.
pub use array::ArrayOwner;
pub use error::{OwnerError, OwnerKind};
pub use single::SingleOwner;
