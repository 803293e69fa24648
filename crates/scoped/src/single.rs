//! Sole ownership of zero or one heap-allocated value.
//!
//! [`SingleOwner<T>`] is the single-object owner. It takes over a `Box<T>`
//! (or a raw pointer that came from one), hands it back on
//! [`release`](SingleOwner::release), and otherwise destroys it exactly once:
//! on [`reset`](SingleOwner::reset) or when the owner itself is dropped.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::error::{empty_access, OwnerError, OwnerKind};
use crate::raw::OwnedSlot;

/// Move-only owner of zero or one heap-allocated `T`.
///
/// The owner is either empty or the only holder of a `Box<T>` allocation.
/// It does not implement `Clone`:
///
/// ```compile_fail
/// use scoped::SingleOwner;
///
/// let a = SingleOwner::from_box(Box::new(1));
/// let b = SingleOwner::clone(&a);
/// ```
///
/// Dereferencing an empty owner panics; use [`value`](Self::value) or
/// [`peek`](Self::peek) to check first.
pub struct SingleOwner<T> {
    slot: OwnedSlot<T>,
}

impl<T> SingleOwner<T> {
    /// Create an owner that holds nothing.
    pub const fn empty() -> Self {
        Self {
            slot: OwnedSlot::empty(),
        }
    }

    /// Take ownership of a boxed value.
    pub fn from_box(value: Box<T>) -> Self {
        Self {
            slot: OwnedSlot::from_box(value),
        }
    }

    /// Take ownership of a raw pointer. A null `ptr` yields an empty owner.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must have been produced by [`Box::into_raw`] for a
    /// `Box<T>` (never for a `Box<[T]>`), and nothing else may own it: the
    /// owner will free it with [`Box::from_raw`].
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            // SAFETY: forwarded to the caller.
            slot: unsafe { OwnedSlot::from_raw(ptr) },
        }
    }

    /// Whether the owner holds no allocation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// The owned address, or null when empty.
    ///
    /// Ownership does not change; the pointer is invalidated by the next
    /// [`reset`](Self::reset) or by dropping the owner.
    #[inline]
    pub fn get(&self) -> *mut T {
        self.slot
            .as_non_null()
            .map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Shared reference to the owned value, `None` when empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Mutable reference to the owned value, `None` when empty.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut()
    }

    /// Shared reference to the owned value.
    ///
    /// Returns [`OwnerError::Empty`] if the owner holds nothing.
    pub fn value(&self) -> Result<&T, OwnerError> {
        self.peek().ok_or(OwnerError::Empty {
            kind: OwnerKind::Single,
        })
    }

    /// Mutable reference to the owned value.
    ///
    /// Returns [`OwnerError::Empty`] if the owner holds nothing.
    pub fn value_mut(&mut self) -> Result<&mut T, OwnerError> {
        self.peek_mut().ok_or(OwnerError::Empty {
            kind: OwnerKind::Single,
        })
    }

    /// Give up ownership and return the allocation to the caller.
    ///
    /// The owner is empty afterwards and will not destroy the value.
    pub fn release(&mut self) -> Option<Box<T>> {
        self.slot.take()
    }

    /// Give up ownership and return the raw address (null when empty).
    ///
    /// The caller becomes responsible for the allocation, typically by
    /// passing it to [`Box::from_raw`] or to another owner's
    /// [`from_raw`](Self::from_raw).
    pub fn release_raw(&mut self) -> *mut T {
        self.slot
            .take_raw()
            .map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Replace the owned value, destroying the previous one if present.
    ///
    /// `None` leaves the owner empty.
    pub fn reset(&mut self, value: Option<Box<T>>) {
        self.slot.replace(value.map(|value| {
            // SAFETY: `Box::into_raw` never returns null.
            unsafe { NonNull::new_unchecked(Box::into_raw(value)) }
        }));
    }

    /// Replace the owned value with a raw pointer.
    ///
    /// Passing the address the owner already holds (for example
    /// `owner.reset_raw(owner.get())`) does nothing. Otherwise the previous
    /// value, if any, is destroyed and `ptr` is taken over; null leaves the
    /// owner empty.
    ///
    /// Only the address is compared. Boxes of a zero-sized `T` all share one
    /// dangling address, so for those this is always a no-op; use
    /// [`reset`](Self::reset) instead.
    ///
    /// # Safety
    ///
    /// Unless it is null or the currently held address, `ptr` must satisfy
    /// the contract of [`from_raw`](Self::from_raw).
    pub unsafe fn reset_raw(&mut self, ptr: *mut T) {
        // SAFETY: forwarded to the caller.
        unsafe { self.slot.reset_raw(ptr) }
    }

    /// Exchange allocations with `other`. Nothing is allocated or destroyed.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.slot.swap(&mut other.slot);
    }

    /// Consume the owner, returning its allocation.
    pub fn into_box(mut self) -> Option<Box<T>> {
        self.release()
    }
}

impl<T> Deref for SingleOwner<T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.slot.as_ref() {
            Some(value) => value,
            None => empty_access(OwnerKind::Single),
        }
    }
}

impl<T> DerefMut for SingleOwner<T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.slot.as_mut() {
            Some(value) => value,
            None => empty_access(OwnerKind::Single),
        }
    }
}

impl<T> Default for SingleOwner<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Box<T>> for SingleOwner<T> {
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T> From<Option<Box<T>>> for SingleOwner<T> {
    fn from(value: Option<Box<T>>) -> Self {
        value.map_or_else(Self::empty, Self::from_box)
    }
}

impl<T: fmt::Debug> fmt::Debug for SingleOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SingleOwner").field(&self.peek()).finish()
    }
}
