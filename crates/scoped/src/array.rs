//! Sole ownership of zero or one heap-allocated block.
//!
//! [`ArrayOwner<T>`] mirrors [`SingleOwner`](crate::SingleOwner) for
//! contiguous blocks. The block is a `Box<[T]>`, so destruction drops every
//! element and frees the block as one unit, never element by element.
//!
//! Element access goes through `owner[index]`. The length travels with the
//! block pointer, so an out-of-range index hits the slice bounds check
//! rather than reading past the allocation.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};

use crate::error::{empty_access, OwnerError, OwnerKind};
use crate::raw::OwnedSlot;

/// Move-only owner of zero or one heap-allocated block of `T`.
///
/// ```
/// use scoped::ArrayOwner;
///
/// let mut block = ArrayOwner::from(vec![0u8; 3]);
/// block[1] = 7;
/// assert_eq!(block.as_slice(), Some(&[0, 7, 0][..]));
/// ```
pub struct ArrayOwner<T> {
    slot: OwnedSlot<[T]>,
}

impl<T> ArrayOwner<T> {
    /// Create an owner that holds nothing.
    pub const fn empty() -> Self {
        Self {
            slot: OwnedSlot::empty(),
        }
    }

    /// Take ownership of a boxed block.
    pub fn from_boxed_slice(block: Box<[T]>) -> Self {
        Self {
            slot: OwnedSlot::from_box(block),
        }
    }

    /// Take ownership of a block given its first element and length. A null
    /// `ptr` yields an empty owner.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be the data pointer of a `Box<[T]>` of exactly
    /// `len` elements released with [`Box::into_raw`] (never a `Box<T>`),
    /// and nothing else may own it.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        let block = ptr::slice_from_raw_parts_mut(ptr, len);
        Self {
            // SAFETY: forwarded to the caller.
            slot: unsafe { OwnedSlot::from_raw(block) },
        }
    }

    /// Whether the owner holds no block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// Number of elements in the owned block, 0 when empty.
    #[inline]
    pub fn len(&self) -> usize {
        self.slot.as_non_null().map_or(0, |block| block.len())
    }

    /// Address of the first element, or null when empty.
    #[inline]
    pub fn get(&self) -> *mut T {
        self.slot
            .as_non_null()
            .map_or(ptr::null_mut(), |block| block.as_ptr().cast::<T>())
    }

    /// The owned block, `None` when empty.
    #[inline]
    pub fn as_slice(&self) -> Option<&[T]> {
        self.slot.as_ref()
    }

    /// The owned block, mutably, `None` when empty.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        self.slot.as_mut()
    }

    /// Checked element access.
    pub fn at(&self, index: usize) -> Result<&T, OwnerError> {
        let block = self.as_slice().ok_or(OwnerError::Empty {
            kind: OwnerKind::Array,
        })?;
        let len = block.len();
        block.get(index).ok_or(OwnerError::OutOfBounds { index, len })
    }

    /// Checked mutable element access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OwnerError> {
        let block = self.as_mut_slice().ok_or(OwnerError::Empty {
            kind: OwnerKind::Array,
        })?;
        let len = block.len();
        block
            .get_mut(index)
            .ok_or(OwnerError::OutOfBounds { index, len })
    }

    /// Element access without the emptiness or bounds check.
    ///
    /// # Safety
    ///
    /// The owner must be non-empty and `index` must be less than
    /// [`len`](Self::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: the caller guarantees a live block with `index` in range.
        unsafe { &*self.get().add(index) }
    }

    /// Mutable element access without the emptiness or bounds check.
    ///
    /// # Safety
    ///
    /// Same as [`get_unchecked`](Self::get_unchecked).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: as in `get_unchecked`; `&mut self` makes the result unique.
        unsafe { &mut *self.get().add(index) }
    }

    /// Give up ownership and return the block to the caller.
    pub fn release(&mut self) -> Option<Box<[T]>> {
        self.slot.take()
    }

    /// Give up ownership and return the raw block pointer.
    ///
    /// When empty the result has a null data pointer and length 0.
    pub fn release_raw(&mut self) -> *mut [T] {
        self.slot.take_raw().map_or(
            ptr::slice_from_raw_parts_mut(ptr::null_mut(), 0),
            NonNull::as_ptr,
        )
    }

    /// Replace the owned block, destroying the previous one if present.
    ///
    /// `None` leaves the owner empty.
    pub fn reset(&mut self, block: Option<Box<[T]>>) {
        self.slot.replace(block.map(|block| {
            // SAFETY: `Box::into_raw` never returns null.
            unsafe { NonNull::new_unchecked(Box::into_raw(block)) }
        }));
    }

    /// Replace the owned block with one given by raw parts.
    ///
    /// If `ptr` and `len` match the block already held, nothing happens.
    /// Otherwise the previous block, if any, is destroyed and the new one
    /// taken over; null leaves the owner empty.
    ///
    /// The comparison includes `len`. Blocks of a zero-sized `T` all share
    /// one dangling address, so for those a block of the same length as the
    /// held one is not taken over; use [`reset`](Self::reset) instead.
    ///
    /// # Safety
    ///
    /// Unless `ptr` is null or `(ptr, len)` is the currently held block, they
    /// must satisfy the contract of [`from_raw_parts`](Self::from_raw_parts).
    pub unsafe fn reset_raw(&mut self, ptr: *mut T, len: usize) {
        let block = ptr::slice_from_raw_parts_mut(ptr, len);
        // SAFETY: forwarded to the caller.
        unsafe { self.slot.reset_raw(block) }
    }

    /// Exchange blocks with `other`. Nothing is allocated or destroyed.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.slot.swap(&mut other.slot);
    }

    /// Consume the owner, returning its block.
    pub fn into_boxed_slice(mut self) -> Option<Box<[T]>> {
        self.release()
    }
}

impl<T> Index<usize> for ArrayOwner<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.slot.as_ref() {
            Some(block) => &block[index],
            None => empty_access(OwnerKind::Array),
        }
    }
}

impl<T> IndexMut<usize> for ArrayOwner<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.slot.as_mut() {
            Some(block) => &mut block[index],
            None => empty_access(OwnerKind::Array),
        }
    }
}

impl<T> Default for ArrayOwner<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Box<[T]>> for ArrayOwner<T> {
    fn from(block: Box<[T]>) -> Self {
        Self::from_boxed_slice(block)
    }
}

impl<T> From<Vec<T>> for ArrayOwner<T> {
    fn from(block: Vec<T>) -> Self {
        Self::from_boxed_slice(block.into_boxed_slice())
    }
}

impl<T> FromIterator<T> for ArrayOwner<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_boxed_slice(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayOwner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArrayOwner").field(&self.as_slice()).finish()
    }
}
