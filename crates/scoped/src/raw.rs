//! Owned-slot primitive shared by both owner types.
//!
//! An [`OwnedSlot<P>`] holds either nothing or the unique address of a
//! `Box<P>` allocation. `P = T` gives single-object ownership and
//! `P = [T]` gives block ownership. The release path is always
//! `Box::<P>::from_raw`, so an allocation is freed by the mechanism that
//! produced it.
//!
//! This is the only module in the crate that dereferences or frees raw
//! pointers. Every `unsafe` block carries a `// SAFETY:` comment.

use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

/// Zero or one exclusively owned `Box<P>` allocation.
pub(crate) struct OwnedSlot<P: ?Sized> {
    /// `None` is the empty state.
    ptr: Option<NonNull<P>>,
    /// Marks that dropping the slot may drop a `P`.
    _owns: PhantomData<P>,
}

// SAFETY: the slot is the only handle to its allocation, exactly as `Box<P>`
// is, so it may cross or be shared between threads whenever `P` may.
unsafe impl<P: ?Sized + Send> Send for OwnedSlot<P> {}
// SAFETY: see above; `&OwnedSlot<P>` only ever hands out `&P`.
unsafe impl<P: ?Sized + Sync> Sync for OwnedSlot<P> {}

impl<P: ?Sized> OwnedSlot<P> {
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: None,
            _owns: PhantomData,
        }
    }

    pub(crate) fn from_box(value: Box<P>) -> Self {
        // SAFETY: `Box::into_raw` never returns null.
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(value)) };
        Self {
            ptr: Some(ptr),
            _owns: PhantomData,
        }
    }

    /// Take ownership of a raw allocation. Null yields the empty slot.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must come from `Box::<P>::into_raw` (or an
    /// equivalent global-allocator allocation with `P`'s layout) and must
    /// not be owned by anything else.
    pub(crate) unsafe fn from_raw(ptr: *mut P) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            _owns: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    #[inline]
    pub(crate) fn as_non_null(&self) -> Option<NonNull<P>> {
        self.ptr
    }

    #[inline]
    pub(crate) fn as_ref(&self) -> Option<&P> {
        // SAFETY: a held pointer is live and uniquely owned by this slot;
        // borrowing `self` keeps it alive and un-mutated for the result.
        self.ptr.map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline]
    pub(crate) fn as_mut(&mut self) -> Option<&mut P> {
        // SAFETY: as in `as_ref`; the `&mut self` borrow makes the result
        // the only live reference.
        self.ptr.map(|mut ptr| unsafe { ptr.as_mut() })
    }

    /// Give up ownership without freeing anything.
    pub(crate) fn take_raw(&mut self) -> Option<NonNull<P>> {
        let taken = self.ptr.take();
        if taken.is_some() {
            trace_event!("released {}", std::any::type_name::<P>());
        }
        taken
    }

    /// Give up ownership, handing the allocation back as a `Box`.
    pub(crate) fn take(&mut self) -> Option<Box<P>> {
        // SAFETY: the pointer came from `Box::<P>::into_raw` (or a caller
        // upholding `from_raw`'s contract) and the slot no longer holds it.
        self.take_raw()
            .map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }

    /// Store `next` and destroy the previously held allocation, if any.
    ///
    /// The new pointer is installed before the old value is dropped, so a
    /// panicking destructor cannot leave the slot pointing at freed memory.
    pub(crate) fn replace(&mut self, next: Option<NonNull<P>>) {
        let prev = mem::replace(&mut self.ptr, next);
        if let Some(prev) = prev {
            trace_event!("reset destroys {}", std::any::type_name::<P>());
            // SAFETY: `prev` was exclusively owned by this slot and has just
            // been unlinked from it, so this is its one and only release.
            drop(unsafe { Box::from_raw(prev.as_ptr()) });
        }
    }

    /// Like [`replace`](Self::replace), but a pointer equal to the one
    /// already held is a no-op.
    ///
    /// Equality covers the pointer metadata as well as the address, so a
    /// block of a different length is taken over even when zero-sized
    /// elements make both blocks share one dangling address.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw) for any `ptr` that is
    /// neither null nor the currently held address.
    pub(crate) unsafe fn reset_raw(&mut self, ptr: *mut P) {
        if self.ptr.is_some_and(|held| ptr::eq(held.as_ptr(), ptr)) {
            return;
        }
        self.replace(NonNull::new(ptr));
    }

    #[inline]
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
    }
}

impl<P: ?Sized> Drop for OwnedSlot<P> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            trace_event!("dropping owned {}", std::any::type_name::<P>());
            // SAFETY: the slot is being destroyed and still held `ptr`; no
            // other owner exists, so this is the single release.
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_test_utils::DropLedger;

    #[test]
    fn empty_slot_holds_nothing() {
        let slot = OwnedSlot::<u32>::empty();
        assert!(slot.is_empty());
        assert!(slot.as_non_null().is_none());
        assert!(slot.as_ref().is_none());
    }

    #[test]
    fn null_raw_pointer_is_empty() {
        // SAFETY: null is always accepted.
        let slot = unsafe { OwnedSlot::<u32>::from_raw(ptr::null_mut()) };
        assert!(slot.is_empty());
    }

    #[test]
    fn replace_installs_then_destroys() {
        let ledger = DropLedger::new();
        let mut slot = OwnedSlot::from_box(Box::new(ledger.item(1)));
        let next = Box::new(ledger.item(2));
        slot.replace(NonNull::new(Box::into_raw(next)));
        assert_eq!(ledger.destructed(1), 1);
        assert_eq!(slot.as_ref().map(|item| item.id()), Some(2));
        drop(slot);
        assert_eq!(ledger.destructed(2), 1);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn take_leaves_slot_empty_and_value_alive() {
        let ledger = DropLedger::new();
        let mut slot = OwnedSlot::from_box(Box::new(ledger.item(5)));
        let taken = slot.take();
        assert!(slot.is_empty());
        drop(slot);
        assert_eq!(ledger.live(), 1);
        drop(taken);
        assert_eq!(ledger.live(), 0);
    }

    #[test]
    fn reset_raw_to_same_address_keeps_value() {
        let ledger = DropLedger::new();
        let mut slot = OwnedSlot::from_box(Box::new(ledger.item(9)));
        let same = slot.as_non_null().map_or(ptr::null_mut(), NonNull::as_ptr);
        // SAFETY: `same` is the held address, which is the no-op case.
        unsafe { slot.reset_raw(same) };
        assert_eq!(ledger.destructed(9), 0);
        assert!(!slot.is_empty());
    }

    #[test]
    fn reset_raw_to_new_address_destroys_previous() {
        let ledger = DropLedger::new();
        let mut slot = OwnedSlot::from_box(Box::new(ledger.item(1)));
        let next = Box::into_raw(Box::new(ledger.item(2)));
        // SAFETY: `next` is a fresh `Box` allocation owned by nothing else.
        unsafe { slot.reset_raw(next) };
        assert_eq!(ledger.destructed(1), 1);
        assert_eq!(slot.as_ref().map(|item| item.id()), Some(2));
    }

    #[test]
    fn reset_raw_compares_block_length_for_zero_sized_elements() {
        let mut slot = OwnedSlot::<[()]>::from_box(Vec::new().into_boxed_slice());
        let next = Box::into_raw(vec![(); 3].into_boxed_slice());
        // SAFETY: `next` is a fresh boxed block owned by nothing else.
        unsafe { slot.reset_raw(next) };
        assert_eq!(slot.as_ref().map(<[()]>::len), Some(3));
    }

    #[test]
    fn block_slot_drops_every_element_once() {
        let ledger = DropLedger::new();
        let block: Box<[_]> = (0..4).map(|id| ledger.item(id)).collect();
        let slot = OwnedSlot::from_box(block);
        assert_eq!(slot.as_ref().map(<[_]>::len), Some(4));
        drop(slot);
        for id in 0..4 {
            assert_eq!(ledger.destructed(id), 1);
        }
    }
}
