use std::mem::MaybeUninit;
use std::{ptr, slice};

use crate::error::StackError;

/// Fixed allocation of `capacity` slots, of which only the first `len` are
/// initialized. Slots past `len` are never read
pub struct Buffer<T> {
    len: usize,
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> Buffer<T> {
    pub fn try_with_capacity(capacity: usize) -> Result<Self, StackError> {
        Ok(Self {
            len: 0,
            slots: allocate(capacity)?,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.slots.as_ptr() as *const T, self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.slots.as_mut_ptr() as *mut T, self.len) }
    }

    /// The caller must ensure the buffer is not full
    pub unsafe fn push_unchecked(&mut self, value: T) {
        let len = self.len;
        *self.slots.get_unchecked_mut(len) = MaybeUninit::new(value);
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.slots.get_unchecked(self.len).assume_init_read()) }
    }

    /// Drop every element at or above `len`
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = unsafe { self.slots.as_mut_ptr().add(len) } as *mut T;
        let tail = ptr::slice_from_raw_parts_mut(tail, self.len - len);

        // Shrink first so a panicking destructor can't lead to a double drop
        self.len = len;

        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Move the live elements into a new allocation of `capacity` slots. The
    /// old allocation is released only after the new one holds every element
    pub fn try_grow(&mut self, capacity: usize) -> Result<(), StackError> {
        assert!(capacity >= self.len);

        let mut slots = allocate(capacity)?;

        unsafe {
            ptr::copy_nonoverlapping(self.slots.as_ptr(), slots.as_mut_ptr(), self.len);
        }

        self.slots = slots;
        Ok(())
    }
}

impl<T: Clone> Buffer<T> {
    /// Copy the live elements into an allocation of the same capacity
    pub fn try_clone(&self) -> Result<Self, StackError> {
        let mut copy = Self::try_with_capacity(self.capacity())?;

        for value in self.as_slice() {
            unsafe {
                copy.push_unchecked(value.clone());
            }
        }

        Ok(copy)
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

fn allocate<T>(capacity: usize) -> Result<Box<[MaybeUninit<T>]>, StackError> {
    let mut slots = Vec::new();

    if slots.try_reserve_exact(capacity).is_err() {
        return Err(StackError::AllocationFailure { capacity });
    }

    slots.resize_with(capacity, MaybeUninit::uninit);
    Ok(slots.into_boxed_slice())
}
