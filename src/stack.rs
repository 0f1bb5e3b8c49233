use std::alloc::{handle_alloc_error, Layout};
use std::fmt::{self, Debug, Formatter};
use std::iter::{FusedIterator, Rev};
use std::marker::PhantomData;
use std::slice;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::buffer::Buffer;
use crate::error::StackError;

/// Capacity used when none, or one smaller than a single slot, is requested
pub const DEFAULT_CAPACITY: usize = 10;

/// Multiplier applied to the capacity whenever a push finds the buffer full
pub const GROWTH_FACTOR: usize = 2;

/// Upper bound on slots reserved up front from a deserializer's size hint
const PREALLOCATION_LIMIT: usize = 4096;

/// A last-in-first-out stack over a single growable buffer.
///
/// Pushing onto a full stack doubles its capacity, so a run of `n` pushes
/// does `O(n)` copying work in total. Capacity never shrinks on its own;
/// [`clear`](Stack::clear) and pops only change the length.
///
/// Positions handed out by [`find`](Stack::find) and accepted by
/// [`get`](Stack::get) are distances from the top, so `0` is always the most
/// recently pushed element.
pub struct Stack<T> {
    buffer: Buffer<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty stack with room for `capacity` elements, falling back
    /// to [`DEFAULT_CAPACITY`] when `capacity` is zero
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| fatal::<T>(err))
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StackError> {
        let capacity = if capacity < 1 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };

        Ok(Self {
            buffer: Buffer::try_with_capacity(capacity)?,
        })
    }

    /// Push a value onto the top, growing the buffer if it is full.
    ///
    /// Running out of memory is fatal here, use [`try_push`](Stack::try_push)
    /// to observe it instead.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            fatal::<T>(err);
        }
    }

    /// Push a value onto the top, reporting
    /// [`AllocationFailure`](StackError::AllocationFailure) if the buffer
    /// needed to grow and could not. The stack is unchanged on failure
    pub fn try_push(&mut self, value: T) -> Result<(), StackError> {
        if self.buffer.is_full() {
            self.try_grow()?;
        }

        unsafe {
            self.buffer.push_unchecked(value);
        }

        Ok(())
    }

    fn try_grow(&mut self) -> Result<(), StackError> {
        let capacity = self
            .capacity()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(StackError::AllocationFailure { capacity: usize::MAX })?;

        self.buffer.try_grow(capacity)
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        self.buffer.pop().ok_or(StackError::Underflow)
    }

    pub fn top(&self) -> Result<&T, StackError> {
        self.buffer.as_slice().last().ok_or(StackError::Underflow)
    }

    pub fn top_mut(&mut self) -> Result<&mut T, StackError> {
        self.buffer.as_mut_slice().last_mut().ok_or(StackError::Underflow)
    }

    /// The element `depth` positions below the top
    pub fn get(&self, depth: usize) -> Option<&T> {
        self.iter().nth(depth)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the current allocation has no free slots. The next push will
    /// still succeed by growing
    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Drop every element, keeping the allocation
    pub fn clear(&mut self) {
        self.buffer.truncate(0);
    }

    /// Reverse the order of the live elements, so the bottom becomes the top
    pub fn reverse(&mut self) {
        self.buffer.as_mut_slice().reverse();
    }

    /// Push each value in order, leaving the last one on top
    pub fn push_multiple(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.push(value);
        }
    }

    /// Pop and drop up to `count` elements, returning how many were removed
    pub fn pop_multiple(&mut self, count: usize) -> usize {
        let len = self.len();
        let popped = count.min(len);
        self.buffer.truncate(len - popped);
        popped
    }

    /// Pop elements into `out` in pop order, top first, until either the
    /// stack or `out` runs out. Returns how many slots were written.
    ///
    /// Slots of `out` past the returned count are left as they were.
    pub fn pop_into(&mut self, out: &mut [T]) -> usize {
        let mut written = 0;

        for slot in out.iter_mut() {
            match self.buffer.pop() {
                Some(value) => *slot = value,
                None => break,
            }

            written += 1;
        }

        written
    }

    /// Iterate from the top of the stack to the bottom
    pub fn iter(&self) -> Rev<slice::Iter<'_, T>> {
        self.buffer.as_slice().iter().rev()
    }
}

impl<T: PartialEq> Stack<T> {
    /// Distance from the top of the nearest element equal to `value`
    pub fn find(&self, value: &T) -> Option<usize> {
        self.iter().position(|element| element == value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }
}

/// Abort the way the standard collections do when memory runs out
fn fatal<T>(error: StackError) -> ! {
    match error {
        StackError::AllocationFailure { capacity } => match Layout::array::<T>(capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("stack capacity overflow"),
        },
        StackError::Underflow => unreachable!(),
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        match self.buffer.try_clone() {
            Ok(buffer) => Self { buffer },
            Err(err) => fatal::<T>(err),
        }
    }

    /// Reuses the existing allocation when it can hold every element of
    /// `source`
    fn clone_from(&mut self, source: &Self) {
        self.clear();

        if source.len() > self.capacity() {
            if let Err(err) = self.buffer.try_grow(source.capacity()) {
                fatal::<T>(err);
            }
        }

        for value in source.buffer.as_slice() {
            self.push(value.clone());
        }
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buffer.as_slice() == other.buffer.as_slice()
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T: Debug> Debug for Stack<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut result = Self::with_capacity(iter.size_hint().0);
        result.push_multiple(iter);
        result
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_multiple(iter);
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Rev<slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { stack: self }
    }
}

/// Owning iterator that pops elements from the top down
pub struct IntoIter<T> {
    stack: Stack<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.stack.buffer.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.stack.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// Serialized bottom first, so deserializing pushes the elements back in
/// their original order
impl<T: Serialize> Serialize for Stack<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for value in self.buffer.as_slice() {
            seq.serialize_element(value)?;
        }

        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Stack<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(StackVisitor {
            marker: PhantomData,
        })
    }
}

struct StackVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for StackVisitor<T> {
    type Value = Stack<T>;

    fn expecting(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("a sequence of stack elements, bottom first")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Stack<T>, A::Error> {
        let capacity = seq.size_hint().unwrap_or(0).min(PREALLOCATION_LIMIT);
        let mut stack = Stack::try_with_capacity(capacity).map_err(de::Error::custom)?;

        while let Some(value) = seq.next_element()? {
            stack.try_push(value).map_err(de::Error::custom)?;
        }

        Ok(stack)
    }
}
