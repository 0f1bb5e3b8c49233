//! A last-in-first-out [`Stack`] backed by one contiguous buffer that doubles
//! whenever a push finds it full.
//!
//! ```
//! use lifo::{Stack, StackError};
//!
//! let mut stack = Stack::new();
//! stack.push_multiple([1, 2, 3]);
//!
//! assert_eq!(stack.find(&2), Some(1));
//! assert_eq!(stack.pop(), Ok(3));
//! assert_eq!(stack.top(), Ok(&2));
//!
//! stack.clear();
//! assert_eq!(stack.pop(), Err(StackError::Underflow));
//! ```

mod buffer;
mod error;
mod output;
mod stack;

pub use error::StackError;
pub use stack::{IntoIter, Stack, DEFAULT_CAPACITY, GROWTH_FACTOR};
