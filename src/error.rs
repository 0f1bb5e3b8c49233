/// Failures reported by [`Stack`](crate::Stack) operations
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, thiserror::Error)]
pub enum StackError {
    /// A pop or peek on a stack with no elements
    #[error("stack is empty")]
    Underflow,

    /// The buffer could not be allocated at the requested capacity
    #[error("could not allocate stack buffer with capacity {capacity}")]
    AllocationFailure { capacity: usize },
}
