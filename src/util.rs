const INLINE_STACK_SIZE: usize = 8;

/// Traversal stack, kept inline for the shallow trees most maps end up being.
pub(crate) type Stack<T> = smallvec::SmallVec<[T; INLINE_STACK_SIZE]>;
