use crate::prelude::*;

/// Error returned by the fallible operations of [`IndexedHeap`](crate::IndexedHeap).
///
/// The type parameter `O` is whatever the failing call was given: the object itself for
/// operations that take ownership (`add`, `update`, ...) or a reference to it for operations
/// that only borrow (`get`, `delete`). This way the caller always gets the offending object back.
#[derive(Error, Debug)]
pub enum HeapError<O> {
    #[error("failed to derive key for object: {source}")]
    KeyDerivation {
        object: O,
        #[source]
        source: Error,
    },

    #[error("object not found")]
    NotFound,

    #[error("heap is empty")]
    Empty,
}

impl<O> HeapError<O> {
    pub(crate) fn key_derivation(object: O, source: Error) -> Self {
        HeapError::KeyDerivation { object, source }
    }

    /// Returns the object that caused a [`HeapError::KeyDerivation`], if any.
    pub fn into_object(self) -> Option<O> {
        match self {
            HeapError::KeyDerivation { object, .. } => Some(object),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HeapError::NotFound)
    }

    pub fn is_empty_heap(&self) -> bool {
        matches!(self, HeapError::Empty)
    }
}
