//! # Observer Identity
//!
//! An opaque token naming the owner of one or more bindings.
//!
//! The center only compares identities for equality. It never dereferences
//! them and never keeps the receiver alive through them: an owner must call
//! `remove_observer` before the receiver it stands for is destroyed.

use std::fmt;

/// Address-sized owner token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(usize);

impl ObserverId {
    /// Identity derived from the address of a receiver.
    ///
    /// For an `Arc<T>` pass `&*arc`; the address is stable for the life of
    /// the allocation.
    #[must_use]
    pub fn of<T: ?Sized>(receiver: &T) -> Self {
        Self((receiver as *const T).cast::<()>() as usize)
    }

    /// Identity from a caller-chosen token.
    #[must_use]
    pub const fn from_raw(token: usize) -> Self {
        Self(token)
    }

    /// The raw token.
    #[must_use]
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({:#x})", self.0)
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
