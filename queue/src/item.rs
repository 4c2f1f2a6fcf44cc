//! Shareable handle to an element payload.

use std::{fmt, ops::Deref, sync::Arc};

/// Shareable handle to one element's bytes.
///
/// Cloning an `Item` creates another reference to the same payload (nothing is copied). Two
/// items refer to the same element when [Item::ptr_eq] holds, which is what [crate::Queue::find]
/// compares.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Item(Arc<[u8]>);

impl Item {
    /// Copy `bytes` into a new payload.
    pub fn new(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }

    /// Returns `true` if both items refer to the same payload.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of handles referencing this payload.
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Mutable access to the payload, only available while no other handle exists.
    pub(crate) fn get_mut(&mut self) -> Option<&mut [u8]> {
        Arc::get_mut(&mut self.0)
    }
}

impl Deref for Item {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Item {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Item {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<&[u8]> for Item {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Item").field(&&*self.0).finish()
    }
}
