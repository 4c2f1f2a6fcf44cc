//! Ownership policies for [crate::Queue].

mod private {
    pub trait Sealed {}
}

/// Whether a [crate::Queue] owns the payloads it stores.
pub trait Ownership: private::Sealed + Send + Sync + 'static {
    /// If `true`, the queue runs its destructor on payloads and retains deleted buffers.
    const OWNING: bool;
}

/// Payloads are owned by the queue (value mode).
#[derive(Debug)]
pub enum Owned {}

/// Payloads are references owned elsewhere (pointer mode).
#[derive(Debug)]
pub enum Borrowed {}

impl private::Sealed for Owned {}
impl private::Sealed for Borrowed {}

impl Ownership for Owned {
    const OWNING: bool = true;
}

impl Ownership for Borrowed {
    const OWNING: bool = false;
}
