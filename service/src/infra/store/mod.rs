//! [`Store`]-related implementations.

pub mod memory;

pub use self::memory::Memory;

/// Read operation over a stored [`Catalog`].
///
/// [`Catalog`]: crate::domain::Catalog
pub use common::Handler as Store;
