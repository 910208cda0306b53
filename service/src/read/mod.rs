//! Read model definitions.

pub mod filter;
pub mod search;
