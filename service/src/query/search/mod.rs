//! [`Query`] collection related to search API requests.

pub mod build;
pub mod parse;

#[cfg(doc)]
use crate::Query;

pub use self::{build::BuildParams, parse::ParseParams};
