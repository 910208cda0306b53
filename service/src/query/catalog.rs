//! [`Query`] collection related to the whole [`Catalog`].

use std::sync::Arc;

use common::operations::By;

use crate::domain::{listing, sort, Catalog};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries the whole [`Catalog`].
pub type Whole = StoreQuery<By<Arc<Catalog>, ()>>;

/// Queries the [`sort::Config`] of the search results.
pub type Sort = StoreQuery<By<sort::Config, ()>>;

/// Queries the [`listing::Config`] of the listing page.
pub type Listing = StoreQuery<By<listing::Config, ()>>;
