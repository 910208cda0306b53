//! [`Query`] collection related to the multiple [`Filter`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::{domain::Filter, read};

use super::StoreQuery;

/// Queries a list of [`Filter`]s, in display order.
pub type List = StoreQuery<By<Vec<Filter>, read::filter::list::Selector>>;
