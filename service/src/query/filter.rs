//! [`Query`] collection related to a single [`Filter`].

use common::operations::By;

use crate::domain::{filter, Filter};
#[cfg(doc)]
use crate::Query;

use super::StoreQuery;

/// Queries a [`Filter`] by its [`filter::Id`].
pub type ById = StoreQuery<By<Option<Filter>, filter::Id>>;
