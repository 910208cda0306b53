//! [`Query`] definition.

pub mod catalog;
pub mod filter;
pub mod filters;
pub mod search;

use std::convert::Infallible;

use common::operations::{By, Select};

use crate::{infra::Store, Service};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from a [`Store`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct StoreQuery<T>(T);

impl<W, B> StoreQuery<By<W, B>> {
    /// Creates a new [`StoreQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<S, W, B> Query<StoreQuery<By<W, B>>> for Service<S>
where
    S: Store<Select<By<W, B>>, Ok = W, Err = Infallible>,
{
    type Ok = W;
    type Err = Infallible;

    fn execute(
        &self,
        StoreQuery(by): StoreQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.store().execute(Select(by))
    }
}
