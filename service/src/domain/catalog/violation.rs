//! [`Violation`] of [`Catalog`] invariants.

use derive_more::{Display, Error};

use crate::domain::{filter, sort};
#[cfg(doc)]
use crate::domain::{Catalog, Filter};

/// Violation of a [`Catalog`] invariant.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum Violation {
    /// Several [`Filter`]s share the same [`filter::Id`].
    #[display("`Filter(id: {_0})` is defined more than once")]
    DuplicateFilterId(#[error(not(source))] filter::Id),

    /// [`Filter`] has no query parameter names.
    #[display("`Filter(id: {_0})` has no query parameter names")]
    NoQueryParam(#[error(not(source))] filter::Id),

    /// [`Filter`] bound to a built-in attribute uses a query parameter name
    /// other than the one the search API expects.
    #[display(
        "`Filter(id: {filter})` must use exactly the `{expected}` query \
         parameter"
    )]
    FixedQueryParamRenamed {
        /// [`filter::Id`] of the misconfigured [`Filter`].
        filter: filter::Id,

        /// Query parameter name the search API expects.
        expected: &'static str,
    },

    /// Price [`Filter`] has its lower bound above the upper one.
    #[display("`Filter(id: {filter})` has price bounds `{min} > {max}`")]
    InvalidPriceBounds {
        /// [`filter::Id`] of the misconfigured [`Filter`].
        filter: filter::Id,

        /// Configured lower bound.
        min: u64,

        /// Configured upper bound.
        max: u64,
    },

    /// Price [`Filter`] has a zero step.
    #[display("`Filter(id: {_0})` has a zero price step")]
    ZeroPriceStep(#[error(not(source))] filter::Id),

    /// Select [`Filter`] has no options.
    #[display("`Filter(id: {_0})` has no options")]
    NoOptions(#[error(not(source))] filter::Id),

    /// Select [`Filter`] has several options with the same key.
    #[display("`Filter(id: {filter})` has option `{key}` more than once")]
    DuplicateOptionKey {
        /// [`filter::Id`] of the misconfigured [`Filter`].
        filter: filter::Id,

        /// Duplicated [`filter::OptionKey`].
        key: filter::OptionKey,
    },

    /// [`filter::SearchMode`] is set on an [`filter::SchemaType::Enum`]
    /// attribute.
    #[display(
        "`Filter(id: {_0})` has a search mode, but its schema type is not \
         `multi-enum`"
    )]
    SearchModeWithoutMultiEnum(#[error(not(source))] filter::Id),

    /// Single select [`Filter`] is bound to a
    /// [`filter::SchemaType::MultiEnum`] attribute.
    #[display("`Filter(id: {_0})` selects a single value of a `multi-enum`")]
    SingleSelectOfMultiEnum(#[error(not(source))] filter::Id),

    /// [`Filter`] shares its query parameter with a preceding one, but
    /// encodes its values differently, so they can't be merged.
    #[display(
        "`Filter(id: {filter})` shares the `{param}` query parameter with a \
         filter encoding values differently"
    )]
    IncompatibleSharedParam {
        /// [`filter::Id`] of the misconfigured [`Filter`].
        filter: filter::Id,

        /// Shared query parameter name.
        param: filter::QueryParamName,
    },

    /// [`sort::Config`] uses a query parameter name other than
    /// [`sort::QUERY_PARAM`].
    #[display("sorting must use the `sort` query parameter, not `{_0}`")]
    SortQueryParamRenamed(#[error(not(source))] filter::QueryParamName),

    /// Several [`sort::Choice`]s share the same [`sort::Key`].
    #[display("sort option `{_0}` is defined more than once")]
    DuplicateSortKey(#[error(not(source))] sort::Key),

    /// [`sort::Config`] conflicts with an undefined [`Filter`].
    #[display("sorting conflicts with unknown `Filter(id: {_0})`")]
    UnknownConflictingFilter(#[error(not(source))] filter::Id),
}
