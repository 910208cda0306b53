//! [`Query`] for building search API [`Params`] out of a [`Request`].

use std::{convert::Infallible, fmt, sync::Arc};

use common::operations::{By, Select};
use derive_more::{Display, Error};
use itertools::Itertools as _;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{filter, sort, Catalog, Filter},
    infra::Store,
    query::Query,
    read::search::{Params, PriceRange, Request, Selection},
    Service,
};

/// [`Query`] for encoding a search [`Request`] into the [`Params`] of a
/// search API request.
///
/// [`Params`] follow the [`Filter`]s order of the [`Catalog`], with the sort
/// order going last. [`Filter`]s sharing a query parameter have their
/// selected options merged into a single value.
#[derive(Clone, Debug)]
pub struct BuildParams(pub Request);

impl<S> Query<BuildParams> for Service<S>
where
    S: Store<
        Select<By<Arc<Catalog>, ()>>,
        Ok = Arc<Catalog>,
        Err = Infallible,
    >,
{
    type Ok = Params;
    type Err = Traced<ExecutionError>;

    fn execute(
        &self,
        BuildParams(request): BuildParams,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Ok(catalog) =
            self.store().execute(Select(By::<Arc<Catalog>, _>::new(())));

        let mut selected = Vec::<(&Filter, &Selection)>::with_capacity(
            request.selections.len(),
        );
        for (id, selection) in &request.selections {
            let filter = catalog
                .filter(id.as_str())
                .ok_or_else(|| tracerr::new!(E::UnknownFilter(id.clone())))?;
            if selected.iter().any(|(f, _)| f.id == *id) {
                return Err(tracerr::new!(E::DuplicateSelection(id.clone())));
            }
            selected.push((filter, selection));
        }

        let mut values = Vec::<(filter::QueryParamName, Value)>::new();
        let mut applied = Vec::new();
        for filter in &catalog.filters {
            let Some(&(_, selection)) =
                selected.iter().find(|(f, _)| f.id == filter.id)
            else {
                continue;
            };
            let Some(value) =
                Value::encode(filter, selection).map_err(tracerr::wrap!())?
            else {
                continue;
            };
            let param = filter.query_param().ok_or_else(|| {
                tracerr::new!(E::NoQueryParam(filter.id.clone()))
            })?;

            if let Some((_, existing)) =
                values.iter_mut().find(|(p, _)| *p == *param)
            {
                if !existing.merge(value) {
                    return Err(tracerr::new!(E::ParamConflict(param.clone())));
                }
            } else {
                values.push((param.clone(), value));
            }
            applied.push(&filter.id);
        }

        let mut params = values
            .into_iter()
            .map(|(param, value)| (param, value.to_string()))
            .collect::<Params>();
        if let Some(key) = &request.sort {
            let config = &catalog.sort_config;
            if let Some(value) =
                sort_value(config, key, &applied).map_err(tracerr::wrap!())?
            {
                params.push(config.query_param_name.clone(), value);
            }
        }

        log::debug!("search `Params` built: {params}");
        Ok(params)
    }
}

/// Encoded value of a query parameter.
#[derive(Clone, Debug)]
enum Value {
    /// Value of a built-in attribute.
    Plain(String),

    /// Selected options of an extended data attribute.
    Options {
        /// [`filter::SearchMode`] the options are combined with, if any.
        mode: Option<filter::SearchMode>,

        /// Keys of the selected options, without duplicates.
        keys: Vec<filter::OptionKey>,
    },
}

impl Value {
    /// Encodes the provided [`Selection`] of the provided [`Filter`].
    ///
    /// Returns [`None`] if nothing is effectively selected.
    fn encode(
        filter: &Filter,
        selection: &Selection,
    ) -> Result<Option<Self>, ExecutionError> {
        use filter::Config as C;
        use ExecutionError as E;

        match (&filter.config, selection) {
            (C::DateRange(_), Selection::Dates(range)) => {
                Ok(Some(Self::Plain(range.to_string())))
            }
            (C::Keyword(_), Selection::Keywords(text)) => {
                let text = text.trim();
                Ok((!text.is_empty()).then(|| Self::Plain(text.to_owned())))
            }
            (C::Price(config), Selection::Price(range)) => {
                if config.contains(range.min()) && config.contains(range.max())
                {
                    Ok(Some(Self::Plain(range.to_string())))
                } else {
                    Err(E::PriceOutOfBounds {
                        filter: filter.id.clone(),
                        range: *range,
                    })
                }
            }
            (C::SelectSingle(_), Selection::Options(keys)) if keys.len() > 1 => {
                Err(E::TooManyOptions(filter.id.clone()))
            }
            (
                C::SelectSingle(config) | C::SelectMultiple(config),
                Selection::Options(keys),
            ) => {
                let mut selected = Vec::with_capacity(keys.len());
                for key in keys {
                    if config.option(key.as_str()).is_none() {
                        return Err(E::UnknownOption {
                            filter: filter.id.clone(),
                            key: key.clone(),
                        });
                    }
                    if !selected.contains(key) {
                        selected.push(key.clone());
                    }
                }
                Ok((!selected.is_empty()).then(|| Self::Options {
                    mode: config.effective_search_mode(),
                    keys: selected,
                }))
            }
            _ => Err(E::SelectionMismatch {
                filter: filter.id.clone(),
                expected: filter.kind(),
            }),
        }
    }

    /// Merges the provided [`Value`] into this one, preserving the order and
    /// skipping the already present option keys.
    ///
    /// Returns `false` if the [`Value`]s cannot share a query parameter.
    fn merge(&mut self, other: Self) -> bool {
        match (self, other) {
            (
                Self::Options { mode, keys },
                Self::Options {
                    mode: other_mode,
                    keys: other_keys,
                },
            ) if *mode == other_mode => {
                for key in other_keys {
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                true
            }
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => f.write_str(value),
            Self::Options { mode, keys } => {
                if let Some(mode) = mode {
                    write!(f, "{mode}:")?;
                }
                write!(f, "{}", keys.iter().format(","))
            }
        }
    }
}

/// Returns the value of the sort query parameter for the provided `key`, if
/// sorting applies along with the `applied` filters.
fn sort_value(
    config: &sort::Config,
    key: &sort::Key,
    applied: &[&filter::Id],
) -> Result<Option<String>, ExecutionError> {
    if !config.active {
        log::debug!("sorting is inactive, ignoring `{key}` sort key");
        return Ok(None);
    }
    if config.choice(key.as_str()).is_none() {
        return Err(ExecutionError::UnknownSortKey(key.clone()));
    }
    // Relevance is the implicit order of keyword searches.
    if config.is_relevance(key) {
        return Ok(None);
    }
    if let Some(id) = applied.iter().find(|id| config.conflicts_with(id)) {
        log::debug!(
            "`Filter(id: {id})` disables sorting, ignoring `{key}` sort key",
        );
        return Ok(None);
    }
    Ok(Some(key.to_string()))
}

/// Error of [`BuildParams`] [`Query`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// [`Filter`] with the provided ID does not exist.
    #[display("`Filter(id: {_0})` does not exist")]
    UnknownFilter(#[error(not(source))] filter::Id),

    /// [`Filter`] is selected more than once.
    #[display("`Filter(id: {_0})` is selected more than once")]
    DuplicateSelection(#[error(not(source))] filter::Id),

    /// [`Selection`] doesn't match the [`filter::Kind`] of its [`Filter`].
    #[display("`Filter(id: {filter})` expects a `{expected}` selection")]
    SelectionMismatch {
        /// ID of the selected [`Filter`].
        filter: filter::Id,

        /// [`filter::Kind`] of the selected [`Filter`].
        expected: filter::Kind,
    },

    /// [`Filter`] has no query parameter to encode its [`Selection`] into.
    #[display("`Filter(id: {_0})` has no query parameter")]
    NoQueryParam(#[error(not(source))] filter::Id),

    /// Selected [`PriceRange`] exceeds the bounds of its [`Filter`].
    #[display("price range `{range}` exceeds `Filter(id: {filter})` bounds")]
    PriceOutOfBounds {
        /// ID of the price [`Filter`].
        filter: filter::Id,

        /// Selected [`PriceRange`].
        range: PriceRange,
    },

    /// More than one option is selected on a [`filter::Kind::SelectSingle`]
    /// [`Filter`].
    #[display("`Filter(id: {_0})` accepts a single option only")]
    TooManyOptions(#[error(not(source))] filter::Id),

    /// Selected option doesn't belong to its [`Filter`].
    #[display("`Filter(id: {filter})` has no `{key}` option")]
    UnknownOption {
        /// ID of the select [`Filter`].
        filter: filter::Id,

        /// Key of the unknown option.
        key: filter::OptionKey,
    },

    /// [`Filter`]s sharing a query parameter encode incompatible values.
    #[display("`{_0}` query parameter is shared by incompatible filters")]
    ParamConflict(#[error(not(source))] filter::QueryParamName),

    /// [`sort::Key`] doesn't name any of the [`sort::Choice`]s.
    #[display("`{_0}` sort key does not exist")]
    UnknownSortKey(#[error(not(source))] sort::Key),
}
