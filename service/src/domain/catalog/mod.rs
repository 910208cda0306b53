//! [`Catalog`] definitions.

#[cfg(feature = "builtin")]
mod marketplace;
mod violation;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{filter, listing, sort, Filter};

pub use self::violation::Violation;

/// Complete search configuration of a marketplace.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// [`Filter`]s, in display order.
    pub filters: Vec<Filter>,

    /// [`sort::Config`] of the search results.
    pub sort_config: sort::Config,

    /// [`listing::Config`] of the listing page.
    pub listing: listing::Config,
}

impl Catalog {
    /// Returns the built-in marketplace [`Catalog`].
    ///
    /// It's constructed once, on the first access, and shared by the whole
    /// process afterwards.
    #[cfg(feature = "builtin")]
    #[must_use]
    pub fn marketplace() -> &'static Self {
        &marketplace::CATALOG
    }

    /// Returns the [`Filter`] with the provided `id`, if any.
    #[must_use]
    pub fn filter(&self, id: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.id == *id)
    }

    /// Returns [`Filter`]s of the provided [`filter::Group`], in display
    /// order.
    pub fn filters_in(
        &self,
        group: filter::Group,
    ) -> impl Iterator<Item = &Filter> + '_ {
        self.filters.iter().filter(move |f| f.group == group)
    }

    /// Validates this [`Catalog`], failing on the first [`Violation`].
    ///
    /// # Errors
    ///
    /// Errors with the first found [`Violation`], if any.
    pub fn validate(&self) -> Result<(), Violation> {
        self.violations().into_iter().next().map_or(Ok(()), Err)
    }

    /// Lists all the [`Violation`]s of this [`Catalog`].
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        self.check_filters(&mut out);
        self.check_sort_config(&mut out);
        out
    }

    /// Checks the [`Filter`]s, pushing found [`Violation`]s into `out`.
    fn check_filters(&self, out: &mut Vec<Violation>) {
        use Violation as V;

        let mut ids = HashSet::new();
        // Encoding of the first filter on every query parameter: `None` for
        // plain values, otherwise the search mode of the selected options.
        let mut encodings = Vec::<(
            &filter::QueryParamName,
            Option<Option<filter::SearchMode>>,
        )>::new();
        for f in &self.filters {
            if !ids.insert(&f.id) {
                out.push(V::DuplicateFilterId(f.id.clone()));
            }

            if let Some(param) = f.query_param() {
                let encoding = f
                    .select_config()
                    .map(filter::SelectConfig::effective_search_mode);
                match encodings.iter().find(|(p, _)| *p == param) {
                    Some((_, first))
                        if first.is_none() || *first != encoding =>
                    {
                        out.push(V::IncompatibleSharedParam {
                            filter: f.id.clone(),
                            param: param.clone(),
                        });
                    }
                    Some(_) => {}
                    None => encodings.push((param, encoding)),
                }
            } else {
                out.push(V::NoQueryParam(f.id.clone()));
            }
            if let Some(fixed) = f.kind().fixed_query_param() {
                if !matches!(
                    f.query_param_names.as_slice(),
                    [name] if name == fixed,
                ) {
                    out.push(V::FixedQueryParamRenamed {
                        filter: f.id.clone(),
                        expected: fixed,
                    });
                }
            }

            match &f.config {
                filter::Config::Price(price) => {
                    if price.min > price.max {
                        out.push(V::InvalidPriceBounds {
                            filter: f.id.clone(),
                            min: price.min,
                            max: price.max,
                        });
                    }
                    if price.step == 0 {
                        out.push(V::ZeroPriceStep(f.id.clone()));
                    }
                }
                filter::Config::SelectSingle(select)
                | filter::Config::SelectMultiple(select) => {
                    check_select(f, select, out);
                }
                filter::Config::DateRange(_) | filter::Config::Keyword(_) => {}
            }
        }
    }

    /// Checks the [`sort::Config`], pushing found [`Violation`]s into `out`.
    fn check_sort_config(&self, out: &mut Vec<Violation>) {
        use Violation as V;

        let config = &self.sort_config;
        if config.query_param_name != *sort::QUERY_PARAM {
            out.push(V::SortQueryParamRenamed(
                config.query_param_name.clone(),
            ));
        }

        let mut keys = HashSet::new();
        for choice in &config.options {
            if !keys.insert(&choice.key) {
                out.push(V::DuplicateSortKey(choice.key.clone()));
            }
        }

        for id in &config.conflicting_filters {
            if self.filter(id.as_str()).is_none() {
                out.push(V::UnknownConflictingFilter(id.clone()));
            }
        }
    }
}

/// Checks the [`filter::SelectConfig`] of the provided [`Filter`], pushing
/// found [`Violation`]s into `out`.
fn check_select(
    f: &Filter,
    select: &filter::SelectConfig,
    out: &mut Vec<Violation>,
) {
    use Violation as V;

    if select.options.is_empty() {
        out.push(V::NoOptions(f.id.clone()));
    }

    let mut keys = HashSet::new();
    for option in &select.options {
        if !keys.insert(&option.key) {
            out.push(V::DuplicateOptionKey {
                filter: f.id.clone(),
                key: option.key.clone(),
            });
        }
    }

    if select.search_mode.is_some()
        && select.schema_type == filter::SchemaType::Enum
    {
        out.push(V::SearchModeWithoutMultiEnum(f.id.clone()));
    }
    if f.kind() == filter::Kind::SelectSingle
        && select.schema_type == filter::SchemaType::MultiEnum
    {
        out.push(V::SingleSelectOfMultiEnum(f.id.clone()));
    }
}
