//! [`Query`] for parsing a search [`Request`] out of search API [`Params`].

use std::{convert::Infallible, mem, sync::Arc};

use common::{
    operations::{By, Select},
    DateRange,
};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::Config;
use crate::{
    domain::{filter, sort, Catalog},
    infra::Store,
    query::Query,
    read::search::{Params, PriceRange, Request, Selection},
    Service,
};

/// [`Query`] for reading a search [`Request`] back out of the [`Params`] of
/// a search API request (usually, the ones of the current page URL).
///
/// Unknown parameters are ignored. Invalid ones are either dropped with a
/// warning, or rejected if [`Config::strict_params`] is enabled.
///
/// Options of a query parameter shared by multiple select filters go to the
/// first filter in the [`Catalog`] order having them.
///
/// Building the parsed [`Request`] back yields normalized [`Params`]:
/// parameters follow the [`Catalog`] order, keywords are trimmed and option
/// keys are de-duplicated in the order of their filters.
#[derive(Clone, Debug)]
pub struct ParseParams(pub Params);

impl<S> Query<ParseParams> for Service<S>
where
    S: Store<
        Select<By<Arc<Catalog>, ()>>,
        Ok = Arc<Catalog>,
        Err = Infallible,
    >,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    fn execute(
        &self,
        ParseParams(params): ParseParams,
    ) -> Result<Self::Ok, Self::Err> {
        use filter::Config as C;

        let Ok(catalog) =
            self.store().execute(Select(By::<Arc<Catalog>, _>::new(())));
        let strict = self.config().strict_params;
        let invalid = |param: &filter::QueryParamName,
                       value: &str,
                       reason: String| {
            if strict {
                return Err(tracerr::new!(ExecutionError::InvalidParam {
                    param: param.clone(),
                    value: value.to_owned(),
                    reason,
                }));
            }
            log::warn!(
                "ignoring invalid `{param}` search parameter `{value}`: \
                 {reason}",
            );
            Ok(())
        };

        let mut request = Request::default();
        // Option keys of select parameters not claimed by any filter yet.
        let mut unclaimed =
            Vec::<(&filter::QueryParamName, Vec<filter::OptionKey>)>::new();
        for f in &catalog.filters {
            let Some(param) = f.query_param() else {
                continue;
            };
            let Some(value) = params.get(param.as_str()) else {
                continue;
            };

            let selection = match &f.config {
                C::DateRange(_) => value
                    .parse::<DateRange>()
                    .map(Selection::Dates)
                    .map_err(|e| e.to_string()),
                C::Keyword(_) => match value.trim() {
                    "" => continue,
                    text => Ok(Selection::Keywords(text.to_owned())),
                },
                C::Price(config) => value
                    .parse::<PriceRange>()
                    .map_err(str::to_owned)
                    .and_then(|range| {
                        if config.contains(range.min())
                            && config.contains(range.max())
                        {
                            Ok(Selection::Price(range))
                        } else {
                            Err(format!(
                                "price must lie within {}..={}",
                                config.min, config.max,
                            ))
                        }
                    }),
                C::SelectSingle(config) | C::SelectMultiple(config) => {
                    let at = if let Some(at) =
                        unclaimed.iter().position(|(p, _)| *p == param)
                    {
                        at
                    } else {
                        let keys = option_keys(value, config)
                            .or_else(|reason| {
                                invalid(param, value, reason).map(|()| vec![])
                            })?;
                        unclaimed.push((param, keys));
                        unclaimed.len() - 1
                    };
                    let keys = &mut unclaimed[at].1;

                    let (mut claimed, mut rest): (Vec<_>, Vec<_>) =
                        mem::take(keys)
                            .into_iter()
                            .partition(|k| config.option(k.as_str()).is_some());
                    let single = f.kind() == filter::Kind::SelectSingle;
                    if single && claimed.len() > 1 {
                        rest.extend(claimed.drain(1..));
                    }
                    *keys = rest;

                    if claimed.is_empty() {
                        continue;
                    }
                    Ok(Selection::Options(claimed))
                }
            };

            match selection {
                Ok(s) => request.selections.push((f.id.clone(), s)),
                Err(reason) => invalid(param, value, reason)?,
            }
        }
        for (param, keys) in unclaimed {
            if let Some(key) = keys.first() {
                let value = params.get(param.as_str()).unwrap_or_default();
                invalid(param, value, format!("no filter has `{key}` option"))?;
            }
        }

        let sorting = &catalog.sort_config;
        let param = &sorting.query_param_name;
        if let Some(value) = params.get(param.as_str()) {
            match value.parse::<sort::Key>() {
                Ok(key) if sorting.choice(value).is_some() => {
                    request.sort = Some(key);
                }
                Ok(_) => invalid(param, value, "unknown sort key".into())?,
                Err(reason) => invalid(param, value, reason.into())?,
            }
        }

        for (name, _) in params.iter().filter(|(name, _)| {
            *param != **name
                && !catalog
                    .filters
                    .iter()
                    .filter_map(|f| f.query_param())
                    .any(|p| *p == **name)
        }) {
            log::debug!("ignoring unknown `{name}` search parameter");
        }

        Ok(request)
    }
}

/// Parses option keys out of the `value` of a select query parameter.
///
/// The `value` may be prefixed with the [`filter::SearchMode`] of the
/// provided [`filter::SelectConfig`].
fn option_keys(
    value: &str,
    config: &filter::SelectConfig,
) -> Result<Vec<filter::OptionKey>, String> {
    let list = match value.split_once(':') {
        Some((mode, list)) => {
            let mode = mode
                .parse::<filter::SearchMode>()
                .map_err(|_| format!("unknown search mode `{mode}`"))?;
            if config.effective_search_mode() != Some(mode) {
                return Err(format!("`{mode}` search mode doesn't apply"));
            }
            list
        }
        None => value,
    };

    let mut keys = Vec::new();
    for key in list.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        let key = filter::OptionKey::new(key)
            .ok_or_else(|| format!("invalid option key `{key}`"))?;
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Error of [`ParseParams`] [`Query`] execution.
#[derive(Debug, Display, Error)]
pub enum ExecutionError {
    /// Query parameter has an invalid value.
    #[display("invalid `{param}` search parameter `{value}`: {reason}")]
    InvalidParam {
        /// Name of the invalid query parameter.
        param: filter::QueryParamName,

        /// Invalid value.
        value: String,

        /// Reason of the value being invalid.
        reason: String,
    },
}

#[cfg(all(test, feature = "builtin"))]
mod spec {
    use std::str::FromStr as _;

    use crate::{
        query::{
            search::{fixture, BuildParams},
            Query as _,
        },
        read::search::{Params, Selection},
    };

    use super::{ExecutionError, ParseParams};

    fn params(query: &str) -> Params {
        Params::from_str(query).unwrap()
    }

    fn keys(selection: Option<&Selection>) -> Vec<&str> {
        let Some(Selection::Options(keys)) = selection else {
            panic!("expected options, got: {selection:?}");
        };
        keys.iter().map(|k| k.as_str()).collect()
    }

    #[test]
    fn parses_selections() {
        let request = fixture::builtin(false)
            .execute(ParseParams(params(
                "?pub_category=figurines,t-shirts,apparel\
                 &price=100,500\
                 &keywords=+star+wars+\
                 &sort=-price\
                 &utm_source=newsletter",
            )))
            .unwrap();

        assert_eq!(
            keys(request.selection("top_categories")),
            ["figurines", "apparel"],
        );
        assert_eq!(keys(request.selection("all_categories")), ["t-shirts"]);
        assert_eq!(
            request.selection("price").map(ToString::to_string).as_deref(),
            Some("price 100,500"),
        );
        assert_eq!(
            request.selection("keyword"),
            Some(&Selection::Keywords("star wars".into())),
        );
        assert_eq!(request.sort.unwrap().as_str(), "-price");
        assert_eq!(request.selections.len(), 4);
    }

    #[test]
    fn drops_invalid_params_when_lenient() {
        let request = fixture::builtin(false)
            .execute(ParseParams(params(
                "price=500,100\
                 &pub_brands=neca,lego\
                 &pub_anime=has_all:naruto\
                 &sort=popularity",
            )))
            .unwrap();

        assert_eq!(request.selection("price"), None);
        assert_eq!(keys(request.selection("brands")), ["neca"]);
        assert_eq!(request.selection("anime_series"), None);
        assert_eq!(request.sort, None);
    }

    #[test]
    fn rejects_invalid_params_when_strict() {
        let svc = fixture::builtin(true);
        let param = |query: &str| {
            let err = svc.execute(ParseParams(params(query))).unwrap_err();
            let ExecutionError::InvalidParam { param, .. } = err.as_ref();
            param.to_string()
        };

        assert_eq!(param("price=100,1000000"), "price");
        assert_eq!(param("pub_brands=neca,lego"), "pub_brands");
        assert_eq!(param("pub_anime=has_all:naruto"), "pub_anime");
        assert_eq!(param("sort=popularity"), "sort");

        assert!(svc
            .execute(ParseParams(params("price=100,500&sort=createdAt")))
            .is_ok());
    }

    #[test]
    fn parses_extended_filters() {
        let svc = fixture::extended(true);

        let request = svc
            .execute(ParseParams(params(
                "dates=2024-05-01,2024-05-03\
                 &pub_amenities=has_all:towels,swimming_pool\
                 &pub_condition=new",
            )))
            .unwrap();
        assert_eq!(
            request.selection("dates").map(ToString::to_string).as_deref(),
            Some("dates 2024-05-01,2024-05-03"),
        );
        assert_eq!(
            keys(request.selection("amenities")),
            ["towels", "swimming_pool"],
        );
        assert_eq!(keys(request.selection("condition")), ["new"]);

        assert!(svc
            .execute(ParseParams(params("dates=2024-05-03,2024-05-01")))
            .is_err());
        assert!(svc
            .execute(ParseParams(params("pub_amenities=has_any:towels")))
            .is_err());
        assert!(svc
            .execute(ParseParams(params("pub_condition=new,used")))
            .is_err());
    }

    #[test]
    fn build_reproduces_parsed_params() {
        let svc = fixture::extended(false);

        for query in [
            "pub_category=figurines,apparel,t-shirts&price=0,250",
            "pub_brands=neca&pub_anime=naruto,one_piece&keywords=star%20wars",
            "dates=2024-05-01,2024-05-03&pub_amenities=has_all:towels",
            "price=10,20&sort=-createdAt",
        ] {
            let request = svc.execute(ParseParams(params(query))).unwrap();
            let rebuilt = svc.execute(BuildParams(request)).unwrap();

            assert_eq!(rebuilt.to_string(), query);
        }
    }

    #[test]
    fn build_normalizes_parsed_params() {
        let svc = fixture::builtin(false);

        let request = svc
            .execute(ParseParams(params(
                "keywords=%20funko%20&pub_category=t-shirts,figurines,t-shirts\
                 &sort=-price&price=10,20",
            )))
            .unwrap();
        let rebuilt = svc.execute(BuildParams(request)).unwrap();

        assert_eq!(
            rebuilt.to_string(),
            "pub_category=figurines,t-shirts&price=10,20&keywords=funko\
             &sort=-price",
        );
    }
}
