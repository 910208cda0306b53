//! [`Command`] execution.

use std::str::FromStr as _;

use common::DateRange;
use itertools::Itertools as _;
use service::{
    domain::{filter, Catalog},
    query::{
        self,
        search::{build, parse, BuildParams, ParseParams},
    },
    read::{
        self,
        search::{Params, PriceRange, Request, Selection},
    },
    Query as _,
};
use tracing as log;

use crate::{
    args::{Command, SelectionArg},
    config, define_error, render, AsError, Error, Service,
};

/// Executes the provided [`Command`] against the provided [`Service`],
/// returning the text to output.
///
/// # Errors
///
/// Errors if the [`Command`] fails.
pub fn execute(
    svc: &Service,
    command: Command,
    output: config::Output,
) -> Result<String, Error> {
    log::debug!("executing `{command:?}`");

    match command {
        Command::Filters { group } => {
            let Ok(filters) = svc.execute(query::filters::List::by(
                read::filter::list::Selector { group },
            ));
            let mut text = render::Text {
                options: output.options,
            };
            Ok(filters.iter().map(|f| f.render_with(&mut text)).join("\n"))
        }
        Command::Filter { id } => {
            let Ok(filter) = svc.execute(query::filter::ById::by(id));
            filter
                .map(|f| f.render_with(&mut render::Text { options: true }))
                .ok_or_else(|| FilterError::NotExists.into())
        }
        Command::Sort => {
            let Ok(config) = svc.execute(query::catalog::Sort::by(()));
            Ok(render::sort(&config))
        }
        Command::Listing => {
            let Ok(config) = svc.execute(query::catalog::Listing::by(()));
            Ok(render::listing(&config))
        }
        Command::Validate => {
            let Ok(catalog) = svc.execute(query::catalog::Whole::by(()));
            let violations = catalog.violations();
            if !violations.is_empty() {
                return Err(Error::from(CatalogError::Invalid)
                    .caused_by(&violations.iter().format("; ")));
            }
            Ok(format!(
                "`Catalog` is valid: {} filters, {} sort options",
                catalog.filters.len(),
                catalog.sort_config.options.len(),
            ))
        }
        Command::Dump => {
            let Ok(catalog) = svc.execute(query::catalog::Whole::by(()));
            let json = if output.pretty {
                serde_json::to_string_pretty(&*catalog)
            } else {
                serde_json::to_string(&*catalog)
            };
            json.map_err(AsError::into_error)
        }
        Command::Build { selections, sort } => {
            let Ok(catalog) = svc.execute(query::catalog::Whole::by(()));
            let selections = selections
                .into_iter()
                .map(|arg| selection(&catalog, arg))
                .collect::<Result<Vec<_>, _>>()?;

            let params = svc
                .execute(BuildParams(Request { selections, sort }))
                .map_err(AsError::into_error)?;
            Ok(params.to_string())
        }
        Command::Parse { query: raw } => {
            let params = Params::from_str(&raw).map_err(AsError::into_error)?;
            let request = svc
                .execute(ParseParams(params))
                .map_err(AsError::into_error)?;

            let mut lines = request
                .selections
                .iter()
                .map(|(id, s)| format!("{id}: {s}"))
                .collect::<Vec<_>>();
            if let Some(key) = &request.sort {
                lines.push(format!("sort: {key}"));
            }
            let rebuilt = svc
                .execute(BuildParams(request))
                .map_err(AsError::into_error)?;
            lines.push(format!("query: {rebuilt}"));

            Ok(lines.join("\n"))
        }
    }
}

/// Interprets the provided [`SelectionArg`] according to the type of the
/// selected [`filter`].
fn selection(
    catalog: &Catalog,
    arg: SelectionArg,
) -> Result<(filter::Id, Selection), Error> {
    use filter::Config as C;

    let SelectionArg { id, value } = arg;
    let Some(f) = catalog.filter(id.as_str()) else {
        return Err(Error::from(SelectionError::UnknownFilter).caused_by(&id));
    };

    let selection = match &f.config {
        C::DateRange(_) => DateRange::from_str(&value)
            .map(Selection::Dates)
            .map_err(|e| e.to_string()),
        C::Keyword(_) => Ok(Selection::Keywords(value.clone())),
        C::Price(_) => PriceRange::from_str(&value)
            .map(Selection::Price)
            .map_err(str::to_owned),
        C::SelectSingle(_) | C::SelectMultiple(_) => value
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(filter::OptionKey::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Selection::Options)
            .map_err(str::to_owned),
    };
    match selection {
        Ok(s) => Ok((id, s)),
        Err(reason) => Err(Error::from(SelectionError::Invalid)
            .caused_by(&format_args!("`{id}={value}`: {reason}"))),
    }
}

define_error! {
    enum CatalogError {
        #[code = "CATALOG_INVALID"]
        #[exit = DATA_ERR]
        #[message = "`Catalog` violates its invariants"]
        Invalid,
    }
}

define_error! {
    enum FilterError {
        #[code = "FILTER_NOT_EXISTS"]
        #[exit = USAGE]
        #[message = "`Filter` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum SelectionError {
        #[code = "UNKNOWN_FILTER"]
        #[exit = USAGE]
        #[message = "Selected `Filter` does not exist"]
        UnknownFilter,

        #[code = "INVALID_SELECTION"]
        #[exit = USAGE]
        #[message = "Selected value doesn't fit the `Filter` type"]
        Invalid,
    }
}

impl AsError for build::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "UNKNOWN_FILTER"]
                #[exit = USAGE]
                #[message = "Selected `Filter` does not exist"]
                UnknownFilter,

                #[code = "DUPLICATE_SELECTION"]
                #[exit = USAGE]
                #[message = "`Filter` is selected more than once"]
                DuplicateSelection,

                #[code = "INVALID_SELECTION"]
                #[exit = USAGE]
                #[message = "Selected value doesn't fit the `Filter` type"]
                SelectionMismatch,

                #[code = "PRICE_OUT_OF_BOUNDS"]
                #[exit = USAGE]
                #[message = "Price range exceeds the `Filter` bounds"]
                PriceOutOfBounds,

                #[code = "TOO_MANY_OPTIONS"]
                #[exit = USAGE]
                #[message = "`Filter` accepts a single option only"]
                TooManyOptions,

                #[code = "UNKNOWN_OPTION"]
                #[exit = USAGE]
                #[message = "Selected option doesn't belong to the `Filter`"]
                UnknownOption,

                #[code = "UNKNOWN_SORT_KEY"]
                #[exit = USAGE]
                #[message = "Sort key does not exist"]
                UnknownSortKey,

                #[code = "CATALOG_INVALID"]
                #[exit = DATA_ERR]
                #[message = "`Catalog` violates its invariants"]
                CatalogInvalid,
            }
        }

        let err = match self {
            Self::UnknownFilter(_) => Error::UnknownFilter,
            Self::DuplicateSelection(_) => Error::DuplicateSelection,
            Self::SelectionMismatch { .. } => Error::SelectionMismatch,
            Self::PriceOutOfBounds { .. } => Error::PriceOutOfBounds,
            Self::TooManyOptions(_) => Error::TooManyOptions,
            Self::UnknownOption { .. } => Error::UnknownOption,
            Self::UnknownSortKey(_) => Error::UnknownSortKey,
            Self::NoQueryParam(_) | Self::ParamConflict(_) => {
                Error::CatalogInvalid
            }
        };
        Some(crate::Error::from(err).caused_by(self))
    }
}

impl AsError for parse::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_PARAM"]
                #[exit = DATA_ERR]
                #[message = "Search parameter has an invalid value"]
                InvalidParam,
            }
        }

        match self {
            Self::InvalidParam { .. } => {
                Some(crate::Error::from(Error::InvalidParam).caused_by(self))
            }
        }
    }
}

impl AsError for read::search::ParseError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "MALFORMED_QUERY"]
                #[exit = USAGE]
                #[message = "Query string is malformed"]
                MalformedQuery,
            }
        }

        Some(crate::Error::from(Error::MalformedQuery).caused_by(self))
    }
}

#[cfg(test)]
mod spec {
    use service::{domain::Catalog, infra::Memory};

    use crate::{
        args::{Command, SelectionArg},
        config, error::exit, Error, Service,
    };

    fn svc(strict_params: bool) -> Service {
        Service::new(service::Config { strict_params }, Memory::builtin())
    }

    fn run(command: Command) -> Result<String, Error> {
        super::execute(&svc(false), command, config::Output::default())
    }

    fn select(arg: &str) -> SelectionArg {
        arg.parse().unwrap()
    }

    #[test]
    fn lists_filters() {
        let out = run(Command::Filters {
            group: Some(service::domain::filter::Group::Primary),
        })
        .unwrap();

        assert_eq!(
            out.lines()
                .map(|l| l.split(' ').next().unwrap())
                .collect::<Vec<_>>(),
            ["top_categories", "price", "keyword"],
        );
        let all = run(Command::Filters { group: None }).unwrap();
        assert_eq!(all.lines().count(), 8);
    }

    #[test]
    fn shows_filter() {
        let out = run(Command::Filter {
            id: "anime_series".parse().unwrap(),
        })
        .unwrap();
        assert_eq!(out.lines().count(), 42);

        let err = run(Command::Filter {
            id: "amenities".parse().unwrap(),
        })
        .unwrap_err();
        assert_eq!(err.code, "FILTER_NOT_EXISTS");
        assert_eq!(err.exit_code, exit::USAGE);
    }

    #[test]
    fn validates_and_dumps_catalog() {
        assert_eq!(
            run(Command::Validate).unwrap(),
            "`Catalog` is valid: 8 filters, 5 sort options",
        );

        let json = run(Command::Dump).unwrap();
        let catalog: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(&catalog, Catalog::marketplace());
    }

    #[test]
    fn builds_query_string() {
        let out = run(Command::Build {
            selections: vec![
                select("price=100,500"),
                select("top_categories=figurines, apparel"),
                select("keyword=star wars"),
            ],
            sort: Some("relevance".parse().unwrap()),
        })
        .unwrap();

        assert_eq!(
            out,
            "pub_category=figurines,apparel&price=100,500&keywords=star%20wars",
        );
    }

    #[test]
    fn reports_build_errors() {
        let code = |arg: &str| {
            let err = run(Command::Build {
                selections: vec![select(arg)],
                sort: None,
            })
            .unwrap_err();
            assert_eq!(err.exit_code, exit::USAGE);
            err.code
        };

        assert_eq!(code("price=abc"), "INVALID_SELECTION");
        assert_eq!(code("amenities=towels"), "UNKNOWN_FILTER");
        assert_eq!(code("brands=lego"), "UNKNOWN_OPTION");
        assert_eq!(code("price=0,1000000"), "PRICE_OUT_OF_BOUNDS");
    }

    #[test]
    fn reports_catalog_conflicts_as_data_errors() {
        use service::{
            domain::filter::{Id, QueryParamName},
            query::search::build::ExecutionError,
        };

        use crate::AsError as _;

        let param = "pub_category".parse::<QueryParamName>().unwrap();
        let err = ExecutionError::ParamConflict(param).as_error();
        assert_eq!(err.code, "CATALOG_INVALID");
        assert_eq!(err.exit_code, exit::DATA_ERR);

        let id = "brands".parse::<Id>().unwrap();
        let err = ExecutionError::NoQueryParam(id).as_error();
        assert_eq!(err.code, "CATALOG_INVALID");
    }

    #[test]
    fn parses_query_string() {
        let out = run(Command::Parse {
            query: "?price=100%2C500&sort=createdAt&keywords=funko\
                    &utm.source=mail&filter[x]=1"
                .into(),
        })
        .unwrap();

        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            [
                "price: price 100,500",
                "keyword: keywords \"funko\"",
                "sort: createdAt",
                "query: price=100,500&keywords=funko&sort=createdAt",
            ],
        );
    }

    #[test]
    fn reports_parse_errors() {
        let err = super::execute(
            &svc(true),
            Command::Parse {
                query: "price=500,100".into(),
            },
            config::Output::default(),
        )
        .unwrap_err();
        assert_eq!(err.code, "INVALID_PARAM");
        assert_eq!(err.exit_code, exit::DATA_ERR);
        assert!(err.backtrace.is_some());

        let err = run(Command::Parse {
            query: "keywords=%FF".into(),
        })
        .unwrap_err();
        assert_eq!(err.code, "MALFORMED_QUERY");
    }
}
