//! In-[`Memory`] [`Store`] implementation.

use std::{convert::Infallible, fmt, fs, io, path::Path, sync::Arc};
#[cfg(feature = "builtin")]
use std::sync::LazyLock;

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use itertools::Itertools as _;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{catalog::Violation, filter, listing, sort, Catalog, Filter},
    read,
};

use super::Store;

/// Built-in [`Catalog`] shared by all the [`Memory`] stores using it.
#[cfg(feature = "builtin")]
static BUILTIN: LazyLock<Arc<Catalog>> =
    LazyLock::new(|| Arc::new(Catalog::marketplace().clone()));

/// [`Store`] keeping an immutable validated [`Catalog`] in memory.
///
/// Clones share the same [`Catalog`].
#[derive(Clone, Debug)]
pub struct Memory {
    /// Stored [`Catalog`].
    catalog: Arc<Catalog>,
}

impl Memory {
    /// Creates a new [`Memory`] store out of the provided [`Catalog`].
    ///
    /// # Errors
    ///
    /// Errors with all the [`Violation`]s if the [`Catalog`] is invalid.
    pub fn new(catalog: Catalog) -> Result<Self, Traced<LoadError>> {
        let violations = catalog.violations();
        if !violations.is_empty() {
            return Err(tracerr::new!(LoadError::Invalid(Violations(
                violations
            ))));
        }

        log::debug!(
            filters = catalog.filters.len(),
            sort_options = catalog.sort_config.options.len(),
            "`Catalog` loaded",
        );
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }

    /// Creates a new [`Memory`] store over the built-in marketplace
    /// [`Catalog`].
    #[cfg(feature = "builtin")]
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            catalog: Arc::clone(&BUILTIN),
        }
    }

    /// Creates a new [`Memory`] store out of the JSON [`Catalog`] read from
    /// the provided `reader`.
    ///
    /// # Errors
    ///
    /// Errors if the JSON is malformed or the [`Catalog`] is invalid.
    pub fn from_json(reader: impl io::Read) -> Result<Self, Traced<LoadError>> {
        let catalog = serde_json::from_reader(io::BufReader::new(reader))
            .map_err(|e| tracerr::new!(LoadError::Json(e)))?;
        Self::new(catalog)
    }

    /// Creates a new [`Memory`] store out of the JSON [`Catalog`] file at
    /// the provided `path`.
    ///
    /// # Errors
    ///
    /// Errors if the file cannot be read, its JSON is malformed or the
    /// [`Catalog`] is invalid.
    pub fn from_path(
        path: impl AsRef<Path>,
    ) -> Result<Self, Traced<LoadError>> {
        let path = path.as_ref();
        log::info!("loading `Catalog` from `{}`", path.display());

        let file =
            fs::File::open(path).map_err(|e| tracerr::new!(LoadError::Io(e)))?;
        Self::from_json(file)
    }

    /// Returns the stored [`Catalog`].
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Error of loading a [`Catalog`] into a [`Memory`] store.
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// Failed to read the [`Catalog`] source.
    #[display("failed to read `Catalog`: {_0}")]
    Io(io::Error),

    /// [`Catalog`] source is not a valid JSON document.
    #[display("malformed `Catalog` JSON: {_0}")]
    Json(serde_json::Error),

    /// [`Catalog`] violates its invariants.
    #[display("invalid `Catalog`: {_0}")]
    #[from(ignore)]
    Invalid(#[error(not(source))] Violations),
}

/// Non-empty list of [`Catalog`] [`Violation`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Returns the [`Violation`]s.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format("; "))
    }
}

impl Store<Select<By<Arc<Catalog>, ()>>> for Memory {
    type Ok = Arc<Catalog>;
    type Err = Infallible;

    fn execute(
        &self,
        _: Select<By<Arc<Catalog>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(Arc::clone(&self.catalog))
    }
}

impl Store<Select<By<Vec<Filter>, read::filter::list::Selector>>>
    for Memory
{
    type Ok = Vec<Filter>;
    type Err = Infallible;

    fn execute(
        &self,
        Select(by): Select<By<Vec<Filter>, read::filter::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::filter::list::Selector { group } = by.into_inner();
        Ok(self
            .catalog
            .filters
            .iter()
            .filter(|f| group.is_none_or(|g| f.group == g))
            .cloned()
            .collect())
    }
}

impl Store<Select<By<Option<Filter>, filter::Id>>> for Memory {
    type Ok = Option<Filter>;
    type Err = Infallible;

    fn execute(
        &self,
        Select(by): Select<By<Option<Filter>, filter::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.catalog.filter(by.inner().as_str()).cloned())
    }
}

impl Store<Select<By<sort::Config, ()>>> for Memory {
    type Ok = sort::Config;
    type Err = Infallible;

    fn execute(
        &self,
        _: Select<By<sort::Config, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.catalog.sort_config.clone())
    }
}

impl Store<Select<By<listing::Config, ()>>> for Memory {
    type Ok = listing::Config;
    type Err = Infallible;

    fn execute(
        &self,
        _: Select<By<listing::Config, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.catalog.listing.clone())
    }
}

#[cfg(all(test, feature = "builtin"))]
mod spec {
    use std::sync::Arc;

    use common::operations::{By, Select};

    use crate::{
        domain::{filter, Catalog},
        infra::Store as _,
        read::filter::list::Selector,
    };

    use super::{LoadError, Memory};

    #[test]
    fn builtin_shares_catalog() {
        let a = Memory::builtin();
        let b = Memory::builtin();

        assert!(Arc::ptr_eq(&a.catalog, &b.catalog));
        assert_eq!(a.catalog(), Catalog::marketplace());
    }

    #[test]
    fn selects_filters_by_group() {
        let store = Memory::builtin();

        let Ok(all) = store.execute(Select(By::new(Selector::default())));
        assert_eq!(all.len(), 8);

        let Ok(primary) = store.execute(Select(By::new(Selector {
            group: Some(filter::Group::Primary),
        })));
        assert_eq!(primary.len(), 3);
        assert!(primary.iter().all(|f| f.group == filter::Group::Primary));
    }

    #[test]
    fn selects_filter_by_id() {
        let store = Memory::builtin();

        let Ok(found) = store.execute(Select(By::<Option<_>, _>::new(
            "brands".parse::<filter::Id>().unwrap(),
        )));
        assert_eq!(found.unwrap().label.as_str(), "Top Brands");

        let Ok(missing) = store.execute(Select(By::<Option<_>, _>::new(
            "amenities".parse::<filter::Id>().unwrap(),
        )));
        assert!(missing.is_none());
    }

    #[test]
    fn loads_json() {
        let json = serde_json::to_vec(Catalog::marketplace()).unwrap();
        let store = Memory::from_json(json.as_slice()).unwrap();

        assert_eq!(store.catalog(), Catalog::marketplace());
    }

    #[test]
    fn refuses_malformed_json() {
        let err = Memory::from_json(&b"{\"filters\": ["[..]).unwrap_err();

        assert!(matches!(err.as_ref(), LoadError::Json(_)));
    }

    #[test]
    fn refuses_invalid_catalog() {
        let mut catalog = Catalog::marketplace().clone();
        catalog.filters.push(catalog.filters[0].clone());
        catalog.sort_config.options.push(catalog.sort_config.options[0].clone());

        let err = Memory::new(catalog).unwrap_err();
        let LoadError::Invalid(violations) = err.as_ref() else {
            panic!("expected `LoadError::Invalid`, got: {err}");
        };
        assert_eq!(violations.as_slice().len(), 2);
        assert_eq!(
            err.as_ref().to_string(),
            "invalid `Catalog`: `Filter(id: top_categories)` is defined more \
             than once; sort option `createdAt` is defined more than once",
        );
    }

    #[test]
    fn refuses_missing_file() {
        let err = Memory::from_path("/nonexistent/catalog.json").unwrap_err();

        assert!(matches!(err.as_ref(), LoadError::Io(_)));
    }
}
