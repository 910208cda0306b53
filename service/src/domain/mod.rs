//! Domain definitions.

pub mod catalog;
pub mod filter;
pub mod listing;
pub mod sort;

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

pub use self::{catalog::Catalog, filter::Filter};

/// Default display string, possibly a translation key.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[derive(Deserialize, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Creates a new [`Label`].
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns this [`Label`] as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
