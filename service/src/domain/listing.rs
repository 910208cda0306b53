//! Listing page [`Config`] definitions.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Configuration of the listing details page.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Public data fields with `enum` schema type shown among the listing
    /// details.
    pub enum_field_details: Vec<FieldName>,
}

impl Config {
    /// Indicates whether the provided public data `field` is shown among
    /// the listing details.
    #[must_use]
    pub fn shows(&self, field: &str) -> bool {
        self.enum_field_details.iter().any(|f| f.0 == field)
    }
}

/// Name of a public data field of a listing.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[derive(Deserialize, Serialize)]
#[as_ref(forward)]
#[serde(transparent)]
pub struct FieldName(String);

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}
