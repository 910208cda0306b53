//! Application provides command-line access to the [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod args;
pub mod command;
pub mod config;
pub mod error;
pub mod render;

use service::infra::Memory;
use tracerr::Traced;
use tracing as log;
// Used in binary.
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<Memory>;

/// Creates a new [`Service`] over the [`Catalog`] configured by the provided
/// [`config::Catalog`], falling back to the built-in one.
///
/// [`Catalog`]: service::domain::Catalog
///
/// # Errors
///
/// Errors if the configured [`Catalog`] cannot be loaded.
pub fn build_service(
    catalog: &config::Catalog,
    search: config::Search,
) -> Result<Service, Traced<service::infra::store::memory::LoadError>> {
    let store = if let Some(path) = &catalog.path {
        Memory::from_path(path)?
    } else {
        log::debug!("using built-in `Catalog`");
        Memory::builtin()
    };
    Ok(Service::new(search.into(), store))
}
