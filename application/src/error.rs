//! [`Error`]-related definitions.

use std::fmt;

use config::ConfigError;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::infra::store::memory::LoadError;
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[exit = $exit_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            exit_code: $crate::error::exit::$exit_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Process exit codes of [`Error`]s, as defined by `sysexits.h`.
pub mod exit {
    /// Command was used incorrectly.
    pub const USAGE: u8 = 64;

    /// Input data was incorrect.
    pub const DATA_ERR: u8 = 65;

    /// Input file did not exist or was not readable.
    pub const NO_INPUT: u8 = 66;

    /// Internal software error.
    pub const SOFTWARE: u8 = 70;

    /// Something was found in an unconfigured or misconfigured state.
    pub const CONFIG: u8 = 78;
}

/// Command-line application [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Process exit code of this [`Error`].
    pub exit_code: u8,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            exit_code: exit::SOFTWARE,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Appends the description of the provided `cause` to the message of
    /// this [`Error`].
    #[must_use]
    pub fn caused_by(mut self, cause: &impl fmt::Display) -> Self {
        self.message = format!("{}: {cause}", self.message);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            exit_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for ConfigError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_CONFIG"]
                #[exit = CONFIG]
                #[message = "Failed to load configuration"]
                InvalidConfig,
            }
        }

        Some(crate::Error::from(Error::InvalidConfig).caused_by(self))
    }
}

impl AsError for LoadError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CATALOG_UNREADABLE"]
                #[exit = NO_INPUT]
                #[message = "Failed to read `Catalog` file"]
                Unreadable,

                #[code = "CATALOG_MALFORMED"]
                #[exit = DATA_ERR]
                #[message = "`Catalog` file is not a valid JSON `Catalog`"]
                Malformed,

                #[code = "CATALOG_INVALID"]
                #[exit = DATA_ERR]
                #[message = "`Catalog` violates its invariants"]
                Invalid,
            }
        }

        Some(match self {
            Self::Io(e) => crate::Error::from(Error::Unreadable).caused_by(e),
            Self::Json(e) => crate::Error::from(Error::Malformed).caused_by(e),
            Self::Invalid(v) => crate::Error::from(Error::Invalid).caused_by(v),
        })
    }
}

impl AsError for serde_json::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use service::infra::{store::memory::LoadError, Memory};

    use super::{exit, AsError as _, Error};

    #[test]
    fn formats_code_and_message() {
        let err = Error::internal(&"boom").caused_by(&"details");

        assert_eq!(err.to_string(), "[INTERNAL_ERROR]: boom: details");
        assert_eq!(err.exit_code, exit::SOFTWARE);
    }

    #[test]
    fn maps_catalog_load_errors() {
        let err = Memory::from_json(&b"[]"[..]).unwrap_err();
        assert!(matches!(err.as_ref(), LoadError::Json(_)));

        let error = err.as_error();
        assert_eq!(error.code, "CATALOG_MALFORMED");
        assert_eq!(error.exit_code, exit::DATA_ERR);
        assert!(error.backtrace.is_some());

        let error = Memory::from_path("/nonexistent/catalog.json")
            .unwrap_err()
            .into_error();
        assert_eq!(error.code, "CATALOG_UNREADABLE");
        assert_eq!(error.exit_code, exit::NO_INPUT);
    }
}
