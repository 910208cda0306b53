//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Every variant is bound to the exact string it is known by on the wire,
/// which is used for its [`Display`], [`FromStr`] and [`serde`]
/// representations.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = "cube",
///
///         #[doc = "A sphere"]
///         Sphere = "sphere",
///     }
/// }
///
/// assert_eq!(Kind::Cube.as_str(), "cube");
/// assert_eq!("sphere".parse::<Kind>().unwrap(), Kind::Sphere);
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
/// [`serde`]: https://docs.rs/serde
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::serde::Deserialize,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                #[serde(rename = $value)]
                #[strum(serialize = $value)]
                $variant,
            )*
        }

        impl $name {
            /// All the variants, in their declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the string this variant is known by.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $value,
                    )*
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}
