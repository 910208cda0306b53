//! [`Filter`] read model definitions.
//!
//! [`Filter`]: crate::domain::Filter

pub mod list {
    //! [`Filter`]s list definitions.

    use crate::domain::filter;
    #[cfg(doc)]
    use crate::domain::Filter;

    /// Selector of a [`Filter`]s list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Selector {
        /// [`filter::Group`] to narrow the list to, if any.
        pub group: Option<filter::Group>,
    }
}
