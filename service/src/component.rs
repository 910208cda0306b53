//! [`FilterComponent`] dispatch contract.

use crate::domain::filter::{
    DateRangeConfig, Filter, KeywordConfig, PriceConfig, SelectConfig,
};
#[cfg(doc)]
use crate::domain::filter::Kind;

/// Component rendering [`Filter`]s, polymorphic over their [`Kind`].
///
/// [`Filter::render_with()`] calls exactly one method of this trait: the one
/// matching the [`Kind`] of the [`Filter`], along with its typed config.
/// Supporting a new [`Kind`] means adding a method here, so every renderer
/// is forced to handle it.
pub trait FilterComponent {
    /// Result of rendering a single [`Filter`].
    type Output;

    /// Renders a [`Kind::DateRange`] [`Filter`].
    fn date_range(
        &mut self,
        filter: &Filter,
        config: &DateRangeConfig,
    ) -> Self::Output;

    /// Renders a [`Kind::Keyword`] [`Filter`].
    fn keyword(&mut self, filter: &Filter, config: &KeywordConfig)
        -> Self::Output;

    /// Renders a [`Kind::Price`] [`Filter`].
    fn price(&mut self, filter: &Filter, config: &PriceConfig) -> Self::Output;

    /// Renders a [`Kind::SelectSingle`] [`Filter`].
    fn select_single(
        &mut self,
        filter: &Filter,
        config: &SelectConfig,
    ) -> Self::Output;

    /// Renders a [`Kind::SelectMultiple`] [`Filter`].
    fn select_multiple(
        &mut self,
        filter: &Filter,
        config: &SelectConfig,
    ) -> Self::Output;
}

#[cfg(all(test, feature = "builtin"))]
mod spec {
    use crate::domain::{
        filter::{
            DateRangeConfig, Filter, KeywordConfig, Kind, PriceConfig,
            SelectConfig,
        },
        Catalog,
    };

    use super::FilterComponent;

    /// Records which method every [`Filter`] was dispatched to.
    #[derive(Debug, Default)]
    struct Recorder(Vec<(String, Kind)>);

    impl FilterComponent for Recorder {
        type Output = usize;

        fn date_range(&mut self, f: &Filter, _: &DateRangeConfig) -> usize {
            self.0.push((f.id.to_string(), Kind::DateRange));
            0
        }

        fn keyword(&mut self, f: &Filter, _: &KeywordConfig) -> usize {
            self.0.push((f.id.to_string(), Kind::Keyword));
            0
        }

        fn price(&mut self, f: &Filter, c: &PriceConfig) -> usize {
            self.0.push((f.id.to_string(), Kind::Price));
            usize::try_from(c.max).unwrap()
        }

        fn select_single(&mut self, f: &Filter, c: &SelectConfig) -> usize {
            self.0.push((f.id.to_string(), Kind::SelectSingle));
            c.options.len()
        }

        fn select_multiple(&mut self, f: &Filter, c: &SelectConfig) -> usize {
            self.0.push((f.id.to_string(), Kind::SelectMultiple));
            c.options.len()
        }
    }

    #[test]
    fn dispatches_by_kind() {
        let mut recorder = Recorder::default();
        let outputs = Catalog::marketplace()
            .filters
            .iter()
            .map(|f| f.render_with(&mut recorder))
            .collect::<Vec<_>>();

        assert_eq!(outputs, [5, 16, 30, 41, 32, 33, 999_999, 0]);
        for (f, (id, kind)) in
            Catalog::marketplace().filters.iter().zip(&recorder.0)
        {
            assert_eq!(f.id.as_str(), id);
            assert_eq!(f.kind(), *kind);
        }
    }

    #[test]
    fn dispatches_through_trait_objects() {
        let mut recorder = Recorder::default();
        let component: &mut dyn FilterComponent<Output = usize> = &mut recorder;
        let keyword = Catalog::marketplace().filter("keyword").unwrap();

        assert_eq!(keyword.render_with(component), 0);
        assert_eq!(recorder.0, [("keyword".to_owned(), Kind::Keyword)]);
    }
}
