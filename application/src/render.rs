//! Plain [`Text`] rendering of the search configuration.

use std::fmt::Write as _;

use itertools::Itertools as _;
use service::{
    domain::{
        filter::{DateRangeConfig, KeywordConfig, PriceConfig, SelectConfig},
        listing, sort, Filter,
    },
    FilterComponent,
};

/// [`FilterComponent`] rendering [`Filter`]s as plain text lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct Text {
    /// Indicator whether options of select [`Filter`]s are listed.
    pub options: bool,
}

impl Text {
    /// Renders the line describing the provided [`Filter`].
    fn header(filter: &Filter) -> String {
        format!(
            "{} [{}] {} ({}) -> {}",
            filter.id,
            filter.group,
            filter.kind(),
            filter.label,
            filter.query_param_names.iter().format(", "),
        )
    }

    /// Renders a select [`Filter`].
    fn select(&self, filter: &Filter, config: &SelectConfig) -> String {
        let mut out = format!(
            "{}: {} {}",
            Self::header(filter),
            config.schema_type,
            config.options.len(),
        );
        out.push_str(if config.options.len() == 1 {
            " option"
        } else {
            " options"
        });
        if let Some(mode) = config.effective_search_mode() {
            _ = write!(out, ", {mode}");
        }
        if self.options {
            for o in &config.options {
                _ = write!(out, "\n  {}: {}", o.key, o.label);
            }
        }
        out
    }
}

impl FilterComponent for Text {
    type Output = String;

    fn date_range(&mut self, filter: &Filter, _: &DateRangeConfig) -> String {
        Self::header(filter)
    }

    fn keyword(&mut self, filter: &Filter, _: &KeywordConfig) -> String {
        Self::header(filter)
    }

    fn price(&mut self, filter: &Filter, config: &PriceConfig) -> String {
        format!(
            "{}: {}..={} by {}",
            Self::header(filter),
            config.min,
            config.max,
            config.step,
        )
    }

    fn select_single(
        &mut self,
        filter: &Filter,
        config: &SelectConfig,
    ) -> String {
        self.select(filter, config)
    }

    fn select_multiple(
        &mut self,
        filter: &Filter,
        config: &SelectConfig,
    ) -> String {
        self.select(filter, config)
    }
}

/// Renders the provided [`sort::Config`].
#[must_use]
pub fn sort(config: &sort::Config) -> String {
    let mut out = format!(
        "{} -> {}",
        if config.active { "active" } else { "inactive" },
        config.query_param_name,
    );
    if !config.conflicting_filters.is_empty() {
        _ = write!(
            out,
            ", disabled by {}",
            config.conflicting_filters.iter().format(", "),
        );
    }
    for choice in &config.options {
        _ = write!(out, "\n  {}: {}", choice.key, choice.label);
        if let Some(long) = &choice.long_label {
            _ = write!(out, " ({long})");
        }
        if config.is_relevance(&choice.key) {
            _ = write!(out, " [relevance, by {}]", config.relevance_filter);
        }
    }
    out
}

/// Renders the provided [`listing::Config`].
#[must_use]
pub fn listing(config: &listing::Config) -> String {
    format!(
        "enum field details: {}",
        config.enum_field_details.iter().format(", "),
    )
}
