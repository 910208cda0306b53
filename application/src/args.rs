//! [`Args`] definitions.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use service::domain::{filter, sort};

/// Inspector of the marketplace search configuration.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command of the application.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Lists the search filters, in display order.
    Filters {
        /// Group to narrow the list to (`primary` or `secondary`).
        #[arg(short, long)]
        group: Option<filter::Group>,
    },

    /// Shows a single search filter along with its options.
    Filter {
        /// ID of the filter.
        id: filter::Id,
    },

    /// Shows the sorting configuration.
    Sort,

    /// Shows the listing page configuration.
    Listing,

    /// Validates the configuration, reporting every violation.
    Validate,

    /// Prints the whole configuration as JSON.
    Dump,

    /// Builds the query string of a search API request.
    Build {
        /// Selection of a filter, as `<id>=<value>`.
        ///
        /// Values are `<start>,<end>` dates, `<min>,<max>` prices, keywords
        /// text or comma-separated option keys.
        #[arg(short = 's', long = "select", value_name = "ID=VALUE")]
        selections: Vec<SelectionArg>,

        /// Key of the sort order.
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<sort::Key>,
    },

    /// Parses the query string of a search API request.
    Parse {
        /// Query string, with or without the leading `?`.
        query: String,
    },
}

/// Raw filter selection provided on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionArg {
    /// ID of the selected filter.
    pub id: filter::Id,

    /// Raw selected value, interpreted according to the filter type.
    pub value: String,
}

impl FromStr for SelectionArg {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, value) =
            s.split_once('=').ok_or("selection must be `<id>=<value>`")?;
        Ok(Self {
            id: id.trim().parse()?,
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::domain::filter;

    use super::{Args, Command, SelectionArg};

    #[test]
    fn parses_build_command() {
        let args = Args::try_parse_from([
            "application",
            "build",
            "--select",
            "price=100,500",
            "-s",
            "keyword=star wars",
            "--sort",
            "-price",
        ])
        .unwrap();

        assert_eq!(args.config, "config.toml");
        let Command::Build { selections, sort } = args.command else {
            panic!("expected `build` command");
        };
        assert_eq!(
            selections,
            [
                SelectionArg {
                    id: "price".parse().unwrap(),
                    value: "100,500".into(),
                },
                SelectionArg {
                    id: "keyword".parse().unwrap(),
                    value: "star wars".into(),
                },
            ],
        );
        assert_eq!(sort.unwrap().as_str(), "-price");
    }

    #[test]
    fn parses_filters_command() {
        let args = Args::try_parse_from([
            "application",
            "--config",
            "custom.toml",
            "filters",
            "--group",
            "secondary",
        ])
        .unwrap();

        assert_eq!(args.config, "custom.toml");
        assert!(matches!(
            args.command,
            Command::Filters {
                group: Some(filter::Group::Secondary),
            },
        ));
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(Args::try_parse_from(["application", "build", "-s", "price"])
            .is_err());
        assert!(
            Args::try_parse_from(["application", "filters", "-g", "tertiary"])
                .is_err()
        );
        assert!(Args::try_parse_from(["application"]).is_err());
    }
}
