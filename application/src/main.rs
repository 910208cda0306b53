use std::{io, process::ExitCode, sync::OnceLock};

use application::{build_service, command, AsError, Args, Config, Error};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

fn main() -> ExitCode {
    // Standard output is reserved for the command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO)
                            >= *meta.level()
                })),
        )
        .init();

    match start() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code)
        }
    }
}

fn start() -> Result<String, Error> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        catalog,
        search,
        output,
        log,
    } = Config::new(config).map_err(AsError::into_error)?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service =
        build_service(&catalog, search).map_err(AsError::into_error)?;

    command::execute(&service, command, output)
}
