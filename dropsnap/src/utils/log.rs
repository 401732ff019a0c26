use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{filter::ParseError, layer::SubscriberExt, EnvFilter};

/// Builds the subscriber for `level_regex`, an `EnvFilter` directive such as `info` or
/// `dropsnap_core=trace`. An unparsable directive falls back to `debug` and is returned so the
/// caller can report it once logging works.
#[must_use]
pub fn parse_log_level(level_regex: &str) -> (impl Subscriber, Option<ParseError>) {
    let mut parse_err = None;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .parse(level_regex)
        .unwrap_or_else(|err| {
            parse_err = Some(err);
            EnvFilter::new("debug")
        });
    (get_subscribers(filter), parse_err)
}

pub fn get_subscribers(filter: EnvFilter) -> impl Subscriber {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Errors if a global subscriber was already set.
pub fn setup_logging(level_regex: &str) -> anyhow::Result<()> {
    let (subscriber, parse_err) = parse_log_level(level_regex);
    tracing::subscriber::set_global_default(subscriber)?;
    if let Some(err) = parse_err {
        tracing::warn!("Error parsing log_level config: {err}");
    }
    Ok(())
}
