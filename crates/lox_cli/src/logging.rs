use std::error::Error;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static LOGGING_INIT: Once = Once::new();

pub type InitError = Box<dyn Error + Send + Sync>;

/// Initializes global logging for the `lox` process.
///
/// Logs go to stderr so token output on stdout stays machine readable.
/// Repeated calls are treated as no-ops once initialization succeeds.
pub fn init_logging(verbose: bool) -> Result<(), InitError> {
    let mut init_result = Ok(());

    LOGGING_INIT.call_once(|| {
        init_result = tracing_subscriber::fmt()
            .with_env_filter(default_env_filter(verbose))
            .with_writer(std::io::stderr)
            .try_init();
    });

    init_result
}

fn default_env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn"),
    }
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn init_logging_is_idempotent() {
        assert!(init_logging(false).is_ok());
        assert!(init_logging(true).is_ok());
    }
}
