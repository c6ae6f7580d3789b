//! Logging setup for binaries built on Fieldwar.
//!
//! The library crates only emit `tracing` events; nothing is printed
//! until a subscriber is installed. [`init`] installs the usual one:
//! formatted output to stderr, filtered by `RUST_LOG` when set.

use tracing_subscriber::{EnvFilter, fmt};

use crate::FieldwarError;

/// Installs a global `fmt` subscriber.
///
/// `default_filter` (for example `"info"` or `"fieldwar=debug"`) applies
/// when `RUST_LOG` is unset or unparsable.
///
/// # Errors
/// [`FieldwarError::Logging`] if a global subscriber is already set.
pub fn init(default_filter: &str) -> Result<(), FieldwarError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| FieldwarError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_returns_error() {
        // Whichever call comes first in this process wins; the second
        // must report the conflict instead of panicking.
        let _ = init("warn");
        let second = init("warn");
        assert!(matches!(second, Err(FieldwarError::Logging(_))));
    }
}
