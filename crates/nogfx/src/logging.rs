//! Tracing subscriber setup for applications embedding nogfx.

use tracing_subscriber::EnvFilter;

use crate::NogfxError;

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g.
/// `"nogfx=debug"`) is used. Calling this twice returns
/// [`NogfxError::Logging`] rather than panicking.
pub fn init(default_filter: &str) -> Result<(), NogfxError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|err| NogfxError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| NogfxError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init("debug");
        assert!(matches!(init("debug"), Err(NogfxError::Logging(_))));
    }
}
