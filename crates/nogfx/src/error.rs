//! Unified error type for the nogfx crates.

use nogfx_protocol::ProtocolError;
use nogfx_telnet::FramingError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each wrapping variant lets `?` convert
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum NogfxError {
    /// A telnet stream problem, such as an oversized GMCP frame.
    #[error(transparent)]
    Framing(#[from] FramingError),

    /// A GMCP message that couldn't be resolved or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The configuration JSON is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// The tracing subscriber couldn't be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_from_framing_error() {
        let err: NogfxError = FramingError::FrameTooLarge { len: 10, max: 8 }.into();
        assert!(matches!(err, NogfxError::Framing(_)));
        assert!(err.to_string().contains("8 bytes"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: NogfxError = ProtocolError::UnknownMessage("Foo.Bar".into()).into();
        assert!(matches!(err, NogfxError::Protocol(_)));
        assert_eq!(err.to_string(), "unknown message 'Foo.Bar'");
    }

    #[test]
    fn test_config_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = NogfxError::Config(json_err);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("invalid configuration: "));
    }
}
