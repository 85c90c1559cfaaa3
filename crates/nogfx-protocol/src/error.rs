//! Error types for the GMCP protocol layer.
//!
//! Two levels, mirroring the decode pipeline:
//!
//! - [`ScalarError`] — a single wire value didn't fit its encoding
//!   (a rank that isn't a number, an unknown attribute character, ...).
//! - [`ProtocolError`] — everything a message decode or dispatch can
//!   report. Scalar failures are wrapped with the field they came from,
//!   and dispatch wraps every decode failure with the message name, so a
//!   single log line reads from outermost context down to the root cause.

use std::num::{ParseFloatError, ParseIntError};

/// A wire value that doesn't match its scalar encoding.
#[derive(Debug, thiserror::Error)]
pub enum ScalarError {
    /// A string-encoded integer that isn't one.
    #[error("'{value}' is not a number")]
    Number {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The integer half of a `"69 (23.45%)"` level.
    #[error("level '{value}' is not a number")]
    Level {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The percent half of a `"69 (23.45%)"` level.
    #[error("level progress '{value}' is not a number")]
    LevelProgress {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// The parenthesised suffix of a `"Name (N)"` value.
    #[error("rank progress '{value}' is not a number")]
    Rank {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A `"Name (N)"` value where the rank is mandatory but missing.
    #[error("missing rank in '{0}'")]
    MissingRank(String),

    /// A character outside a bitmask-character vocabulary.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(char),

    /// A token outside a fixed flag vocabulary.
    #[error("unknown detail '{0}'")]
    UnknownDetail(String),

    /// A `"Name N"` capability whose version isn't a number.
    #[error("module '{module}' has invalid version '{value}'")]
    Version {
        module: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A composite value that doesn't have the expected shape.
    #[error("malformed value '{0}'")]
    Malformed(String),
}

/// Errors produced while decoding or dispatching GMCP messages.
///
/// Encoding never fails; every in-memory message value has a wire form.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// No registry in the fallback chain knows this name.
    #[error("unknown message '{0}'")]
    UnknownMessage(String),

    /// The body isn't valid JSON, or has the wrong JSON shape.
    #[error("malformed body: {0}")]
    Body(#[source] serde_json::Error),

    /// A field parsed as JSON but its value failed a scalar transform.
    #[error("invalid '{field}': {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: ScalarError,
    },

    /// Context added by dispatch: which message failed to decode.
    #[error("failed decoding '{id}': {source}")]
    Message {
        id: &'static str,
        #[source]
        source: Box<ProtocolError>,
    },

    /// A strict registry refused a second registration for a name.
    #[error("message '{0}' is already registered")]
    DuplicateMessage(&'static str),
}

impl ProtocolError {
    /// Returns a closure that wraps a [`ScalarError`] with `field`.
    ///
    /// Meant for `map_err`:
    ///
    /// ```
    /// use nogfx_protocol::{transcode, ProtocolError};
    ///
    /// let err = transcode::parse_int::<u32>("x")
    ///     .map_err(ProtocolError::field("age"))
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "invalid 'age': 'x' is not a number");
    /// ```
    pub fn field(field: &'static str) -> impl FnOnce(ScalarError) -> Self {
        move |source| Self::InvalidField { field, source }
    }

    /// Wraps `self` with the name of the message being decoded.
    pub fn in_message(self, id: &'static str) -> Self {
        Self::Message {
            id,
            source: Box::new(self),
        }
    }

    /// Walks through [`ProtocolError::Message`] layers to the root cause.
    pub fn root(&self) -> &ProtocolError {
        match self {
            Self::Message { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_unknown_message_display() {
        let err = ProtocolError::UnknownMessage("Non.Existant".into());
        assert_eq!(err.to_string(), "unknown message 'Non.Existant'");
    }

    #[test]
    fn test_message_context_keeps_root_cause() {
        let scalar = ScalarError::UnknownAttribute('z');
        let err = ProtocolError::field("attrib")(scalar).in_message("Char.Items.List");

        assert_eq!(
            err.to_string(),
            "failed decoding 'Char.Items.List': invalid 'attrib': unknown attribute 'z'"
        );
        assert!(matches!(
            err.root(),
            ProtocolError::InvalidField { field: "attrib", .. }
        ));

        // The chain is also reachable through `Error::source`.
        let field = err.source().expect("message error has a source");
        let scalar = field.source().expect("field error has a source");
        assert_eq!(scalar.to_string(), "unknown attribute 'z'");
    }

    #[test]
    fn test_number_error_exposes_parse_failure() {
        let source = "xy".parse::<u32>().unwrap_err();
        let err = ScalarError::Number {
            value: "xy".into(),
            source,
        };
        assert!(err.source().is_some());
    }
}
