//! Building game-specific messages on top of base messages.
//!
//! A dialect message keeps the base wire name and holds the base value in
//! a `base` field next to its own extension fields. Nothing is inherited
//! implicitly; both directions spell out the composition:
//!
//! ```text
//! decode:  body ──► Base::decode_body ──┐
//!               └─► extension fields  ──┴─► assemble (either failing fails all)
//!
//! encode:  Base::encode_fields ──► Fields ◄── extension fields (may override keys)
//! ```
//!
//! Object-bodied messages implement [`Schema`], which splits the contract
//! into "decode from a stripped body" and "write my keys into a shared
//! [`Fields`] map". The [`schema_message!`](crate::schema_message) macro
//! turns a `Schema` into a [`Message`](crate::Message).

use serde::Serialize;
use serde_json::Value;

use crate::ProtocolError;

/// The JSON object a composed message is encoded into.
pub type Fields = serde_json::Map<String, Value>;

/// An object-bodied message that can take part in dialect composition.
pub trait Schema: Sized {
    /// Decodes a body with the message name already stripped.
    ///
    /// An empty body must decode to the all-absent value.
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError>;

    /// Writes every present field into `fields`, leaving absent ones out.
    fn encode_fields(&self, fields: &mut Fields);
}

/// Decodes `body` into the base schema `B` and then into the extension.
///
/// Both steps see the complete body. The first failure is returned as is,
/// so the caller never sees a half-built value.
pub fn compose<B, E>(
    body: &[u8],
    extension: impl FnOnce(&[u8]) -> Result<E, ProtocolError>,
) -> Result<(B, E), ProtocolError>
where
    B: Schema,
{
    let base = B::decode_body(body)?;
    let extension = extension(body)?;
    Ok((base, extension))
}

/// Serializes `raw` and merges its keys into `fields`.
///
/// `raw` is expected to be a struct of `Option`s with
/// `skip_serializing_if`, so only present fields are written. A key that
/// is already set is replaced, which is how a dialect overrides one of the
/// base's encodings.
pub fn merge_fields<R: Serialize>(fields: &mut Fields, raw: &R) {
    let map = match serde_json::to_value(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::error!(value = %other, "dialect fields did not serialize to an object");
            return;
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize dialect fields");
            return;
        }
    };

    for (key, value) in map {
        if let Some(previous) = fields.insert(key, value) {
            tracing::trace!(%previous, "dialect overrides base field");
        }
    }
}

/// Encodes a [`Schema`] as `"<id> {...}"`.
pub fn encode_schema<S: Schema>(id: &str, schema: &S) -> String {
    let mut fields = Fields::new();
    schema.encode_fields(&mut fields);
    format!("{id} {}", Value::Object(fields))
}

/// Implements [`Message`](crate::Message) for a [`Schema`] type.
#[macro_export]
macro_rules! schema_message {
    ($ty:ty, $id:literal) => {
        impl $crate::Message for $ty {
            const ID: &'static str = $id;

            fn encode(&self) -> String {
                $crate::dialect::encode_schema(Self::ID, self)
            }

            fn decode(data: &[u8]) -> Result<Self, $crate::ProtocolError> {
                <Self as $crate::dialect::Schema>::decode_body($crate::body(data, Self::ID))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::{decode_json, transcode, Message};

    // A two-level composition built only for these tests: a base with a
    // plain and a transformed field, and an extension adding its own
    // transformed field and overriding the base's `label`.

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct RawBase {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Base {
        label: Option<String>,
        count: Option<u32>,
    }

    impl Schema for Base {
        fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
            let raw: RawBase = decode_json(body)?;
            Ok(Self {
                label: raw.label,
                count: raw
                    .count
                    .as_deref()
                    .map(transcode::parse_int)
                    .transpose()
                    .map_err(ProtocolError::field("count"))?,
            })
        }

        fn encode_fields(&self, fields: &mut Fields) {
            merge_fields(
                fields,
                &RawBase {
                    label: self.label.clone(),
                    count: self.count.map(|n| n.to_string()),
                },
            );
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct RawExtended {
        #[serde(skip_serializing_if = "Option::is_none")]
        flag: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Extended {
        base: Base,
        flag: Option<bool>,
    }

    impl Schema for Extended {
        fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
            let (mut base, raw) = compose::<Base, _>(body, decode_json::<RawExtended>)?;
            base.label = raw.label.map(|label| label.to_uppercase());
            Ok(Self {
                base,
                flag: raw.flag.as_deref().map(transcode::parse_flag),
            })
        }

        fn encode_fields(&self, fields: &mut Fields) {
            self.base.encode_fields(fields);
            merge_fields(
                fields,
                &RawExtended {
                    flag: self.flag.map(|f| transcode::format_flag(f).to_string()),
                    label: self.base.label.as_ref().map(|label| label.to_lowercase()),
                },
            );
        }
    }

    schema_message!(Extended, "Test.Extended");

    fn body_json(encoded: &str) -> Value {
        let (_, body) = encoded.split_once(' ').unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_decode_populates_base_and_extension() {
        let msg = Extended::decode(br#"Test.Extended {"label":"abc","count":"3","flag":"1"}"#).unwrap();
        assert_eq!(msg.base.count, Some(3));
        assert_eq!(msg.base.label.as_deref(), Some("ABC"));
        assert_eq!(msg.flag, Some(true));
    }

    #[test]
    fn test_base_failure_fails_whole_decode() {
        let err = Extended::decode(br#"Test.Extended {"count":"x","flag":"1"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidField { field: "count", .. }));
    }

    #[test]
    fn test_encode_merges_and_overrides() {
        let msg = Extended {
            base: Base {
                label: Some("ABC".into()),
                count: Some(3),
            },
            flag: Some(false),
        };
        assert_eq!(
            body_json(&msg.encode()),
            json!({"label": "abc", "count": "3", "flag": "0"})
        );
        assert_eq!(Extended::decode(msg.encode().as_bytes()).unwrap(), msg);
    }

    #[test]
    fn test_all_absent_round_trip() {
        let msg = Extended::default();
        assert_eq!(msg.encode(), "Test.Extended {}");
        assert_eq!(Extended::decode(b"Test.Extended").unwrap(), msg);
    }
}
