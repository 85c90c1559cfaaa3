//! The message contract every GMCP message type implements.
//!
//! A GMCP payload is UTF-8 text of the form `"<Dotted.Name>[ <body>]"`.
//! [`Message`] ties a Rust type to one name and gives it both directions:
//!
//! - `encode` never fails. Absent optional fields are left out of the
//!   body, so the output only describes what the value actually holds.
//! - `decode` accepts the payload with or without the name in front, and
//!   an empty body decodes to the all-absent value.
//!
//! [`AnyMessage`] is the object-safe view used by the registry, so one
//! dispatch call can return any message type.

use std::any::Any;
use std::fmt;

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A typed GMCP message bound to one wire name.
///
/// Messages are plain values: decoding builds a new instance and nothing
/// is shared between calls, so any message can be decoded on any thread.
pub trait Message: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// The dotted wire name, e.g. `"Char.Vitals"`.
    const ID: &'static str;

    /// Produces the full payload, `"<ID> <body>"` or a bare `"<ID>"`.
    fn encode(&self) -> String;

    /// Builds a message from a payload.
    ///
    /// # Errors
    /// [`ProtocolError::Body`] when the body isn't the expected JSON, and
    /// [`ProtocolError::InvalidField`] when a field fails its transcoder.
    fn decode(data: &[u8]) -> Result<Self, ProtocolError>;
}

/// Object-safe view of a decoded [`Message`].
///
/// Implemented for every `Message`; use [`downcast_ref`] or [`downcast`]
/// to get the concrete type back.
///
/// [`downcast_ref`]: trait.AnyMessage.html#method.downcast_ref
/// [`downcast`]: trait.AnyMessage.html#method.downcast
pub trait AnyMessage: fmt::Debug + Send + Sync {
    /// The wire name of the underlying message.
    fn id(&self) -> &'static str;

    /// Same as [`Message::encode`].
    fn encoded(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<M: Message> AnyMessage for M {
    fn id(&self) -> &'static str {
        M::ID
    }

    fn encoded(&self) -> String {
        self.encode()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn AnyMessage {
    /// Returns `true` if the message is an `M`.
    pub fn is<M: Message>(&self) -> bool {
        self.as_any().is::<M>()
    }

    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }

    /// Takes the concrete message out of the box.
    pub fn downcast<M: Message>(self: Box<Self>) -> Option<M> {
        self.into_any().downcast::<M>().ok().map(|message| *message)
    }
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

/// Returns the body of `data`: the name `id` (if present) and the
/// whitespace after it are stripped.
///
/// The name only counts when it is followed by whitespace or the end of
/// input, so `"Char.StatusVars"` is not mistaken for `"Char.Status"`.
pub fn body<'a>(data: &'a [u8], id: &str) -> &'a [u8] {
    match data.strip_prefix(id.as_bytes()) {
        Some(rest) if rest.first().is_none_or(u8::is_ascii_whitespace) => rest.trim_ascii(),
        _ => data.trim_ascii(),
    }
}

/// Parses a JSON body; an empty body yields `T::default()`.
pub fn decode_json<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ProtocolError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(ProtocolError::Body)
}

/// Formats `"<id> <json>"`.
///
/// Serializing the plain data types in this crate can't fail; if a future
/// type ever does, the failure is logged and the bare name is sent.
pub fn encode_json<T: Serialize + ?Sized>(id: &str, value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => format!("{id} {json}"),
        Err(err) => {
            tracing::error!(id, error = %err, "failed to serialize GMCP body");
            id.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Implementation macros
// ---------------------------------------------------------------------------

/// Implements [`Message`] for a type whose body is its serde form.
///
/// ```
/// use nogfx_protocol::{json_message, Message};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
/// struct Hello {
///     client: String,
/// }
/// json_message!(Hello, "Core.Hello");
///
/// let hello = Hello::decode(br#"Core.Hello {"client":"nogfx"}"#).unwrap();
/// assert_eq!(hello.encode(), r#"Core.Hello {"client":"nogfx"}"#);
/// ```
#[macro_export]
macro_rules! json_message {
    ($ty:ty, $id:literal) => {
        impl $crate::Message for $ty {
            const ID: &'static str = $id;

            fn encode(&self) -> String {
                $crate::encode_json(Self::ID, self)
            }

            fn decode(data: &[u8]) -> Result<Self, $crate::ProtocolError> {
                $crate::decode_json($crate::body(data, Self::ID))
            }
        }
    };
}

/// Implements [`Message`] for a unit struct that never carries a body.
///
/// Any body that does arrive is ignored.
#[macro_export]
macro_rules! bare_message {
    ($($ty:ident => $id:literal),+ $(,)?) => {
        $(
            impl $crate::Message for $ty {
                const ID: &'static str = $id;

                fn encode(&self) -> String {
                    Self::ID.to_string()
                }

                fn decode(_data: &[u8]) -> Result<Self, $crate::ProtocolError> {
                    Ok($ty)
                }
            }
        )+
    };
}
