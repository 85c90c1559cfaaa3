//! `Core.*` messages: session handshake, keepalives, and module support.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, body, decode_json, encode_json, transcode};

/// `Core.Hello {"client": .., "version": ..}`, sent by the client first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoreHello {
    pub client: String,
    pub version: String,
}

crate::json_message!(CoreHello, "Core.Hello");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoreGoodbye;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoreKeepAlive;

crate::bare_message!(
    CoreGoodbye => "Core.Goodbye",
    CoreKeepAlive => "Core.KeepAlive",
);

/// `Core.Ping [latency]`.
///
/// The client sends its average latency in milliseconds; the server
/// answers with a bare `Core.Ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorePing {
    pub latency: Option<u32>,
}

impl crate::Message for CorePing {
    const ID: &'static str = "Core.Ping";

    fn encode(&self) -> String {
        match self.latency {
            Some(latency) => format!("{} {latency}", Self::ID),
            None => Self::ID.to_string(),
        }
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            latency: decode_json(body(data, Self::ID))?,
        })
    }
}

// ---------------------------------------------------------------------------
// Core.Supports
// ---------------------------------------------------------------------------

/// Modules named in a `Core.Supports.*` list.
///
/// The modules every GMCP game understands have their own fields; any
/// other name is kept in `other` so nothing is lost in a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupports {
    pub char: Option<u32>,
    pub char_items: Option<u32>,
    pub char_skills: Option<u32>,
    pub comm_channel: Option<u32>,
    pub room: Option<u32>,
    pub other: BTreeMap<String, u32>,
}

impl CoreSupports {
    /// Splits decoded capabilities into known fields and `other`.
    pub fn from_modules(mut modules: BTreeMap<String, u32>) -> Self {
        Self {
            char: modules.remove("Char"),
            char_items: modules.remove("Char.Items"),
            char_skills: modules.remove("Char.Skills"),
            comm_channel: modules.remove("Comm.Channel"),
            room: modules.remove("Room"),
            other: modules,
        }
    }

    /// Every module, known and unknown, with its version.
    pub fn modules(&self) -> BTreeMap<String, u32> {
        let mut modules = self.other.clone();
        let known = [
            ("Char", self.char),
            ("Char.Items", self.char_items),
            ("Char.Skills", self.char_skills),
            ("Comm.Channel", self.comm_channel),
            ("Room", self.room),
        ];
        for (name, version) in known {
            if let Some(version) = version {
                modules.insert(name.to_string(), version);
            }
        }
        modules
    }

    /// Decodes a `["Name N", ..]` body.
    pub fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let list: Vec<String> = decode_json(body)?;
        let modules =
            transcode::decode_capabilities(&list).map_err(ProtocolError::field("modules"))?;
        Ok(Self::from_modules(modules))
    }

    pub fn encode_with(id: &str, modules: &BTreeMap<String, u32>) -> String {
        encode_json(id, &transcode::encode_capabilities(modules))
    }
}

/// Implements a `Core.Supports.*` message as a newtype over a
/// capability set with `decode_body`, `modules`, and `from_modules`.
#[macro_export]
macro_rules! supports_message {
    ($ty:ident($inner:ty), $id:literal) => {
        impl $crate::Message for $ty {
            const ID: &'static str = $id;

            fn encode(&self) -> String {
                $crate::CoreSupports::encode_with(Self::ID, &self.0.modules())
            }

            fn decode(data: &[u8]) -> Result<Self, $crate::ProtocolError> {
                <$inner>::decode_body($crate::body(data, Self::ID)).map($ty)
            }
        }
    };
}

/// `Core.Supports.Set`: replaces the list of modules the client handles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupportsSet(pub CoreSupports);

/// `Core.Supports.Add`: adds modules to the current list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupportsAdd(pub CoreSupports);

/// `Core.Supports.Remove`: versions are meaningless here and default to 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupportsRemove(pub CoreSupports);

crate::supports_message!(CoreSupportsSet(CoreSupports), "Core.Supports.Set");
crate::supports_message!(CoreSupportsAdd(CoreSupports), "Core.Supports.Add");
crate::supports_message!(CoreSupportsRemove(CoreSupports), "Core.Supports.Remove");
