//! `IRE.Rift.*`: the character's rift of stored commodities.

use nogfx_protocol::{ProtocolError, body, decode_json, encode_json, transcode};
use serde::{Deserialize, Serialize};

/// One commodity in the rift.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RiftItem {
    pub name: String,
    pub amount: u32,
    pub description: String,
}

/// Wire form of [`RiftItem`]; the amount is a string.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawItem {
    name: String,
    amount: String,
    desc: String,
}

impl RawItem {
    fn from_item(item: &RiftItem) -> Self {
        Self {
            name: item.name.clone(),
            amount: item.amount.to_string(),
            desc: item.description.clone(),
        }
    }

    fn into_item(self) -> Result<RiftItem, ProtocolError> {
        let amount = if self.amount.is_empty() {
            0
        } else {
            transcode::parse_int(&self.amount).map_err(ProtocolError::field("amount"))?
        };
        Ok(RiftItem {
            name: self.name,
            amount,
            description: self.desc,
        })
    }
}

/// `IRE.Rift.Change`: one commodity changed amount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IreRiftChange(pub RiftItem);

impl nogfx_protocol::Message for IreRiftChange {
    const ID: &'static str = "IRE.Rift.Change";

    fn encode(&self) -> String {
        encode_json(Self::ID, &RawItem::from_item(&self.0))
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawItem = decode_json(body(data, Self::ID))?;
        raw.into_item().map(Self)
    }
}

/// `IRE.Rift.List`: the full rift contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IreRiftList(pub Vec<RiftItem>);

impl nogfx_protocol::Message for IreRiftList {
    const ID: &'static str = "IRE.Rift.List";

    fn encode(&self) -> String {
        let raw: Vec<RawItem> = self.0.iter().map(RawItem::from_item).collect();
        encode_json(Self::ID, &raw)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: Vec<RawItem> = decode_json(body(data, Self::ID))?;
        raw.into_iter()
            .map(RawItem::into_item)
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

/// `IRE.Rift.Request`: asks for an `IRE.Rift.List`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IreRiftRequest;

nogfx_protocol::bare_message!(IreRiftRequest => "IRE.Rift.Request");
