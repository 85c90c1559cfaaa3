//! `Char.Items.*`: inventory and room contents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ProtocolError, ScalarError, body, decode_json, encode_json, transcode};

bitflags::bitflags! {
    /// Item properties, sent as a string of single-character codes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemAttributes: u16 {
        const CONTAINER = 1;
        const DEAD = 1 << 1;
        const EDIBLE = 1 << 2;
        const FLUID = 1 << 3;
        const GROUPABLE = 1 << 4;
        const WIELDED_LEFT = 1 << 5;
        const WIELDED_RIGHT = 1 << 6;
        const MONSTER = 1 << 7;
        const RIFTABLE = 1 << 8;
        const TAKEABLE = 1 << 9;
        const WORN = 1 << 10;
        const WEARABLE = 1 << 11;
        const DANGEROUS = 1 << 12;
    }
}

/// Attribute codes in the order they are encoded.
pub const ITEM_ATTRIBUTE_CODES: &[(char, ItemAttributes)] = &[
    ('c', ItemAttributes::CONTAINER),
    ('d', ItemAttributes::DEAD),
    ('e', ItemAttributes::EDIBLE),
    ('f', ItemAttributes::FLUID),
    ('g', ItemAttributes::GROUPABLE),
    ('l', ItemAttributes::WIELDED_LEFT),
    ('L', ItemAttributes::WIELDED_RIGHT),
    ('m', ItemAttributes::MONSTER),
    ('r', ItemAttributes::RIFTABLE),
    ('t', ItemAttributes::TAKEABLE),
    ('w', ItemAttributes::WORN),
    ('W', ItemAttributes::WEARABLE),
    ('x', ItemAttributes::DANGEROUS),
];

/// An item or creature in a location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub attributes: ItemAttributes,
    pub icon: String,
}

/// Wire form of [`Item`]. The id arrives as a number from some games and
/// as a numeric string from others.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawItem {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: String,
    #[serde(default)]
    attrib: String,
    #[serde(default)]
    icon: String,
}

impl RawItem {
    fn from_item(item: &Item) -> Self {
        Self {
            id: Value::from(item.id),
            name: item.name.clone(),
            attrib: transcode::encode_codes(item.attributes, ITEM_ATTRIBUTE_CODES),
            icon: item.icon.clone(),
        }
    }

    fn into_item(self) -> Result<Item, ProtocolError> {
        let id = match &self.id {
            Value::Null => 0,
            Value::Number(number) => number
                .as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| ScalarError::Malformed(number.to_string()))
                .map_err(ProtocolError::field("id"))?,
            Value::String(id) => transcode::parse_int(id).map_err(ProtocolError::field("id"))?,
            other => {
                return Err(ProtocolError::field("id")(ScalarError::Malformed(other.to_string())));
            }
        };
        let attributes = transcode::decode_codes(&self.attrib, ITEM_ATTRIBUTE_CODES)
            .map_err(ProtocolError::field("attrib"))?;

        Ok(Item {
            id,
            name: self.name,
            attributes,
            icon: self.icon,
        })
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// `Char.Items.Contents <id>`: asks for the contents of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharItemsContents {
    pub container: u32,
}

impl crate::Message for CharItemsContents {
    const ID: &'static str = "Char.Items.Contents";

    fn encode(&self) -> String {
        format!("{} {}", Self::ID, self.container)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            container: decode_json(body(data, Self::ID))?,
        })
    }
}

/// `Char.Items.Inv`: asks for the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharItemsInv;

/// `Char.Items.Room`: asks for the items in the current room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharItemsRoom;

crate::bare_message!(
    CharItemsInv => "Char.Items.Inv",
    CharItemsRoom => "Char.Items.Room",
);

// ---------------------------------------------------------------------------
// Char.Items.List
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawList {
    #[serde(default)]
    location: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

/// `Char.Items.List`: everything in `location` (`"inv"`, `"room"`, or a
/// container such as `"rep12345"`).
///
/// An empty list encodes as `"items":[]`, meaning "there is nothing here".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharItemsList {
    pub location: String,
    pub items: Vec<Item>,
}

impl crate::Message for CharItemsList {
    const ID: &'static str = "Char.Items.List";

    fn encode(&self) -> String {
        let raw = RawList {
            location: self.location.clone(),
            items: self.items.iter().map(RawItem::from_item).collect(),
        };
        encode_json(Self::ID, &raw)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawList = decode_json(body(data, Self::ID))?;
        let items = raw
            .items
            .into_iter()
            .map(RawItem::into_item)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            location: raw.location,
            items,
        })
    }
}

// ---------------------------------------------------------------------------
// Char.Items.Add / Remove / Update
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawChange {
    #[serde(default)]
    location: String,
    #[serde(default)]
    item: RawItem,
}

macro_rules! item_change {
    ($(#[$meta:meta])* $ty:ident, $id:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $ty {
            pub location: String,
            pub item: Item,
        }

        impl crate::Message for $ty {
            const ID: &'static str = $id;

            fn encode(&self) -> String {
                let raw = RawChange {
                    location: self.location.clone(),
                    item: RawItem::from_item(&self.item),
                };
                encode_json(Self::ID, &raw)
            }

            fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
                let raw: RawChange = decode_json(body(data, Self::ID))?;
                Ok(Self {
                    location: raw.location,
                    item: raw.item.into_item()?,
                })
            }
        }
    };
}

item_change!(
    /// `Char.Items.Add`: an item appeared in `location`.
    CharItemsAdd,
    "Char.Items.Add"
);
item_change!(
    /// `Char.Items.Remove`: an item left `location`.
    CharItemsRemove,
    "Char.Items.Remove"
);
item_change!(
    /// `Char.Items.Update`: an item in `location` changed attributes.
    CharItemsUpdate,
    "Char.Items.Update"
);
