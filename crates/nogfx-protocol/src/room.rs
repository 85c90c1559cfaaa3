//! `Room.*`: the current room and the players in it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, ScalarError, body, decode_json, encode_json, transcode};

bitflags::bitflags! {
    /// Properties of a room, sent as a list of tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RoomDetails: u8 {
        const BANK = 1;
        const INDOORS = 1 << 1;
        const OUTDOORS = 1 << 2;
        const SEWER = 1 << 3;
        const SHOP = 1 << 4;
        const SUBDIVISION = 1 << 5;
        const WILDERNESS = 1 << 6;
    }
}

/// Detail tokens in the order they are encoded.
pub const ROOM_DETAIL_TOKENS: &[(&str, RoomDetails)] = &[
    ("bank", RoomDetails::BANK),
    ("indoors", RoomDetails::INDOORS),
    ("outdoors", RoomDetails::OUTDOORS),
    ("sewer", RoomDetails::SEWER),
    ("shop", RoomDetails::SHOP),
    ("subdivision", RoomDetails::SUBDIVISION),
    ("wilderness", RoomDetails::WILDERNESS),
];

/// Map position of a room: `"area"`, `"area,x,y"`, or `"area,x,y,building"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coordinates {
    pub area: u32,
    pub grid: Option<(i32, i32)>,
    /// Only meaningful together with `grid`.
    pub building: Option<i32>,
}

impl Coordinates {
    pub fn parse(value: &str) -> Result<Self, ScalarError> {
        fn number(value: &str) -> Result<i32, ScalarError> {
            value.parse().map_err(|source| ScalarError::Number {
                value: value.to_string(),
                source,
            })
        }

        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let (area, grid, building) = match parts.as_slice() {
            [area] => (area, None, None),
            [area, x, y] => (area, Some((number(x)?, number(y)?)), None),
            [area, x, y, building] => (area, Some((number(x)?, number(y)?)), Some(number(building)?)),
            _ => return Err(ScalarError::Malformed(value.to_string())),
        };

        Ok(Self {
            area: transcode::parse_int(area)?,
            grid,
            building,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.area)?;
        if let Some((x, y)) = self.grid {
            write!(f, ",{x},{y}")?;
            if let Some(building) = self.building {
                write!(f, ",{building}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Room.Info
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawRoomInfo {
    num: u32,
    name: String,
    area: String,
    environment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    coords: String,
    map: String,
    exits: BTreeMap<String, u32>,
    details: Vec<String>,
}

/// `Room.Info`: sent whenever the character enters a room.
///
/// `exits` maps directions to room numbers. It is always encoded, as `{}`
/// when the room has no exits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomInfo {
    pub num: u32,
    pub name: String,
    pub area: String,
    pub environment: String,
    pub coords: Option<Coordinates>,
    pub map: String,
    pub exits: BTreeMap<String, u32>,
    pub details: RoomDetails,
}

impl RoomInfo {
    pub fn has(&self, details: RoomDetails) -> bool {
        self.details.contains(details)
    }
}

impl crate::Message for RoomInfo {
    const ID: &'static str = "Room.Info";

    fn encode(&self) -> String {
        let raw = RawRoomInfo {
            num: self.num,
            name: self.name.clone(),
            area: self.area.clone(),
            environment: self.environment.clone(),
            coords: self.coords.map(|coords| coords.to_string()).unwrap_or_default(),
            map: self.map.clone(),
            exits: self.exits.clone(),
            details: transcode::encode_tokens(self.details, ROOM_DETAIL_TOKENS),
        };
        encode_json(Self::ID, &raw)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawRoomInfo = decode_json(body(data, Self::ID))?;

        let coords = match raw.coords.as_str() {
            "" => None,
            coords => Some(Coordinates::parse(coords).map_err(ProtocolError::field("coords"))?),
        };
        let details = transcode::decode_tokens(&raw.details, ROOM_DETAIL_TOKENS)
            .map_err(ProtocolError::field("details"))?;

        Ok(Self {
            num: raw.num,
            name: raw.name,
            area: raw.area,
            environment: raw.environment,
            coords,
            map: raw.map,
            exits: raw.exits,
            details,
        })
    }
}

// ---------------------------------------------------------------------------
// Room.Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomPlayer {
    pub name: String,
    pub fullname: String,
}

/// `Room.Players`: everyone in the room on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomPlayers(pub Vec<RoomPlayer>);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomAddPlayer(pub RoomPlayer);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomRemovePlayer(pub RoomPlayer);

crate::json_message!(RoomPlayers, "Room.Players");
crate::json_message!(RoomAddPlayer, "Room.AddPlayer");
crate::json_message!(RoomRemovePlayer, "Room.RemovePlayer");

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::Message;

    fn body_json(encoded: &str) -> Value {
        let (_, body) = encoded.split_once(' ').unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_info_decode() {
        let info = RoomInfo::decode(
            br#"Room.Info {"num":12345,"name":"On a hill","area":"Barony of Dun Valley","environment":"Hills","coords":"45,5,4,3","map":"www.example.com/map.php?roomid=12345&area=45","exits":{"n":12344,"se":12336},"details":["shop","bank"]}"#,
        )
        .unwrap();

        assert_eq!(info.num, 12345);
        assert_eq!(
            info.coords,
            Some(Coordinates {
                area: 45,
                grid: Some((5, 4)),
                building: Some(3),
            })
        );
        assert_eq!(info.exits.get("se"), Some(&12336));
        assert!(info.has(RoomDetails::SHOP | RoomDetails::BANK));
        assert!(!info.has(RoomDetails::WILDERNESS));
    }

    #[test]
    fn test_info_encodes_details_in_canonical_order() {
        let info = RoomInfo {
            num: 1,
            details: RoomDetails::WILDERNESS | RoomDetails::BANK,
            ..Default::default()
        };
        let body = body_json(&info.encode());
        assert_eq!(body["details"], json!(["bank", "wilderness"]));
        assert_eq!(body["exits"], json!({}));
        assert!(body.get("coords").is_none());
    }

    #[test]
    fn test_info_round_trip() {
        let info = RoomInfo {
            num: 6838,
            name: "Outside the Tavern".into(),
            area: "Shallam".into(),
            environment: "Urban".into(),
            coords: Some(Coordinates {
                area: 12,
                grid: Some((-3, 7)),
                building: None,
            }),
            map: String::new(),
            exits: BTreeMap::from([("w".to_string(), 6837)]),
            details: RoomDetails::OUTDOORS,
        };
        assert_eq!(RoomInfo::decode(info.encode().as_bytes()).unwrap(), info);
    }

    #[test]
    fn test_info_unknown_detail() {
        let err = RoomInfo::decode(br#"Room.Info {"num":1,"details":["haunted"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid 'details': unknown detail 'haunted'");
    }

    #[test]
    fn test_coords_shapes() {
        assert_eq!(Coordinates::parse("45").unwrap().to_string(), "45");
        assert_eq!(Coordinates::parse("45,1,2").unwrap().to_string(), "45,1,2");
        assert!(matches!(
            Coordinates::parse("45,1"),
            Err(ScalarError::Malformed(_))
        ));
        assert!(Coordinates::parse("45,x,2").is_err());
    }

    #[test]
    fn test_players() {
        let msg = RoomPlayers::decode(
            br#"Room.Players [{"name":"Durak","fullname":"Mason Durak"}]"#,
        )
        .unwrap();
        assert_eq!(msg.0[0].fullname, "Mason Durak");

        let msg = RoomRemovePlayer::decode(br#"Room.RemovePlayer {"name":"Durak"}"#).unwrap();
        assert_eq!(msg.0.name, "Durak");
    }
}
