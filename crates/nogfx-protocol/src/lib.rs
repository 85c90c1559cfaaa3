//! GMCP messages for nogfx.
//!
//! This crate turns GMCP payloads into typed messages and back:
//!
//! - **Contract** ([`Message`], [`AnyMessage`]): one Rust type per wire
//!   name, with a total `encode` and a fallible `decode`.
//! - **Transcoders** ([`transcode`]): the scalar quirks of the wire format,
//!   such as `"Adept (40%)"` ranks, `"(None)"` sentinels, and `"1"`/`"0"`
//!   flags.
//! - **Dialects** ([`dialect`]): how a game-specific message is composed
//!   from a base message plus extension fields.
//! - **Catalog**: the base messages every game understands (`Core.*`,
//!   `Char.*`, `Comm.Channel.*`, `Room.*`).
//! - **Dispatch** ([`Registry`]): name lookup across a dialect fallback
//!   chain.
//!
//! # Architecture
//!
//! ```text
//! bytes ─► nogfx-telnet (unwrap) ─► Registry::parse ─► Message::decode ─► Box<dyn AnyMessage>
//! ```
//!
//! Game dialects live in their own crates and register into a registry
//! whose fallback is the one built by [`registry`].

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod affects;
mod catalog;
mod character;
mod codec;
mod comm;
pub mod dialect;
mod error;
mod handshake;
mod items;
mod registry;
mod room;
mod skills;
pub mod transcode;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use catalog::{NAME, messages, registry, strict_registry};
pub use codec::{AnyMessage, Message, body, decode_json, encode_json};
pub use dialect::{Fields, Schema};
pub use error::{ProtocolError, ScalarError};
pub use registry::{DecodeFn, Entry, Registry, parse};
pub use transcode::{Clearable, Ranked};

pub use affects::{
    Affect, CharAfflictionsAdd, CharAfflictionsList, CharAfflictionsRemove, CharDefencesAdd,
    CharDefencesList, CharDefencesRemove,
};
pub use character::{CharLogin, CharName, CharStatus, CharStatusVars, CharVitals};
pub use comm::{
    Channel, ChannelPlayer, CommChannelEnable, CommChannelList, CommChannelPlayers,
    CommChannelText,
};
pub use handshake::{
    CoreGoodbye, CoreHello, CoreKeepAlive, CorePing, CoreSupports, CoreSupportsAdd,
    CoreSupportsRemove, CoreSupportsSet,
};
pub use items::{
    CharItemsAdd, CharItemsContents, CharItemsInv, CharItemsList, CharItemsRemove,
    CharItemsRoom, CharItemsUpdate, ITEM_ATTRIBUTE_CODES, Item, ItemAttributes,
};
pub use room::{
    Coordinates, ROOM_DETAIL_TOKENS, RoomAddPlayer, RoomDetails, RoomInfo, RoomPlayer,
    RoomPlayers, RoomRemovePlayer,
};
pub use skills::{CharSkillsGet, CharSkillsGroups, CharSkillsInfo, CharSkillsList, SkillGroup};
