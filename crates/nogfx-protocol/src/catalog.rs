//! The base message catalog shared by every GMCP game.

use crate::registry::{Entry, Registry};
use crate::{ProtocolError, affects, character, comm, handshake, items, room, skills};

/// Name of the base registry in a fallback chain.
pub const NAME: &str = "gmcp";

/// Every base message type.
pub fn messages() -> Vec<Entry> {
    vec![
        Entry::of::<handshake::CoreHello>(),
        Entry::of::<handshake::CoreGoodbye>(),
        Entry::of::<handshake::CoreKeepAlive>(),
        Entry::of::<handshake::CorePing>(),
        Entry::of::<handshake::CoreSupportsSet>(),
        Entry::of::<handshake::CoreSupportsAdd>(),
        Entry::of::<handshake::CoreSupportsRemove>(),
        Entry::of::<character::CharLogin>(),
        Entry::of::<character::CharName>(),
        Entry::of::<character::CharStatusVars>(),
        Entry::of::<character::CharStatus>(),
        Entry::of::<character::CharVitals>(),
        Entry::of::<affects::CharAfflictionsList>(),
        Entry::of::<affects::CharAfflictionsAdd>(),
        Entry::of::<affects::CharAfflictionsRemove>(),
        Entry::of::<affects::CharDefencesList>(),
        Entry::of::<affects::CharDefencesAdd>(),
        Entry::of::<affects::CharDefencesRemove>(),
        Entry::of::<items::CharItemsContents>(),
        Entry::of::<items::CharItemsInv>(),
        Entry::of::<items::CharItemsRoom>(),
        Entry::of::<items::CharItemsList>(),
        Entry::of::<items::CharItemsAdd>(),
        Entry::of::<items::CharItemsRemove>(),
        Entry::of::<items::CharItemsUpdate>(),
        Entry::of::<skills::CharSkillsGet>(),
        Entry::of::<skills::CharSkillsGroups>(),
        Entry::of::<skills::CharSkillsList>(),
        Entry::of::<skills::CharSkillsInfo>(),
        Entry::of::<comm::CommChannelEnable>(),
        Entry::of::<comm::CommChannelList>(),
        Entry::of::<comm::CommChannelPlayers>(),
        Entry::of::<comm::CommChannelText>(),
        Entry::of::<room::RoomInfo>(),
        Entry::of::<room::RoomPlayers>(),
        Entry::of::<room::RoomAddPlayer>(),
        Entry::of::<room::RoomRemovePlayer>(),
    ]
}

/// Builds the base registry. It has no fallback.
pub fn registry() -> Registry {
    Registry::new(NAME).extend(messages())
}

/// Like [`registry`], but a name registered twice is an error.
pub fn strict_registry() -> Result<Registry, ProtocolError> {
    Registry::new(NAME).try_extend(messages())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let registry = strict_registry().unwrap();
        assert_eq!(registry.len(), messages().len());
    }

    #[test]
    fn test_registry_has_no_fallback() {
        assert_eq!(registry().chain(), vec![NAME]);
    }
}
