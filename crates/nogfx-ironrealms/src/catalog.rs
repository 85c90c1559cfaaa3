//! The Iron Realms registry.

use std::sync::Arc;

use nogfx_protocol::{Entry, ProtocolError, Registry};

use crate::{character, rift, supports, target};

/// Name of this dialect's registry in a fallback chain.
pub const NAME: &str = "ironrealms";

/// Messages this dialect adds or overrides.
pub fn messages() -> Vec<Entry> {
    vec![
        Entry::of::<character::CharStatus>(),
        Entry::of::<character::CharVitals>(),
        Entry::of::<supports::CoreSupportsSet>(),
        Entry::of::<supports::CoreSupportsAdd>(),
        Entry::of::<supports::CoreSupportsRemove>(),
        Entry::of::<rift::IreRiftChange>(),
        Entry::of::<rift::IreRiftList>(),
        Entry::of::<rift::IreRiftRequest>(),
        Entry::of::<target::IreTargetSet>(),
        Entry::of::<target::IreTargetInfo>(),
    ]
}

/// Builds the dialect registry on top of a fresh base registry.
pub fn registry() -> Registry {
    Registry::with_fallback(NAME, Arc::new(nogfx_protocol::registry())).extend(messages())
}

/// Like [`registry`], refusing duplicate names in either registry.
pub fn strict_registry() -> Result<Registry, ProtocolError> {
    let base = nogfx_protocol::strict_registry()?;
    Registry::with_fallback(NAME, Arc::new(base)).try_extend(messages())
}
