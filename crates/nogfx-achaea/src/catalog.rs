//! The Achaea registry.

use std::sync::Arc;

use nogfx_protocol::{Entry, ProtocolError, Registry};

use crate::{status, vitals};

/// Name of this dialect's registry in a fallback chain.
pub const NAME: &str = "achaea";

/// Messages Achaea overrides on top of the Iron Realms dialect.
pub fn messages() -> Vec<Entry> {
    vec![
        Entry::of::<status::CharStatus>(),
        Entry::of::<vitals::CharVitals>(),
    ]
}

/// Achaea, then Iron Realms, then the base catalog.
pub fn registry() -> Registry {
    Registry::with_fallback(NAME, Arc::new(nogfx_ironrealms::registry())).extend(messages())
}

/// Like [`registry`], refusing duplicate names in any registry of the chain.
pub fn strict_registry() -> Result<Registry, ProtocolError> {
    let ironrealms = nogfx_ironrealms::strict_registry()?;
    Registry::with_fallback(NAME, Arc::new(ironrealms)).try_extend(messages())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain() {
        assert_eq!(
            registry().chain(),
            vec![NAME, nogfx_ironrealms::NAME, nogfx_protocol::NAME]
        );
    }

    #[test]
    fn test_strict_registry_builds() {
        assert_eq!(strict_registry().unwrap().len(), 2);
    }

    #[test]
    fn test_lookup_resolves_each_layer() {
        let registry = registry();
        let owner = |id: &str| registry.lookup(id).map(|(name, _)| name);

        assert_eq!(owner("Char.Vitals"), Some(NAME));
        assert_eq!(owner("IRE.Rift.List"), Some(nogfx_ironrealms::NAME));
        assert_eq!(owner("Char.Items.List"), Some(nogfx_protocol::NAME));
        assert_eq!(owner("Char.Nope"), None);
    }
}
