//! Name-to-decoder lookup with a fallback chain.
//!
//! A [`Registry`] maps GMCP message names to decode functions. Dialect
//! registries hold their base registry as a fallback, so a lookup walks
//! the chain from the most specific game to the generic base:
//!
//! ```text
//! achaea ──► ironrealms ──► gmcp
//! ```
//!
//! The first registry that knows a name wins, which is how a dialect
//! shadows a base message with its own type under the same name.
//!
//! Registries are built once at startup and never change afterwards.
//! Share them behind an `Arc`; lookups take `&self` and need no locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{AnyMessage, Message, ProtocolError};

/// Decodes a payload into a boxed message.
pub type DecodeFn = fn(&[u8]) -> Result<Box<dyn AnyMessage>, ProtocolError>;

fn decode_boxed<M: Message>(data: &[u8]) -> Result<Box<dyn AnyMessage>, ProtocolError> {
    let message = M::decode(data)?;
    Ok(Box::new(message))
}

/// One registry row: a message name and its decoder.
#[derive(Clone, Copy)]
pub struct Entry {
    pub id: &'static str,
    pub decode: DecodeFn,
}

impl Entry {
    /// The entry for message type `M`.
    pub fn of<M: Message>() -> Self {
        Self {
            id: M::ID,
            decode: decode_boxed::<M>,
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry").field(&self.id).finish()
    }
}

/// A read-only table of message decoders with an optional fallback.
#[derive(Clone)]
pub struct Registry {
    name: &'static str,
    entries: HashMap<&'static str, DecodeFn>,
    fallback: Option<Arc<Registry>>,
}

impl Registry {
    /// An empty registry without fallback.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            fallback: None,
        }
    }

    /// An empty registry that defers unknown names to `fallback`.
    pub fn with_fallback(name: &'static str, fallback: Arc<Registry>) -> Self {
        Self {
            fallback: Some(fallback),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fallback(&self) -> Option<&Registry> {
        self.fallback.as_deref()
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Adds `entry`, silently replacing an earlier entry with the same name.
    pub fn insert(&mut self, entry: Entry) -> &mut Self {
        if self.entries.insert(entry.id, entry.decode).is_some() {
            tracing::debug!(
                registry = self.name,
                id = entry.id,
                "registration replaced an earlier one"
            );
        }
        self
    }

    /// Adds `entry`, refusing a name this registry already has.
    ///
    /// Only this registry is checked; shadowing a name from the fallback
    /// chain is always allowed.
    ///
    /// # Errors
    /// [`ProtocolError::DuplicateMessage`] on a name collision.
    pub fn try_insert(&mut self, entry: Entry) -> Result<&mut Self, ProtocolError> {
        if self.entries.contains_key(entry.id) {
            return Err(ProtocolError::DuplicateMessage(entry.id));
        }
        self.entries.insert(entry.id, entry.decode);
        Ok(self)
    }

    /// Registers message type `M`. See [`Registry::insert`].
    pub fn register<M: Message>(&mut self) -> &mut Self {
        self.insert(Entry::of::<M>())
    }

    /// Registers message type `M`. See [`Registry::try_insert`].
    pub fn try_register<M: Message>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.try_insert(Entry::of::<M>())
    }

    /// Inserts every entry, later ones replacing earlier ones.
    pub fn extend(mut self, entries: impl IntoIterator<Item = Entry>) -> Self {
        for entry in entries {
            self.insert(entry);
        }
        self
    }

    /// Inserts every entry, failing on the first duplicate name.
    pub fn try_extend(
        mut self,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<Self, ProtocolError> {
        for entry in entries {
            self.try_insert(entry)?;
        }
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Finds the decoder for `id`, walking the fallback chain.
    ///
    /// Returns the name of the registry that answered along with the
    /// decoder.
    pub fn lookup(&self, id: &str) -> Option<(&'static str, Entry)> {
        match self.entries.get_key_value(id) {
            Some((&id, &decode)) => Some((self.name, Entry { id, decode })),
            None => self.fallback.as_ref()?.lookup(id),
        }
    }

    /// `true` if this registry itself (not its fallback) knows `id`.
    pub fn contains_local(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Names of this registry and every fallback, most specific first.
    pub fn chain(&self) -> Vec<&'static str> {
        let mut chain = vec![self.name];
        let mut current = self.fallback();
        while let Some(registry) = current {
            chain.push(registry.name);
            current = registry.fallback();
        }
        chain
    }

    /// Message names registered locally, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of locally registered messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Decodes a GMCP payload, framed or bare, into whatever message type
    /// its name resolves to.
    ///
    /// # Errors
    /// - [`ProtocolError::UnknownMessage`] when no registry in the chain
    ///   knows the name.
    /// - [`ProtocolError::Message`] wrapping the decoder's error otherwise.
    pub fn parse(&self, data: &[u8]) -> Result<Box<dyn AnyMessage>, ProtocolError> {
        let payload = nogfx_telnet::unwrap(data).unwrap_or(data).trim_ascii();

        let name_len = payload
            .iter()
            .position(|&b| b == b' ')
            .unwrap_or(payload.len());
        let name = String::from_utf8_lossy(&payload[..name_len]);

        let Some((registry, entry)) = self.lookup(&name) else {
            return Err(ProtocolError::UnknownMessage(name.into_owned()));
        };

        tracing::trace!(id = entry.id, registry, "decoding GMCP message");
        (entry.decode)(payload).map_err(|err| err.in_message(entry.id))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("messages", &self.entries.len())
            .field("fallback", &self.fallback.as_ref().map(|r| r.name))
            .finish()
    }
}

/// Decodes `data` with `registry`. Same as [`Registry::parse`].
pub fn parse(data: &[u8], registry: &Registry) -> Result<Box<dyn AnyMessage>, ProtocolError> {
    registry.parse(data)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Alpha {
        value: u32,
    }
    crate::json_message!(Alpha, "Test.Alpha");

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct AlphaOverride {
        value: u32,
        extra: bool,
    }
    crate::json_message!(AlphaOverride, "Test.Alpha");

    #[derive(Debug, Clone, PartialEq)]
    struct Beta;
    crate::bare_message!(Beta => "Test.Beta");

    fn base() -> Arc<Registry> {
        let mut registry = Registry::new("base");
        registry.register::<Alpha>().register::<Beta>();
        Arc::new(registry)
    }

    #[test]
    fn test_parse_bare_name() {
        let message = base().parse(b"Test.Beta").unwrap();
        assert!(message.is::<Beta>());
    }

    #[test]
    fn test_parse_framed_payload() {
        let framed = nogfx_telnet::wrap(br#"Test.Alpha {"value":3}"#);
        let message = base().parse(&framed).unwrap();
        assert_eq!(message.downcast_ref::<Alpha>(), Some(&Alpha { value: 3 }));
    }

    #[test]
    fn test_unknown_message() {
        let err = base().parse(b"Nonexistent.Message").unwrap_err();
        assert_eq!(err.to_string(), "unknown message 'Nonexistent.Message'");
    }

    #[test]
    fn test_decode_error_names_message() {
        let err = base().parse(b"Test.Alpha {").unwrap_err();
        assert!(matches!(err, ProtocolError::Message { id: "Test.Alpha", .. }));
        assert!(matches!(err.root(), ProtocolError::Body(_)));
    }

    #[test]
    fn test_dialect_shadows_and_falls_through() {
        let mut dialect = Registry::with_fallback("dialect", base());
        dialect.register::<AlphaOverride>();

        let alpha = dialect.parse(br#"Test.Alpha {"value":1,"extra":true}"#).unwrap();
        assert!(alpha.is::<AlphaOverride>());

        let beta = dialect.parse(b"Test.Beta").unwrap();
        assert!(beta.is::<Beta>());

        assert_eq!(dialect.lookup("Test.Alpha").map(|(r, _)| r), Some("dialect"));
        assert_eq!(dialect.lookup("Test.Beta").map(|(r, _)| r), Some("base"));
        assert_eq!(dialect.chain(), vec!["dialect", "base"]);
    }

    #[test]
    fn test_later_registration_replaces_earlier() {
        let mut registry = Registry::new("base");
        registry.register::<Alpha>().register::<AlphaOverride>();

        assert_eq!(registry.len(), 1);
        let message = registry.parse(br#"Test.Alpha {"value":1,"extra":false}"#).unwrap();
        assert!(message.is::<AlphaOverride>());
    }

    #[test]
    fn test_strict_registration_refuses_duplicates() {
        let mut registry = Registry::new("base");
        registry.try_register::<Alpha>().unwrap();

        let err = registry.try_register::<AlphaOverride>().unwrap_err();
        assert!(matches!(err, ProtocolError::DuplicateMessage("Test.Alpha")));
    }

    #[test]
    fn test_strict_registration_allows_shadowing_fallback() {
        let mut dialect = Registry::with_fallback("dialect", base());
        assert!(dialect.try_register::<AlphaOverride>().is_ok());
    }
}
