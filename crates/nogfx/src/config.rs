//! Client configuration for a GMCP session.

use std::collections::BTreeMap;

use nogfx_protocol::{CoreHello, CoreSupports, CoreSupportsSet, Message, ProtocolError, Registry};
use nogfx_telnet::DEFAULT_MAX_FRAME_LEN;
use serde::{Deserialize, Serialize};

use crate::NogfxError;

// ---------------------------------------------------------------------------
// Dialect
// ---------------------------------------------------------------------------

/// Which message catalog a session speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Only the base GMCP messages.
    #[default]
    Generic,
    /// Any Iron Realms game.
    IronRealms,
    /// Achaea, on top of Iron Realms.
    Achaea,
}

impl Dialect {
    /// Builds the registry chain for this dialect.
    ///
    /// With `strict`, a name registered twice in one registry fails with
    /// [`ProtocolError::DuplicateMessage`] instead of replacing the first.
    pub fn registry(self, strict: bool) -> Result<Registry, ProtocolError> {
        match (self, strict) {
            (Self::Generic, false) => Ok(nogfx_protocol::registry()),
            (Self::Generic, true) => nogfx_protocol::strict_registry(),
            (Self::IronRealms, false) => Ok(nogfx_ironrealms::registry()),
            (Self::IronRealms, true) => nogfx_ironrealms::strict_registry(),
            (Self::Achaea, false) => Ok(nogfx_achaea::registry()),
            (Self::Achaea, true) => nogfx_achaea::strict_registry(),
        }
    }

    /// Modules announced with `Core.Supports.Set` unless configured.
    pub fn default_supports(self) -> BTreeMap<String, u32> {
        let mut modules: BTreeMap<String, u32> = ["Char", "Char.Items", "Char.Skills", "Comm.Channel", "Room"]
            .into_iter()
            .map(|name| (name.to_string(), 1))
            .collect();
        if self != Self::Generic {
            modules.insert("IRE.Rift".to_string(), 1);
            modules.insert("IRE.Target".to_string(), 1);
        }
        modules
    }
}

// ---------------------------------------------------------------------------
// GmcpConfig
// ---------------------------------------------------------------------------

/// Settings for one GMCP session.
///
/// Every key is optional in JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmcpConfig {
    pub dialect: Dialect,

    /// Client name sent in `Core.Hello`.
    pub client: String,

    /// Client version sent in `Core.Hello`.
    pub version: String,

    /// Modules to announce. `None` uses [`Dialect::default_supports`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports: Option<BTreeMap<String, u32>>,

    /// Refuse duplicate message names when building registries.
    pub strict_registration: bool,

    /// Largest GMCP payload the stream scanner will buffer.
    pub max_frame_len: usize,
}

impl Default for GmcpConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            client: "nogfx".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            supports: None,
            strict_registration: false,
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }
}

impl GmcpConfig {
    pub fn from_json(json: &str) -> Result<Self, NogfxError> {
        serde_json::from_str(json).map_err(NogfxError::Config)
    }

    /// The modules to announce, configured or dialect defaults.
    pub fn supports(&self) -> BTreeMap<String, u32> {
        self.supports
            .clone()
            .unwrap_or_else(|| self.dialect.default_supports())
    }

    pub fn registry(&self) -> Result<Registry, NogfxError> {
        Ok(self.dialect.registry(self.strict_registration)?)
    }

    /// Framed `Core.Hello` and `Core.Supports.Set`, in sending order, for
    /// when the server has agreed to GMCP.
    pub fn handshake(&self) -> Vec<Vec<u8>> {
        let hello = CoreHello {
            client: self.client.clone(),
            version: self.version.clone(),
        };
        let supports = CoreSupportsSet(CoreSupports::from_modules(self.supports()));

        [hello.encode(), supports.encode()]
            .iter()
            .map(|payload| nogfx_telnet::wrap(payload.as_bytes()))
            .collect()
    }
}
