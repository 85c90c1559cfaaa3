//! `Core.Supports.*` with the `IRE.*` modules.

use std::collections::BTreeMap;

use nogfx_protocol::ProtocolError;

/// Base modules plus `IRE.Rift` and `IRE.Target`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupports {
    pub base: nogfx_protocol::CoreSupports,
    pub ire_rift: Option<u32>,
    pub ire_target: Option<u32>,
}

impl CoreSupports {
    /// Claims the `IRE.*` modules out of the base's unknown names.
    pub fn from_base(mut base: nogfx_protocol::CoreSupports) -> Self {
        let ire_rift = base.other.remove("IRE.Rift");
        let ire_target = base.other.remove("IRE.Target");
        Self {
            base,
            ire_rift,
            ire_target,
        }
    }

    pub fn from_modules(modules: BTreeMap<String, u32>) -> Self {
        Self::from_base(nogfx_protocol::CoreSupports::from_modules(modules))
    }

    pub fn modules(&self) -> BTreeMap<String, u32> {
        let mut modules = self.base.modules();
        if let Some(version) = self.ire_rift {
            modules.insert("IRE.Rift".to_string(), version);
        }
        if let Some(version) = self.ire_target {
            modules.insert("IRE.Target".to_string(), version);
        }
        modules
    }

    pub fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        nogfx_protocol::CoreSupports::decode_body(body).map(Self::from_base)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupportsSet(pub CoreSupports);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupportsAdd(pub CoreSupports);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreSupportsRemove(pub CoreSupports);

nogfx_protocol::supports_message!(CoreSupportsSet(CoreSupports), "Core.Supports.Set");
nogfx_protocol::supports_message!(CoreSupportsAdd(CoreSupports), "Core.Supports.Add");
nogfx_protocol::supports_message!(CoreSupportsRemove(CoreSupports), "Core.Supports.Remove");
