//! The GMCP dialect of the Iron Realms Entertainment games.
//!
//! Every IRE game (Achaea, Aetolia, Imperian, Lusternia, Starmourn) sends
//! the base GMCP messages with a few extra fields, plus the `IRE.*`
//! modules:
//!
//! - `Char.Status` adds bank, city, class, gold, and unread counts.
//! - `Char.Vitals` adds balance, equilibrium, and vote flags.
//! - `Core.Supports.*` knows `IRE.Rift` and `IRE.Target`.
//! - `IRE.Rift.*` and `IRE.Target.*` are new.
//!
//! [`registry`] falls back to [`nogfx_protocol::registry`] for everything
//! else.

mod catalog;
mod character;
mod rift;
mod supports;
mod target;

pub use catalog::{NAME, messages, registry, strict_registry};
pub use character::{
    CharStatus, CharVitals, NO_AFFILIATION, decode_affiliation, encode_affiliation,
};
pub use rift::{IreRiftChange, IreRiftList, IreRiftRequest, RiftItem};
pub use supports::{CoreSupports, CoreSupportsAdd, CoreSupportsRemove, CoreSupportsSet};
pub use target::{IreTargetInfo, IreTargetSet};
