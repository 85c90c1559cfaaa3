//! The GMCP dialect of Achaea.
//!
//! Achaea is an Iron Realms game and speaks that dialect, with two
//! messages extended further:
//!
//! - `Char.Status` adds house, order, target, credits, and more, and
//!   insists on a rank for city, house, and order.
//! - `Char.Vitals` adds the class-specific `charstats` list.
//!
//! [`registry`] falls back to [`nogfx_ironrealms::registry`].

mod catalog;
mod status;
mod vitals;

pub use catalog::{NAME, messages, registry, strict_registry};
pub use status::{CharStatus, NO_TARGET, decode_ranked_affiliation, decode_target, encode_target};
pub use vitals::{CharStats, CharVitals};
