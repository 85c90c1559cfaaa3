//! # nogfx
//!
//! The GMCP message layer of a MUD client.
//!
//! GMCP rides inside telnet subnegotiations and carries dotted-name
//! messages with JSON bodies. This crate ties the layers together:
//!
//! - [`nogfx_telnet`] finds GMCP frames in a telnet stream.
//! - [`nogfx_protocol`] holds the message contract, the base catalog,
//!   and the registry.
//! - [`nogfx_ironrealms`] and [`nogfx_achaea`] extend the catalog for
//!   specific games.
//!
//! A [`GmcpConfig`] picks the dialect, and a [`Dispatcher`] built from it
//! turns bytes into messages:
//!
//! ```rust
//! use nogfx::{Dispatcher, GmcpConfig};
//! use nogfx::protocol::CharVitals;
//!
//! let config = GmcpConfig::from_json(r#"{"dialect":"achaea"}"#)?;
//! let dispatcher = Dispatcher::from_config(&config)?;
//!
//! let message = dispatcher.try_dispatch(br#"Char.Vitals {"hp":"10"}"#)?;
//! assert!(message.downcast_ref::<nogfx::achaea::CharVitals>().is_some());
//! assert!(message.downcast_ref::<CharVitals>().is_none());
//! # Ok::<(), nogfx::NogfxError>(())
//! ```

mod config;
mod dispatcher;
mod error;
pub mod logging;

pub use config::{Dialect, GmcpConfig};
pub use dispatcher::{Dispatcher, Event};
pub use error::NogfxError;

pub use nogfx_achaea as achaea;
pub use nogfx_ironrealms as ironrealms;
pub use nogfx_protocol as protocol;
pub use nogfx_telnet as telnet;

pub use nogfx_protocol::{AnyMessage, Message, Registry};
