//! Turning incoming bytes into typed messages.

use std::sync::Arc;

use nogfx_protocol::{AnyMessage, Registry};
use nogfx_telnet::{Chunk, FrameScanner};

use crate::{GmcpConfig, NogfxError};

/// One piece of a telnet stream after dispatch.
#[derive(Debug)]
pub enum Event {
    /// Bytes for the session to display or negotiate, untouched.
    Text(Vec<u8>),
    /// A decoded GMCP message.
    Message(Box<dyn AnyMessage>),
    /// A stream problem, in the place it happened. Scanning carries on
    /// after it.
    Error(NogfxError),
}

/// Resolves GMCP payloads against a shared registry chain.
///
/// Cloning is cheap and clones share the registry, so one dispatcher can
/// serve any number of connections or tasks.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    max_frame_len: usize,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            max_frame_len: nogfx_telnet::DEFAULT_MAX_FRAME_LEN,
        }
    }

    /// Builds the dialect's registry chain once and wraps it.
    pub fn from_config(config: &GmcpConfig) -> Result<Self, NogfxError> {
        Ok(Self {
            registry: Arc::new(config.registry()?),
            max_frame_len: config.max_frame_len,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A stream scanner with this dispatcher's frame limit.
    pub fn scanner(&self) -> FrameScanner {
        FrameScanner::with_max_frame_len(self.max_frame_len)
    }

    /// Decodes a framed or bare payload.
    ///
    /// Unknown and malformed messages are logged at `debug` and dropped.
    pub fn dispatch(&self, data: &[u8]) -> Option<Box<dyn AnyMessage>> {
        match self.registry.parse(data) {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::debug!(
                    registry = self.registry.name(),
                    error = %err,
                    "dropping GMCP message"
                );
                None
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), but hands back the error.
    pub fn try_dispatch(&self, data: &[u8]) -> Result<Box<dyn AnyMessage>, NogfxError> {
        Ok(self.registry.parse(data)?)
    }

    /// Feeds raw socket bytes through `scanner` and dispatches every
    /// complete GMCP frame.
    ///
    /// Plain data comes back as [`Event::Text`]. Unknown and malformed
    /// messages are dropped as in [`dispatch`](Self::dispatch); an oversized
    /// frame becomes an [`Event::Error`] and the rest of the read is kept.
    pub fn feed(&self, scanner: &mut FrameScanner, bytes: &[u8]) -> Vec<Event> {
        scanner
            .feed(bytes)
            .into_iter()
            .filter_map(|chunk| match chunk {
                Chunk::Data(data) => Some(Event::Text(data)),
                Chunk::Gmcp(payload) => self.dispatch(&payload).map(Event::Message),
                Chunk::Oversized(err) => Some(Event::Error(err.into())),
            })
            .collect()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(nogfx_protocol::registry())
    }
}
