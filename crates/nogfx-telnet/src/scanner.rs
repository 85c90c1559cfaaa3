//! Incremental extraction of GMCP frames from a raw telnet stream.
//!
//! Reads from a socket rarely line up with frame boundaries: one read can
//! carry half a frame, or a prompt followed by three frames. The
//! [`FrameScanner`] is a byte-at-a-time state machine: it holds on to a
//! partial frame (or a partial telnet command) between reads and hands
//! back everything it could classify, in order.

use std::mem;

use crate::{DO, DONT, FramingError, GMCP, GMCP_INTRODUCER, IAC, SB, SE, WILL, WONT};

/// Default upper bound for a single GMCP payload (64 KiB).
pub const DEFAULT_MAX_FRAME_LEN: usize = 64 * 1024;

/// A classified piece of a telnet stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Ordinary bytes, including any telnet command that is not a GMCP
    /// subnegotiation. Left untouched for the session layer.
    Data(Vec<u8>),

    /// The payload of one complete GMCP subnegotiation, with escaped
    /// `IAC IAC` pairs collapsed.
    Gmcp(Vec<u8>),

    /// A GMCP frame that outgrew the limit, in the place it started.
    /// Its bytes up to the closing `IAC SE` are discarded, never
    /// surfaced as [`Chunk::Data`].
    Oversized(FramingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    /// `IAC` seen in plain data.
    Command,
    /// `IAC <WILL|WONT|DO|DONT|SB>` seen, waiting for the option byte.
    Option(u8),
    /// Inside a GMCP payload.
    Frame,
    /// `IAC` seen inside a GMCP payload.
    FrameCommand,
    /// Inside an oversized GMCP payload.
    Discard,
    /// `IAC` seen inside an oversized GMCP payload.
    DiscardCommand,
}

/// Splits telnet bytes into [`Chunk`]s.
#[derive(Debug)]
pub struct FrameScanner {
    state: State,
    frame: Vec<u8>,
    max_frame_len: usize,
}

impl FrameScanner {
    /// Creates a scanner with [`DEFAULT_MAX_FRAME_LEN`].
    pub fn new() -> Self {
        Self::with_max_frame_len(DEFAULT_MAX_FRAME_LEN)
    }

    /// Creates a scanner that drops GMCP payloads longer than `max`.
    pub fn with_max_frame_len(max: usize) -> Self {
        Self {
            state: State::Text,
            frame: Vec::new(),
            max_frame_len: max,
        }
    }

    /// Number of bytes held back waiting for more input.
    pub fn buffered(&self) -> usize {
        match self.state {
            State::Text | State::Discard | State::DiscardCommand => 0,
            State::Command => 1,
            State::Option(_) => 2,
            State::Frame => GMCP_INTRODUCER.len() + self.frame.len(),
            State::FrameCommand => GMCP_INTRODUCER.len() + self.frame.len() + 1,
        }
    }

    /// Whether the scanner is skipping the rest of an oversized frame.
    pub fn is_discarding(&self) -> bool {
        matches!(self.state, State::Discard | State::DiscardCommand)
    }

    /// Appends `bytes` to the stream and returns every chunk that is now
    /// complete.
    ///
    /// Scanning never fails. A payload longer than the limit (counted
    /// after unescaping, however the bytes were split across reads) shows
    /// up as [`Chunk::Oversized`]; its `len` counts the payload bytes seen
    /// up to the end of the frame or of this read, whichever comes first.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut plain = Vec::new();
        // Index of the `Oversized` chunk still counting discarded bytes.
        let mut report = None;

        for &byte in bytes {
            let state = self.state;
            self.state = match state {
                State::Text if byte == IAC => State::Command,
                State::Text => {
                    plain.push(byte);
                    State::Text
                }
                State::Command => match byte {
                    WILL | WONT | DO | DONT | SB => State::Option(byte),
                    _ => {
                        plain.extend_from_slice(&[IAC, byte]);
                        State::Text
                    }
                },
                State::Option(SB) if byte == GMCP => {
                    flush(&mut chunks, &mut plain);
                    self.frame.clear();
                    State::Frame
                }
                State::Option(command) => {
                    plain.extend_from_slice(&[IAC, command, byte]);
                    State::Text
                }
                State::Frame if byte == IAC => State::FrameCommand,
                State::Frame => self.push_frame(&[byte], &mut chunks, &mut report),
                State::FrameCommand => match byte {
                    SE => {
                        let payload = mem::take(&mut self.frame);
                        tracing::trace!(len = payload.len(), "GMCP frame complete");
                        chunks.push(Chunk::Gmcp(payload));
                        State::Text
                    }
                    IAC => self.push_frame(&[IAC], &mut chunks, &mut report),
                    other => self.push_frame(&[IAC, other], &mut chunks, &mut report),
                },
                State::Discard if byte == IAC => State::DiscardCommand,
                State::Discard => {
                    count_discarded(&mut chunks, report, 1);
                    State::Discard
                }
                State::DiscardCommand => match byte {
                    SE => {
                        report = None;
                        State::Text
                    }
                    IAC => {
                        count_discarded(&mut chunks, report, 1);
                        State::Discard
                    }
                    _ => {
                        count_discarded(&mut chunks, report, 2);
                        State::Discard
                    }
                },
            };
        }

        flush(&mut chunks, &mut plain);
        chunks
    }

    fn push_frame(
        &mut self,
        bytes: &[u8],
        chunks: &mut Vec<Chunk>,
        report: &mut Option<usize>,
    ) -> State {
        let len = self.frame.len() + bytes.len();
        if len <= self.max_frame_len {
            self.frame.extend_from_slice(bytes);
            return State::Frame;
        }

        tracing::warn!(len, max = self.max_frame_len, "dropping oversized GMCP frame");
        self.frame.clear();
        *report = Some(chunks.len());
        chunks.push(Chunk::Oversized(FramingError::FrameTooLarge {
            len,
            max: self.max_frame_len,
        }));
        State::Discard
    }
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn flush(chunks: &mut Vec<Chunk>, plain: &mut Vec<u8>) {
    if !plain.is_empty() {
        chunks.push(Chunk::Data(mem::take(plain)));
    }
}

fn count_discarded(chunks: &mut [Chunk], report: Option<usize>, n: usize) {
    if let Some(Chunk::Oversized(FramingError::FrameTooLarge { len, .. })) =
        report.and_then(|index| chunks.get_mut(index))
    {
        *len += n;
    }
}
