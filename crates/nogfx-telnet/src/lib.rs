//! Telnet envelope framing for GMCP.
//!
//! GMCP messages travel inside telnet subnegotiation blocks:
//!
//! ```text
//! IAC SB GMCP <payload> IAC SE
//! ```
//!
//! This crate only knows about that envelope. It does not negotiate
//! options (ECHO, NAWS, ...) and it does not interpret the payload; the
//! protocol crate takes it from here.
//!
//! - [`wrap`] / [`unwrap`] — frame and unframe a single payload.
//! - [`FrameScanner`] — pull complete GMCP payloads out of a raw telnet
//!   byte stream that arrives in arbitrary chunks.

mod error;
mod scanner;

pub use error::FramingError;
pub use scanner::{Chunk, FrameScanner, DEFAULT_MAX_FRAME_LEN};

// ---------------------------------------------------------------------------
// Telnet constants (RFC 854, RFC 855)
// ---------------------------------------------------------------------------

/// Interpret As Command. Introduces every telnet command.
pub const IAC: u8 = 255;
/// Refuse to perform an option.
pub const DONT: u8 = 254;
/// Request that the peer performs an option.
pub const DO: u8 = 253;
/// Refuse to perform an option.
pub const WONT: u8 = 252;
/// Agree to perform an option.
pub const WILL: u8 = 251;
/// Begin subnegotiation.
pub const SB: u8 = 250;
/// End subnegotiation.
pub const SE: u8 = 240;
/// Generic MUD Communication Protocol option code.
pub const GMCP: u8 = 201;

/// The server offers GMCP.
pub const IAC_WILL_GMCP: [u8; 3] = [IAC, WILL, GMCP];
/// The client accepts GMCP.
pub const IAC_DO_GMCP: [u8; 3] = [IAC, DO, GMCP];

/// Bytes that open a GMCP subnegotiation.
pub const GMCP_INTRODUCER: [u8; 3] = [IAC, SB, GMCP];
/// Bytes that close any subnegotiation.
pub const GMCP_TERMINATOR: [u8; 2] = [IAC, SE];

// ---------------------------------------------------------------------------
// Single-frame helpers
// ---------------------------------------------------------------------------

/// Frames `payload` as a GMCP subnegotiation.
///
/// GMCP payloads are UTF-8 text, which never contains the `IAC` byte, so
/// no escaping is applied.
pub fn wrap(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(
        GMCP_INTRODUCER.len() + payload.len() + GMCP_TERMINATOR.len(),
    );
    framed.extend_from_slice(&GMCP_INTRODUCER);
    framed.extend_from_slice(payload);
    framed.extend_from_slice(&GMCP_TERMINATOR);
    framed
}

/// Returns the payload of a GMCP frame, or `None` if `data` is not one.
///
/// `None` is not an error: it is how callers tell GMCP traffic apart from
/// ordinary telnet traffic.
pub fn unwrap(data: &[u8]) -> Option<&[u8]> {
    data.strip_prefix(&GMCP_INTRODUCER[..])?
        .strip_suffix(&GMCP_TERMINATOR[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_adds_introducer_and_terminator() {
        assert_eq!(
            wrap(b"Core.Ping"),
            [&GMCP_INTRODUCER[..], b"Core.Ping", &GMCP_TERMINATOR[..]].concat()
        );
    }

    #[test]
    fn test_unwrap_round_trip() {
        let data = b"asdf";
        assert_eq!(unwrap(&wrap(data)), Some(&data[..]));
    }

    #[test]
    fn test_unwrap_requires_both_ends() {
        let mut only_suffix = b"asdf".to_vec();
        only_suffix.extend_from_slice(&GMCP_TERMINATOR);
        assert_eq!(unwrap(&only_suffix), None);

        let mut only_prefix = GMCP_INTRODUCER.to_vec();
        only_prefix.extend_from_slice(b"asdf");
        assert_eq!(unwrap(&only_prefix), None);
    }

    #[test]
    fn test_unwrap_plain_text_is_not_gmcp() {
        assert_eq!(unwrap(b"You see a rat."), None);
    }

    #[test]
    fn test_unwrap_empty_frame() {
        assert_eq!(unwrap(&wrap(b"")), Some(&b""[..]));
    }

    #[test]
    fn test_unwrap_other_option_is_not_gmcp() {
        // IAC SB NAWS ... IAC SE
        let naws = [IAC, SB, 31, 0, 80, 0, 24, IAC, SE];
        assert_eq!(unwrap(&naws), None);
    }
}
