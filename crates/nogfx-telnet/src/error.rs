/// Problems found while scanning a telnet byte stream.
///
/// Recognising whether a single buffer is a GMCP frame never fails (see
/// [`unwrap`](crate::unwrap)). The [`FrameScanner`] reports these in-stream
/// as [`Chunk::Oversized`] so that nothing else from the same read is lost.
///
/// [`FrameScanner`]: crate::FrameScanner
/// [`Chunk::Oversized`]: crate::Chunk::Oversized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    /// A GMCP payload grew past the scanner's limit. The frame is
    /// discarded up to its closing `IAC SE`.
    #[error("GMCP frame exceeds {max} bytes ({len} received)")]
    FrameTooLarge {
        /// Payload bytes received for the frame.
        len: usize,
        /// The configured limit.
        max: usize,
    },
}
