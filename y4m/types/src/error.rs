/*!
    Error types for the y4m crate family.
*/

use thiserror::Error;

/**
    Error type for the y4m crate family.

    End of stream and cancellation are not errors. They travel as
    [`StreamSignal`](crate::StreamSignal) values.
*/
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be used as a stream at all (empty path, wrong extension).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The stream ended before the signature or header line was complete.
    #[error("truncated header: need {needed} bytes, have {have}")]
    TruncatedHeader { needed: usize, have: usize },

    /// The first bytes of the stream are not the Y4M signature.
    #[error("signature mismatch: expected YUV4MPEG2, got {got:?}")]
    SignatureMismatch { got: String },

    /// A header token carried a value that is not a positive integer.
    #[error("malformed header field {token:?}")]
    MalformedHeaderField { token: String },

    /// The header declares a colour space other than planar 4:2:0.
    #[error("unsupported color format {token:?}, only 8-bit 4:2:0 is supported")]
    UnsupportedColorFormat { token: String },

    /// Width or height is missing, odd, or too large to address.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A frame record did not start with the `FRAME` marker.
    #[error("frame marker missing, got {line:?}")]
    FrameMarkerMissing { line: String },

    /// The stream ended in the middle of a frame payload.
    #[error("truncated frame: expected {expected} bytes, read {actual}")]
    TruncatedFrame { expected: usize, actual: usize },

    /// The frame buffer length disagrees with the plane boundaries.
    #[error("frame length ({actual}) does not match expected ({expected})")]
    FrameSizeMismatch { expected: usize, actual: usize },

    /// Pacing was requested at a frame rate of zero.
    #[error("invalid frame rate {0}, must be greater than zero")]
    InvalidFrameRate(u32),

    /// Underlying I/O failure other than a short read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reader already failed and cannot be used again.
    #[error("reader is poisoned by an earlier error")]
    Poisoned,
}

impl Error {
    /**
        Create an invalid input error with the given message.
    */
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /**
        Returns true if the stream ran out of bytes mid-structure.
    */
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::TruncatedHeader { .. } | Self::TruncatedFrame { .. }
        )
    }
}

/**
    Result type alias for the y4m crate family.
*/
pub type Result<T> = std::result::Result<T, Error>;
