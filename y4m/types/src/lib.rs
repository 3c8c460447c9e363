/*!
    Shared types for the y4m crate family.

    This crate defines the vocabulary that crosses crate boundaries: the
    parsed stream header, decoded frames, termination signals and errors.
    It performs no I/O.

    # Core Types

    - [`StreamHeader`] - Parameters from the Y4M header line
    - [`VideoFrame`] - A decoded planar 4:2:0 frame
    - [`MediaProperties`] - What a paced source delivers

    # Format Types

    - [`ColorFormat`] - Colour space tags understood in headers
    - [`PixelFormat`] - In-memory layout of decoded frames

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
    - [`StreamSignal`] - End of stream and cancellation, which are not errors
*/

mod error;
mod format;
mod frame;
mod header;
mod signal;
mod stream;

pub use error::{Error, Result};
pub use format::{ColorFormat, PixelFormat};
pub use frame::VideoFrame;
pub use header::{StreamHeader, interval_for};
pub use signal::StreamSignal;
pub use stream::MediaProperties;

/// Fixed signature every Y4M stream starts with.
pub const SIGNATURE: &[u8; 9] = b"YUV4MPEG2";

/// Marker every frame record line starts with.
pub const FRAME_MARKER: &[u8; 5] = b"FRAME";
