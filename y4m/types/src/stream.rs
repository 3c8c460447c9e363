/*!
    Stream properties exposed to capture-device hosts.
*/

use crate::{PixelFormat, StreamHeader};

/**
    Read-only description of the frames a source delivers.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MediaProperties {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Delivery rate in frames per second.
    pub frame_rate: u32,
    /// Pixel format of every delivered frame.
    pub pixel_format: PixelFormat,
}

impl MediaProperties {
    /**
        Describe a stream paced at `frame_rate`.
    */
    pub fn new(header: &StreamHeader, frame_rate: u32) -> Self {
        Self {
            width: header.width,
            height: header.height,
            frame_rate,
            pixel_format: header.color.pixel_format(),
        }
    }
}

impl From<&StreamHeader> for MediaProperties {
    fn from(header: &StreamHeader) -> Self {
        Self::new(header, header.frame_rate)
    }
}

static_assertions::assert_impl_all!(MediaProperties: Send, Sync);
static_assertions::assert_impl_all!(StreamHeader: Send, Sync);
