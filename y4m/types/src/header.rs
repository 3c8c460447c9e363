/*!
    Stream header parameters.
*/

use std::time::Duration;

use crate::{ColorFormat, Error, Result};

/**
    Parameters declared by the header line of a Y4M stream.

    Width and height are zero when the header omitted them. Such a header
    is accepted, but no frame can be decoded from it.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StreamHeader {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Nominal frames per second (numerator of the `F` token).
    pub frame_rate: u32,
    /// Declared colour space.
    pub color: ColorFormat,
}

impl StreamHeader {
    /**
        Check that both dimensions are present and even.
    */
    pub fn validate_dimensions(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /**
        Byte length of the luma plane, or `None` if it does not fit in `usize`.
    */
    pub fn luma_len(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /**
        Byte length of one chroma plane.
    */
    pub fn chroma_len(&self) -> Option<usize> {
        self.luma_len().map(|luma| luma / 4)
    }

    /**
        Byte length of a full frame payload (luma plus both chroma planes).
    */
    pub fn frame_len(&self) -> Option<usize> {
        let luma = self.luma_len()?;
        let chroma = self.chroma_len()?;
        chroma.checked_mul(2)?.checked_add(luma)
    }

    /**
        Delay between two frames at the declared rate.

        Returns `None` when the frame rate is zero.
    */
    pub fn frame_interval(&self) -> Option<Duration> {
        interval_for(self.frame_rate)
    }

    /**
        Presentation time of the frame with the given index.

        Returns `None` when the frame rate is zero.
    */
    pub fn presentation_time(&self, index: u64) -> Option<Duration> {
        if self.frame_rate == 0 {
            return None;
        }
        let nanos = u128::from(index) * 1_000_000_000 / u128::from(self.frame_rate);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }
}

/**
    Delay between two frames at `frame_rate` frames per second.
*/
pub fn interval_for(frame_rate: u32) -> Option<Duration> {
    (frame_rate > 0).then(|| Duration::from_secs(1) / frame_rate)
}
