/*!
    Decoded frame type.
*/

use crate::{Error, PixelFormat, Result};

/**
    A decoded planar 4:2:0 video frame.

    The frame owns a single buffer holding the Y, Cb and Cr planes back to
    back, in that order. Plane accessors borrow non-overlapping regions of
    it; no plane is ever copied out of the buffer.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    luma_len: usize,
    chroma_len: usize,
    index: u64,
}

impl VideoFrame {
    /**
        Wrap a fully read frame payload.

        `data` must hold exactly `width * height * 3 / 2` bytes, otherwise
        [`Error::FrameSizeMismatch`] is returned. Dimensions must be even,
        non-zero and small enough for the frame length to fit in `usize`,
        otherwise [`Error::InvalidDimensions`] is returned.
    */
    pub fn from_planar(data: Vec<u8>, width: u32, height: u32, index: u64) -> Result<Self> {
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let (luma_len, chroma_len, expected) =
            plane_lengths(width, height).ok_or(Error::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            luma_len,
            chroma_len,
            index,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Zero-based position of this frame within its stream.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Pixel format of the planes.
    pub fn format(&self) -> PixelFormat {
        PixelFormat::I420
    }

    /// Luma plane, `width * height` bytes.
    pub fn y(&self) -> &[u8] {
        &self.data[..self.luma_len]
    }

    /// Blue-difference chroma plane, `width * height / 4` bytes.
    pub fn cb(&self) -> &[u8] {
        &self.data[self.luma_len..self.luma_len + self.chroma_len]
    }

    /// Red-difference chroma plane, `width * height / 4` bytes.
    pub fn cr(&self) -> &[u8] {
        &self.data[self.luma_len + self.chroma_len..]
    }

    /**
        All three planes at once, in Y, Cb, Cr order.
    */
    pub fn planes(&self) -> (&[u8], &[u8], &[u8]) {
        let (y, chroma) = self.data.split_at(self.luma_len);
        let (cb, cr) = chroma.split_at(self.chroma_len);
        (y, cb, cr)
    }

    /// Row stride of the luma plane in bytes.
    pub fn y_stride(&self) -> usize {
        self.width as usize
    }

    /// Row stride of each chroma plane in bytes.
    pub fn chroma_stride(&self) -> usize {
        self.width as usize / 2
    }

    /**
        The whole backing buffer, planes concatenated.
    */
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /**
        Consume the frame and return its backing buffer.
    */
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

static_assertions::assert_impl_all!(VideoFrame: Send, Sync);

fn plane_lengths(width: u32, height: u32) -> Option<(usize, usize, usize)> {
    let luma = (width as usize).checked_mul(height as usize)?;
    let chroma = luma / 4;
    let total = luma.checked_add(chroma.checked_mul(2)?)?;
    Some((luma, chroma, total))
}
