/*!
    Colour space and pixel format types.
*/

use std::fmt;

/**
    Colour space tag declared by a Y4M header (`C` token).

    Only 8-bit planar 4:2:0 is understood. The chroma-siting variants
    (`C420jpeg`, `C420mpeg2`, `C420paldv`) share its memory layout and
    parse to the same value.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorFormat {
    /// Planar YUV 4:2:0
    #[default]
    C420,
}

impl ColorFormat {
    /**
        The literal header token for this colour space.
    */
    pub const fn tag(self) -> &'static str {
        match self {
            Self::C420 => "C420",
        }
    }

    /**
        Parse a full `C` header token.

        Returns `None` for any token that is not exactly a supported tag,
        including high bit depth tags such as `C420p10`.
    */
    pub fn from_tag(token: &str) -> Option<Self> {
        match token {
            "C420" | "C420jpeg" | "C420mpeg2" | "C420paldv" => Some(Self::C420),
            _ => None,
        }
    }

    /**
        The in-memory pixel format frames of this colour space decode into.
    */
    pub const fn pixel_format(self) -> PixelFormat {
        match self {
            Self::C420 => PixelFormat::I420,
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/**
    Pixel format of decoded frames.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp: Y, then Cb, then Cr
    I420,
}

impl PixelFormat {
    /**
        Returns the average number of bits per pixel for this format.
    */
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::I420 => 12,
        }
    }

    /**
        Horizontal and vertical chroma subsampling divisors.
    */
    pub const fn chroma_subsampling(self) -> (u32, u32) {
        match self {
            Self::I420 => (2, 2),
        }
    }
}
