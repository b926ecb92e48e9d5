use crate::image::grammar::ImageExt;
use std::borrow::Cow;

pub const HEADER_LENGTH: usize = 14;
pub const MAGIC: [u8; 4] = *b"qoif";
pub const END_MARKER: [u8; 8] = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];

pub const QOI_OP_RGB: u8 = 0b1111_1110;
pub const QOI_OP_RGBA: u8 = 0b1111_1111;

pub const QOI_OP_INDEX: u8 = 0b0000_0000;
pub const QOI_OP_DIFF: u8 = 0b0100_0000;
pub const QOI_OP_LUMA: u8 = 0b1000_0000;
pub const QOI_OP_RUN: u8 = 0b1100_0000;

pub const TAG_MASK: u8 = 0b1100_0000;
pub const DATA_MASK: u8 = 0b0011_1111;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb = 3,
    Rgba = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// sRGB with linear alpha.
    Srgb = 0,
    Linear = 1,
}

/// The fixed 14 byte header. `channels` and `colorspace` are informational
/// and never change how the opcode stream is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub colorspace: u8,
}

impl Header {
    pub const fn channels(&self) -> Option<Channels> {
        match self.channels {
            3 => Some(Channels::Rgb),
            4 => Some(Channels::Rgba),
            _ => None,
        }
    }

    pub const fn colorspace(&self) -> Option<ColorSpace> {
        match self.colorspace {
            0 => Some(ColorSpace::Srgb),
            1 => Some(ColorSpace::Linear),
            _ => None,
        }
    }

    /// `width * height`, or `None` when it does not fit in a `usize`.
    pub fn total_pixels(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok()?;
        let height = usize::try_from(self.height).ok()?;

        width.checked_mul(height)
    }
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Seed for the previous pixel before anything is decoded.
    pub const START: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn hash(&self) -> usize {
        (self.r as usize * 3 + self.g as usize * 5 + self.b as usize * 7 + self.a as usize * 11)
            % 64
    }

    /// Adds signed deltas to the color channels, wrapping modulo 256. Alpha is kept.
    pub const fn wrapping_add_rgb(&self, dr: u8, dg: u8, db: u8) -> Self {
        Self {
            r: self.r.wrapping_add(dr),
            g: self.g.wrapping_add(dg),
            b: self.b.wrapping_add(db),
            a: self.a,
        }
    }

    /// Packs the pixel as `0xAARRGGBB`.
    pub const fn to_argb(&self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }
}

/// A fully decoded QOI image. Only ever constructed once every pixel and
/// the end marker have been read.
#[derive(Debug, PartialEq, Eq)]
pub struct Qoi {
    pub(crate) header: Header,
    pub(crate) pixels: Vec<Pixel>,
}

impl Qoi {
    pub const fn header(&self) -> &Header {
        &self.header
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}

impl ImageExt for Qoi {
    fn width(&self) -> u32 {
        self.header.width
    }

    fn height(&self) -> u32 {
        self.header.height
    }

    fn rgba8(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(bytemuck::cast_slice(self.pixels.as_slice()))
    }

    fn bitmap(&self) -> Cow<'_, [u32]> {
        Cow::Owned(self.pixels.iter().map(Pixel::to_argb).collect())
    }
}
