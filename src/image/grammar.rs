use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Qoi,
    /// Anything the general-purpose `image` crate can sniff and decode.
    Other,
}

pub type Image = Box<dyn ImageExt>;

/// A decoded image ready for upload: row-major pixels with alpha.
pub trait ImageExt {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Four bytes per pixel in `r, g, b, a` order.
    fn rgba8(&self) -> Cow<'_, [u8]>;

    /// One `0xAARRGGBB` value per pixel.
    fn bitmap(&self) -> Cow<'_, [u32]> {
        Cow::Owned(
            self.rgba8()
                .chunks_exact(4)
                .map(|px| u32::from_be_bytes([px[3], px[0], px[1], px[2]]))
                .collect(),
        )
    }
}

/// An image decoded by the `image` crate, converted to 8-bit RGBA.
#[derive(Debug)]
pub struct FallbackImage {
    pub(crate) inner: image::RgbaImage,
}

impl ImageExt for FallbackImage {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn rgba8(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.inner.as_raw())
    }
}
