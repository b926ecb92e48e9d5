#[cfg(feature = "time")]
use crate::util::event_log::{log_event, Event};
use crate::{
    qoi::{
        color_cache::ColorCache,
        grammar::{
            Header, Pixel, Qoi, DATA_MASK, END_MARKER, MAGIC, QOI_OP_DIFF, QOI_OP_INDEX,
            QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN, TAG_MASK,
        },
        QoiError,
    },
    read, read_array,
    util::read_bytes::{U32_BYTES, U8_BYTES},
};
use std::io::Read;
#[cfg(feature = "time")]
use std::time::Instant;

/// Streaming QOI decoder. Reads the stream strictly front to back and never seeks,
/// so the reader must already be positioned at the magic bytes.
#[derive(Debug)]
pub struct QoiDecoder<R> {
    reader: R,
}

impl<R: Read> QoiDecoder<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    pub fn decode(&mut self) -> Result<Qoi, QoiError> {
        #[cfg(feature = "time")]
        let a = Instant::now();
        let header = self.parse_header()?;
        #[cfg(feature = "time")]
        log_event("", Event::ParseHeader, Some(a.elapsed()));

        log::debug!(
            "qoi header: {}x{}, channels {}, colorspace {}",
            header.width,
            header.height,
            header.channels,
            header.colorspace
        );

        #[cfg(feature = "time")]
        let b = Instant::now();
        let pixels = self.decode_pixels(&header)?;
        #[cfg(feature = "time")]
        log_event("", Event::DecodeOpcodes, Some(b.elapsed()));

        #[cfg(feature = "time")]
        let c = Instant::now();
        self.validate_footer()?;
        #[cfg(feature = "time")]
        log_event("", Event::ValidateFooter, Some(c.elapsed()));

        Ok(Qoi { header, pixels })
    }

    fn parse_header(&mut self) -> Result<Header, QoiError> {
        let magic = self.read_array::<4>("header magic")?;

        if magic != MAGIC {
            return Err(QoiError::FormatMismatch { found: magic });
        }

        Ok(Header {
            width: self.read_u32("header width")?,
            height: self.read_u32("header height")?,
            channels: self.read_u8("header channels")?,
            colorspace: self.read_u8("header colorspace")?,
        })
    }

    fn allocate(header: &Header) -> Result<(Vec<Pixel>, usize), QoiError> {
        let allocation_failure = || QoiError::AllocationFailure {
            width: header.width,
            height: header.height,
        };

        let total_pixels = header.total_pixels().ok_or_else(allocation_failure)?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(total_pixels)
            .map_err(|_| allocation_failure())?;

        Ok((pixels, total_pixels))
    }

    fn decode_pixels(&mut self, header: &Header) -> Result<Vec<Pixel>, QoiError> {
        let (mut pixels, total_pixels) = Self::allocate(header)?;

        let mut cache = ColorCache::new();
        let mut previous = Pixel::START;

        while pixels.len() < total_pixels {
            let tag = self.read_u8("opcode tag")?;

            let (pixel, run) = match tag {
                QOI_OP_RGB => {
                    let [r, g, b] = self.read_array::<3>("RGB opcode")?;
                    (Pixel::new(r, g, b, previous.a), 1)
                }
                QOI_OP_RGBA => {
                    let [r, g, b, a] = self.read_array::<4>("RGBA opcode")?;
                    (Pixel::new(r, g, b, a), 1)
                }
                _ => match tag & TAG_MASK {
                    QOI_OP_INDEX => (cache.lookup(tag & DATA_MASK), 1),
                    QOI_OP_DIFF => {
                        let dr = ((tag >> 4) & 0b11).wrapping_sub(2);
                        let dg = ((tag >> 2) & 0b11).wrapping_sub(2);
                        let db = (tag & 0b11).wrapping_sub(2);

                        (previous.wrapping_add_rgb(dr, dg, db), 1)
                    }
                    QOI_OP_LUMA => {
                        let dg = (tag & DATA_MASK).wrapping_sub(32);
                        let next = self.read_u8("LUMA opcode")?;
                        let dr = ((next >> 4) & 0x0f).wrapping_sub(8).wrapping_add(dg);
                        let db = (next & 0x0f).wrapping_sub(8).wrapping_add(dg);

                        (previous.wrapping_add_rgb(dr, dg, db), 1)
                    }
                    // 0xfe and 0xff are already taken by RGB and RGBA.
                    _ => {
                        debug_assert_eq!(tag & TAG_MASK, QOI_OP_RUN);
                        (previous, (tag & DATA_MASK) + 1)
                    }
                },
            };

            let remaining = total_pixels - pixels.len();
            if usize::from(run) > remaining {
                return Err(QoiError::RunOverrun { run, remaining });
            }

            pixels.extend(std::iter::repeat(pixel).take(usize::from(run)));
            cache.store(pixel);
            previous = pixel;
        }

        Ok(pixels)
    }

    fn validate_footer(&mut self) -> Result<(), QoiError> {
        let found = self.read_array::<8>("end marker")?;

        if found != END_MARKER {
            return Err(QoiError::InvalidEndMarker { found });
        }

        Ok(())
    }

    read_array!();
    read!(read_u8, u8, U8_BYTES);
    read!(read_u32, u32, U32_BYTES);
}
