use crate::{
    image::grammar::{FallbackImage, Image, ImageKind},
    qoi::{looks_like_qoi, QoiDecoder},
};
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader, Seek},
    path::Path,
};

#[derive(Debug)]
pub struct ImageReader;

impl ImageReader {
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<(ImageKind, Image)> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Could not open file {path:?}"))?;

        Self::read(BufReader::new(file))
            .with_context(|| format!("Problem while loading the image {path:?}"))
    }

    /// Decodes QOI streams with the built-in decoder and hands everything else to
    /// the `image` crate, which reads the same stream from its start.
    pub fn read<R: BufRead + Seek>(mut reader: R) -> Result<(ImageKind, Image)> {
        if looks_like_qoi(&mut reader)? {
            let qoi = QoiDecoder::new(reader).decode()?;
            return Ok((ImageKind::Qoi, Box::new(qoi)));
        }

        let inner = image::ImageReader::new(reader)
            .with_guessed_format()?
            .decode()?
            .to_rgba8();

        Ok((ImageKind::Other, Box::new(FallbackImage { inner })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qoi::grammar::END_MARKER;
    use image::{ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_reads_qoi() -> Result<()> {
        let mut data = b"qoif".to_vec();
        data.extend_from_slice(&2_u32.to_be_bytes());
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&[4, 0, 0xff, 10, 20, 30, 40, 0xc0]);
        data.extend_from_slice(&END_MARKER);

        let (kind, image) = ImageReader::read(Cursor::new(data))?;

        assert_eq!(kind, ImageKind::Qoi);
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.rgba8().to_vec(), vec![10, 20, 30, 40, 10, 20, 30, 40]);
        assert_eq!(image.bitmap().to_vec(), vec![0x280a141e, 0x280a141e]);

        Ok(())
    }

    #[test]
    fn test_falls_back_for_png() -> Result<()> {
        let mut source = RgbaImage::new(2, 2);
        source.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        source.put_pixel(1, 1, Rgba([0, 0, 255, 128]));

        let mut png = Cursor::new(Vec::new());
        source.write_to(&mut png, ImageFormat::Png)?;
        png.set_position(0);

        let (kind, image) = ImageReader::read(png)?;

        assert_eq!(kind, ImageKind::Other);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.rgba8().to_vec(), source.into_raw());

        Ok(())
    }

    #[test]
    fn test_rejects_corrupt_qoi() {
        let mut data = b"qoif".to_vec();
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&[4, 0, 0xc0, 0, 0, 0, 0, 0, 0, 0, 0]);

        assert!(ImageReader::read(Cursor::new(data)).is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let data = b"definitely not an image".to_vec();

        assert!(ImageReader::read(Cursor::new(data)).is_err());
    }
}
