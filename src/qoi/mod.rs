pub use decoder::*;
pub use error::*;
pub mod grammar;

mod color_cache;
mod decoder;
mod error;

use grammar::{Qoi, MAGIC};
use std::io::{self, Read, Seek, SeekFrom};

/// Peeks at the first four bytes for the `qoif` magic.
///
/// The stream is always returned to the position it had on entry, whether or not
/// the magic matched, so a fallback decoder can read it from the start. A stream
/// shorter than four bytes is simply not QOI.
pub fn looks_like_qoi<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let start = reader.stream_position()?;

    let mut magic = [0_u8; 4];
    let matched = match reader.read_exact(&mut magic) {
        Ok(()) => Ok(magic == MAGIC),
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err),
    };

    reader.seek(SeekFrom::Start(start))?;

    matched
}

/// Decodes a whole QOI stream into its header and pixel buffer.
pub fn decode<R: Read>(reader: R) -> Result<Qoi, QoiError> {
    QoiDecoder::new(reader).decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use super::grammar::{Pixel, END_MARKER};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_sniff_qoi() -> Result<()> {
        let mut reader = Cursor::new(b"qoif\x00\x00\x00\x01".to_vec());

        assert!(looks_like_qoi(&mut reader)?);
        assert_eq!(reader.position(), 0);

        Ok(())
    }

    #[test]
    fn test_sniff_rejects_other_magic() -> Result<()> {
        let mut reader = Cursor::new(b"\x89PNG\r\n\x1a\n".to_vec());

        assert!(!looks_like_qoi(&mut reader)?);
        assert_eq!(reader.position(), 0);

        let mut first = [0_u8; 4];
        reader.read_exact(&mut first)?;
        assert_eq!(&first, b"\x89PNG");

        Ok(())
    }

    #[test]
    fn test_sniff_short_stream() -> Result<()> {
        let mut reader = Cursor::new(b"qoi".to_vec());

        assert!(!looks_like_qoi(&mut reader)?);
        assert_eq!(reader.position(), 0);

        let mut empty = Cursor::new(Vec::new());
        assert!(!looks_like_qoi(&mut empty)?);

        Ok(())
    }

    #[test]
    fn test_sniff_restores_entry_position() -> Result<()> {
        let mut reader = Cursor::new(b"junkqoif".to_vec());
        reader.set_position(4);

        assert!(looks_like_qoi(&mut reader)?);
        assert_eq!(reader.position(), 4);

        Ok(())
    }

    #[test]
    fn test_sniff_then_decode() -> Result<()> {
        let mut data = b"qoif".to_vec();
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&1_u32.to_be_bytes());
        data.extend_from_slice(&[3, 1]);
        data.extend_from_slice(&[0xfe, 1, 2, 3]);
        data.extend_from_slice(&END_MARKER);

        let mut reader = Cursor::new(data);
        assert!(looks_like_qoi(&mut reader)?);

        let qoi = decode(reader)?;

        assert_eq!(qoi.header().channels(), Some(grammar::Channels::Rgb));
        assert_eq!(qoi.header().colorspace(), Some(grammar::ColorSpace::Linear));
        assert_eq!(qoi.pixels(), &[Pixel::new(1, 2, 3, 255)]);

        Ok(())
    }
}
