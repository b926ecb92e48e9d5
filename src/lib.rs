#![warn(clippy::nursery)]

pub mod image;
pub mod qoi;
pub mod renderer;
pub mod util;

pub use crate::image::{
    grammar::{Image, ImageExt, ImageKind},
    reader::ImageReader,
};
pub use crate::qoi::{decode, looks_like_qoi, QoiDecoder, QoiError};
