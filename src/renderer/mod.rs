pub use app_state::{run, ViewerOptions};

pub(crate) use texture::*;
pub(crate) use vertex::*;

pub mod view_state;

mod app_state;
mod gpu_state;
mod image_buffer;
mod texture;
mod vertex;
