use anyhow::{ensure, Result};
use clap::Parser;
use sqiv::{
    renderer::{run, ViewerOptions},
    ImageReader,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    image_path: PathBuf,

    /// Window title. Defaults to "SQIV - <IMAGE_PATH>".
    #[arg(long)]
    title: Option<String>,

    /// Open at 100% zoom instead of shrinking the image to fit the window.
    #[arg(long)]
    no_fit: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        image_path,
        title,
        no_fit,
    } = Args::parse();

    ensure!(image_path.exists(), "Filename {:?} doesn't exist.", image_path);

    let (kind, image) = ImageReader::read_from_path(&image_path)?;
    let (width, height) = image.dimensions();
    log::info!("Loaded {kind:?} image {image_path:?}, {width}x{height}");

    let options = ViewerOptions {
        title: title.unwrap_or_else(|| format!("SQIV - {}", image_path.display())),
        fit_to_window: !no_fit,
    };

    pollster::block_on(run(image, options))
}
