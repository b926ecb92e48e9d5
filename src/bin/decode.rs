use anyhow::{anyhow, Result};
use clap::Parser;
use comfy_table::{Attribute, Cell, Color, Table};
#[cfg(feature = "time")]
use sqiv::util::event_log::{log_event, Event};
use sqiv::{looks_like_qoi, qoi::grammar::Header, ImageExt, ImageKind, ImageReader, QoiDecoder};
use std::{
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
#[cfg(feature = "time")]
use std::time::Instant;

/// Decodes images without opening a window and prints one row per file.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(required = true)]
    image_paths: Vec<PathBuf>,
}

#[derive(Debug)]
enum DecodeStatus {
    Decoded,
    Failed(anyhow::Error),
}

impl DecodeStatus {
    const fn color(&self) -> Color {
        match self {
            Self::Decoded => Color::Green,
            Self::Failed(_) => Color::Red,
        }
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoded => write!(f, "Decoded"),
            Self::Failed(error) => write!(f, "Error: {error:#}"),
        }
    }
}

fn bold_cell(s: &str) -> Cell {
    Cell::new(s).add_attribute(Attribute::Bold)
}

fn describe_header(header: &Header) -> String {
    let channels = header
        .channels()
        .map_or_else(|| format!("{} channels?", header.channels), |c| format!("{c:?}"));
    let colorspace = header
        .colorspace()
        .map_or_else(|| format!("colorspace {}?", header.colorspace), |c| format!("{c:?}"));

    format!("{channels}, {colorspace}")
}

fn decode(path: &Path) -> Result<(ImageKind, (u32, u32), String)> {
    let mut reader = BufReader::new(File::open(path)?);

    if looks_like_qoi(&mut reader)? {
        let qoi = QoiDecoder::new(reader).decode()?;
        return Ok((
            ImageKind::Qoi,
            qoi.dimensions(),
            describe_header(qoi.header()),
        ));
    }

    let (kind, image) = ImageReader::read(reader)?;

    Ok((kind, image.dimensions(), String::from("RGBA8 via image crate")))
}

fn main() -> Result<()> {
    env_logger::init();

    let Args { image_paths } = Args::parse();

    let mut table = Table::new();
    table.set_header(vec![
        bold_cell("File"),
        bold_cell("Format"),
        bold_cell("Size"),
        bold_cell("Details"),
        bold_cell("Status"),
    ]);

    let mut failures = 0;

    for path in &image_paths {
        #[cfg(feature = "time")]
        let a = Instant::now();

        let (kind, size, details, status) = match decode(path) {
            Ok((kind, (width, height), details)) => (
                format!("{kind:?}"),
                format!("{width}x{height}"),
                details,
                DecodeStatus::Decoded,
            ),
            Err(error) => {
                failures += 1;
                (
                    String::new(),
                    String::new(),
                    String::new(),
                    DecodeStatus::Failed(error),
                )
            }
        };

        #[cfg(feature = "time")]
        log_event(&path.display().to_string(), Event::TotalElapsed, Some(a.elapsed()));

        table.add_row(vec![
            Cell::new(path.display()),
            Cell::new(kind),
            Cell::new(size),
            Cell::new(details),
            Cell::new(&status).fg(status.color()),
        ]);
    }

    println!("{table}");

    if failures > 0 {
        return Err(anyhow!("{failures} of {} images failed to decode", image_paths.len()));
    }

    Ok(())
}
