use thiserror::Error;

/// Every way a single QOI decode can fail. None of these are retried.
#[derive(Debug, Error)]
pub enum QoiError {
    #[error("not a QOI stream: expected magic \"qoif\", found {found:?}")]
    FormatMismatch { found: [u8; 4] },

    #[error("unexpected end of stream while reading {context}")]
    TruncatedInput { context: &'static str },

    #[error("invalid end marker: expected [0, 0, 0, 0, 0, 0, 0, 1], found {found:?}")]
    InvalidEndMarker { found: [u8; 8] },

    #[error("failed to allocate a pixel buffer for a {width}x{height} image")]
    AllocationFailure { width: u32, height: u32 },

    #[error("run of {run} pixels overruns the image, only {remaining} pixels remain")]
    RunOverrun { run: u8, remaining: usize },

    #[error(transparent)]
    Io(std::io::Error),
}

impl QoiError {
    /// Maps a failed read to `TruncatedInput` when the stream simply ran dry.
    pub(crate) fn from_read(err: std::io::Error, context: &'static str) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::TruncatedInput { context },
            _ => Self::Io(err),
        }
    }
}
