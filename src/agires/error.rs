//! Errors raised while decoding a VIEW resource.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("resource truncated: read at offset {offset} ran past end of data")]
    Truncated { offset: u64 },

    #[error("view claims {0} loops, at most 255 are allowed")]
    TooManyLoops(usize),

    #[error("loop {loop_num} claims {count} cels, at most 255 are allowed")]
    TooManyCels { loop_num: usize, count: usize },

    #[error("malformed cel info byte: {0:?}")]
    CelInfo(packed_struct::PackingError),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl FormatError {
    /// Maps an I/O error from a read that started at `offset`.
    pub fn from_read(err: io::Error, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::Truncated { offset }
        } else {
            FormatError::Io(err)
        }
    }
}
