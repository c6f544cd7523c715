//! Decoder error types.

use std::io;
use std::path::PathBuf;

use crate::chunk::ChunkId;

/// Top-level error returned by every decode entry point.
#[derive(Debug, thiserror::Error)]
pub enum VoxError {
    /// The stream is not a structurally valid `.vox` file.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The header is well formed but carries a version this decoder rejects.
    #[error("unsupported VOX version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version read from the file.
        found: u32,
        /// The only version this decoder accepts.
        expected: u32,
    },

    /// The input file could not be opened.
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Structural violations found while reading the byte stream.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The first four bytes are not `"VOX "`.
    #[error("not a VOX file (magic: {found:02x?})")]
    BadMagic {
        /// The bytes found in place of the signature.
        found: [u8; 4],
    },

    /// The file header ended early or the stream failed while reading it.
    #[error("failed to read the file header {field}")]
    Header {
        field: &'static str,
        #[source]
        source: io::Error,
    },

    /// A read inside the chunk tree came up short or the stream failed.
    #[error("failed to read {}", describe_read(chunk, field, index))]
    Read {
        /// Chunk in progress; `None` while its identifier is being read.
        chunk: Option<ChunkId>,
        /// Name of the field being read.
        field: &'static str,
        /// Element index within a repeated payload (voxel or color number).
        index: Option<u32>,
        #[source]
        source: io::Error,
    },

    /// A fixed-size chunk declared a payload of the wrong length.
    #[error("{chunk} chunk payload should be {expected} bytes but is {found}")]
    PayloadSize {
        chunk: ChunkId,
        expected: u32,
        found: u32,
    },

    /// The children of a chunk consumed more bytes than it declared.
    #[error("{chunk} chunk children overran their declared size ({consumed} > {declared} bytes)")]
    ChildrenOverrun {
        chunk: ChunkId,
        declared: u32,
        consumed: u64,
    },

    /// The chunk tree nests deeper than the decode options allow.
    #[error("{chunk} chunk nested deeper than {max_depth} levels")]
    TooDeep { chunk: ChunkId, max_depth: u32 },

    /// No `SIZE` chunk was found and the decode options require one.
    #[error("file has no SIZE chunk")]
    MissingSize,
}

impl FormatError {
    /// The chunk that was being read when the error occurred, if any.
    pub fn chunk(&self) -> Option<ChunkId> {
        match self {
            Self::Read { chunk, .. } => *chunk,
            Self::PayloadSize { chunk, .. }
            | Self::ChildrenOverrun { chunk, .. }
            | Self::TooDeep { chunk, .. } => Some(*chunk),
            Self::BadMagic { .. } | Self::Header { .. } | Self::MissingSize => None,
        }
    }
}

fn describe_read(chunk: &Option<ChunkId>, field: &str, index: &Option<u32>) -> String {
    match (chunk, index) {
        (Some(chunk), Some(i)) => format!("the {chunk} chunk {field} #{i}"),
        (Some(chunk), None) => format!("the {chunk} chunk {field}"),
        (None, _) => format!("the {field}"),
    }
}
