//! Recursive reader for the chunk tree.
//!
//! Every chunk starts with a 12-byte header:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Identifier (`SIZE`, `XYZI`, `RGBA`, ...) |
//! | 4 | 4 | Payload size (`u32`, little-endian) |
//! | 8 | 4 | Total size of nested children (`u32`, little-endian) |
//!
//! followed by the payload and then the children back to back. The reader
//! walks children until the parent's declared children size is used up, so
//! the stream position never has to be queried.

use std::fmt;
use std::io::Read;

use tracing::{debug, trace};

use crate::decode::{DecodeOptions, SceneBuilder};
use crate::error::FormatError;
use crate::{handlers, wire};

/// Size of the fixed chunk header in bytes.
pub const CHUNK_HEADER_LEN: u64 = 12;

/// Four-byte chunk tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    /// Root container produced by MagicaVoxel.
    pub const MAIN: Self = Self(*b"MAIN");
    /// Grid dimensions.
    pub const SIZE: Self = Self(*b"SIZE");
    /// Voxel array.
    pub const XYZI: Self = Self(*b"XYZI");
    /// Custom palette.
    pub const RGBA: Self = Self(*b"RGBA");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId(\"{self}\")")
    }
}

/// The fixed header in front of every chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    /// Declared payload length in bytes.
    pub payload_size: u32,
    /// Declared length of all nested children in bytes.
    pub children_size: u32,
}

impl ChunkHeader {
    /// Bytes this chunk occupies once its children have been accounted for.
    pub fn total_len(&self, children_consumed: u64) -> u64 {
        CHUNK_HEADER_LEN + u64::from(self.payload_size) + children_consumed
    }

    /// Reads a header. `parent` is only used to label a failed id read.
    fn read<R: Read + ?Sized>(reader: &mut R, parent: Option<ChunkId>) -> Result<Self, FormatError> {
        let id = wire::read_array::<R, 4>(reader).map_err(|source| FormatError::Read {
            chunk: parent,
            field: if parent.is_some() { "child chunk id" } else { "root chunk id" },
            index: None,
            source,
        })?;
        let id = ChunkId(id);

        let payload_size = wire::read_u32(reader).map_err(|source| FormatError::Read {
            chunk: Some(id),
            field: "payload size",
            index: None,
            source,
        })?;
        let children_size = wire::read_u32(reader).map_err(|source| FormatError::Read {
            chunk: Some(id),
            field: "children size",
            index: None,
            source,
        })?;

        Ok(Self {
            id,
            payload_size,
            children_size,
        })
    }
}

/// Reads one chunk and all of its descendants into `scene`.
///
/// Returns the bytes the chunk occupies according to its declared sizes:
/// `12 + payload_size + sum(children)`. Handlers that read a different amount
/// than declared do not change this figure.
pub(crate) fn read_chunk<R: Read + ?Sized>(
    reader: &mut R,
    scene: &mut SceneBuilder,
    parent: Option<ChunkId>,
    depth: u32,
    options: &DecodeOptions,
) -> Result<u64, FormatError> {
    let header = ChunkHeader::read(reader, parent)?;
    let id = header.id;

    if depth > options.max_depth {
        return Err(FormatError::TooDeep {
            chunk: id,
            max_depth: options.max_depth,
        });
    }

    debug!(
        chunk = %id,
        payload = header.payload_size,
        children = header.children_size,
        depth,
        "reading chunk"
    );

    match id {
        // Fixed-size chunk: an empty payload is a size mismatch, not a skip.
        ChunkId::SIZE => handlers::read_size(reader, &header, scene)?,
        _ if header.payload_size == 0 => {}
        ChunkId::XYZI => handlers::read_voxels(reader, &header, scene)?,
        ChunkId::RGBA => handlers::read_palette(reader, &header, scene)?,
        _ => {
            trace!(chunk = %id, bytes = header.payload_size, "skipping unknown chunk");
            handlers::skip_payload(reader, &header)?;
        }
    }

    let mut remaining = u64::from(header.children_size);
    let mut children_consumed = 0u64;
    while remaining > 0 {
        let consumed = read_chunk(reader, scene, Some(id), depth + 1, options)?;
        children_consumed += consumed;
        remaining = remaining
            .checked_sub(consumed)
            .ok_or(FormatError::ChildrenOverrun {
                chunk: id,
                declared: header.children_size,
                consumed: children_consumed,
            })?;
    }

    Ok(header.total_len(children_consumed))
}
