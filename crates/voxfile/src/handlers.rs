//! Payload handlers for the chunk types the decoder understands.

use std::io::Read;

use crate::chunk::ChunkHeader;
use crate::decode::SceneBuilder;
use crate::error::FormatError;
use crate::model::{Color, PALETTE_SIZE, Palette, PaletteSource, Voxel};
use crate::wire::{self, ShortRead};

/// Exact payload length of a `SIZE` chunk.
const SIZE_PAYLOAD_LEN: u32 = 12;

/// Upper bound on up-front voxel allocation; larger counts grow as data arrives.
const MAX_VOXEL_PREALLOC: usize = 1 << 16;

const SIZE_FIELDS: [&str; 3] = ["x extent", "y extent", "z extent"];
const VOXEL_FIELDS: [&str; 4] = ["voxel x", "voxel y", "voxel z", "voxel index"];
const COLOR_FIELDS: [&str; 4] = ["color r", "color g", "color b", "color a"];

/// `SIZE`: three `u32` extents. Later chunks overwrite earlier ones.
pub(crate) fn read_size<R: Read + ?Sized>(
    reader: &mut R,
    header: &ChunkHeader,
    scene: &mut SceneBuilder,
) -> Result<(), FormatError> {
    if header.payload_size != SIZE_PAYLOAD_LEN {
        return Err(FormatError::PayloadSize {
            chunk: header.id,
            expected: SIZE_PAYLOAD_LEN,
            found: header.payload_size,
        });
    }

    let mut buf = [0u8; 12];
    wire::read_exact_at(reader, &mut buf)
        .map_err(|short| record_error(header, &SIZE_FIELDS, 4, None, short))?;

    let extent = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
    scene.size = Some([extent(0), extent(4), extent(8)]);
    Ok(())
}

/// `XYZI`: a `u32` count followed by that many `(x, y, z, index)` records.
///
/// The count is trusted; it is not compared with the declared payload size.
pub(crate) fn read_voxels<R: Read + ?Sized>(
    reader: &mut R,
    header: &ChunkHeader,
    scene: &mut SceneBuilder,
) -> Result<(), FormatError> {
    let count = wire::read_u32(reader).map_err(|source| FormatError::Read {
        chunk: Some(header.id),
        field: "voxel count",
        index: None,
        source,
    })?;

    let mut voxels = Vec::with_capacity((count as usize).min(MAX_VOXEL_PREALLOC));
    for i in 0..count {
        let mut record = [0u8; 4];
        wire::read_exact_at(reader, &mut record)
            .map_err(|short| record_error(header, &VOXEL_FIELDS, 1, Some(i), short))?;
        let [x, y, z, index] = record;
        voxels.push(Voxel { x, y, z, index });
    }

    scene.voxels = voxels;
    Ok(())
}

/// `RGBA`: always 256 `(r, g, b, a)` records, whatever the declared size.
///
/// Entries are kept in on-disk order; no index remapping is applied.
pub(crate) fn read_palette<R: Read + ?Sized>(
    reader: &mut R,
    header: &ChunkHeader,
    scene: &mut SceneBuilder,
) -> Result<(), FormatError> {
    let mut buf = [0u8; PALETTE_SIZE * 4];
    wire::read_exact_at(reader, &mut buf).map_err(|short| {
        let entry = (short.filled / 4) as u32;
        record_error(header, &COLOR_FIELDS, 1, Some(entry), ShortRead {
            filled: short.filled % 4,
            source: short.source,
        })
    })?;

    let mut colors = [Color::default(); PALETTE_SIZE];
    for (color, rgba) in colors.iter_mut().zip(buf.chunks_exact(4)) {
        *color = Color::new(rgba[0], rgba[1], rgba[2], rgba[3]);
    }

    scene.palette = Some(Palette::new(colors, PaletteSource::Custom));
    Ok(())
}

/// Any other chunk: drop exactly `payload_size` bytes.
pub(crate) fn skip_payload<R: Read + ?Sized>(
    reader: &mut R,
    header: &ChunkHeader,
) -> Result<(), FormatError> {
    wire::discard(reader, u64::from(header.payload_size)).map_err(|source| FormatError::Read {
        chunk: Some(header.id),
        field: "payload",
        index: None,
        source,
    })
}

/// Names the field of a fixed-layout record in which a read stopped.
///
/// `width` is the byte width of each field in `fields`.
fn record_error(
    header: &ChunkHeader,
    fields: &[&'static str],
    width: usize,
    index: Option<u32>,
    short: ShortRead,
) -> FormatError {
    let field = fields
        .get(short.filled / width)
        .copied()
        .unwrap_or(fields[fields.len() - 1]);
    FormatError::Read {
        chunk: Some(header.id),
        field,
        index,
        source: short.source,
    }
}
