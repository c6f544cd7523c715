//! Decoder for MagicaVoxel `.vox` files (format version 150).
//!
//! A file is an 8-byte header (`"VOX "` + little-endian `u32` version)
//! followed by a single root chunk. Chunks nest; the decoder understands
//! `SIZE` (grid extents), `XYZI` (voxels) and `RGBA` (custom palette) and
//! skips everything else without interpreting it.
//!
//! ```no_run
//! let file = voxfile::decode_file("chr_sword.vox")?;
//! println!("{:?}: {} voxels", file.dimensions(), file.voxels.len());
//! for voxel in &file.voxels {
//!     let color = file.color_of(voxel);
//!     println!("{} {} {} -> {color:?}", voxel.x, voxel.y, voxel.z);
//! }
//! # Ok::<(), voxfile::VoxError>(())
//! ```

pub mod chunk;
pub mod decode;
pub mod error;
pub mod header;
pub mod model;
pub mod palette;

mod handlers;
mod wire;

#[cfg(test)]
mod testing;

pub use chunk::{ChunkHeader, ChunkId};
pub use decode::{DecodeOptions, PaletteMode, decode, decode_file, decode_file_with, decode_with};
pub use error::{FormatError, VoxError};
pub use header::{MAGIC, SUPPORTED_VERSION};
pub use model::{Color, PALETTE_SIZE, Palette, PaletteSource, Voxel, VoxFile};
pub use palette::{DEFAULT_PALETTE, default_palette};
