//! Public decode entry points and the options that steer them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunk;
use crate::error::{FormatError, VoxError};
use crate::header;
use crate::model::{Palette, Voxel, VoxFile};
use crate::palette::default_palette;

/// Which palette ends up on the decoded file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteMode {
    /// Use the file's `RGBA` chunk if it has one, otherwise the default table.
    #[default]
    PreferCustom,
    /// Always use the default table, even when the file carries an `RGBA`
    /// chunk. Matches the output of decoders that materialize the default
    /// palette unconditionally after reading the tree.
    AlwaysDefault,
}

/// Knobs for [`decode_with`] and [`decode_file_with`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Palette selection policy.
    pub palette: PaletteMode,
    /// Fail with [`FormatError::MissingSize`] when no `SIZE` chunk is present
    /// instead of leaving the extents at zero.
    pub require_size: bool,
    /// Maximum chunk nesting depth; the root chunk is depth 0.
    pub max_depth: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            palette: PaletteMode::PreferCustom,
            require_size: false,
            max_depth: 64,
        }
    }
}

/// Result record filled in while the chunk tree is walked.
#[derive(Debug, Default)]
pub(crate) struct SceneBuilder {
    pub size: Option<[u32; 3]>,
    pub voxels: Vec<Voxel>,
    pub palette: Option<Palette>,
}

impl SceneBuilder {
    fn finish(self, version: u32, options: &DecodeOptions) -> Result<VoxFile, FormatError> {
        if options.require_size && self.size.is_none() {
            return Err(FormatError::MissingSize);
        }
        let [size_x, size_y, size_z] = self.size.unwrap_or_default();

        let palette = match (options.palette, self.palette) {
            (PaletteMode::PreferCustom, Some(custom)) => custom,
            _ => default_palette(),
        };

        Ok(VoxFile {
            version,
            size_x,
            size_y,
            size_z,
            voxels: self.voxels,
            palette,
        })
    }
}

/// Decodes a `.vox` stream with default options.
///
/// The reader is borrowed for the duration of the call and left wherever the
/// root chunk ends; it is never rewound or closed. Pass `&mut reader` to keep
/// using it afterwards.
pub fn decode<R: Read>(reader: R) -> Result<VoxFile, VoxError> {
    decode_with(reader, &DecodeOptions::default())
}

/// Decodes a `.vox` stream.
///
/// # Errors
///
/// - [`VoxError::Format`] for a bad signature, any short read, or a
///   malformed chunk.
/// - [`VoxError::UnsupportedVersion`] if the header version is not 150.
///
/// Nothing is returned on failure, even if part of the tree was read.
pub fn decode_with<R: Read>(mut reader: R, options: &DecodeOptions) -> Result<VoxFile, VoxError> {
    let version = header::read_header(&mut reader)?;

    let mut scene = SceneBuilder::default();
    let consumed = chunk::read_chunk(&mut reader, &mut scene, None, 0, options)?;

    let file = scene.finish(version, options)?;
    debug!(
        consumed,
        voxels = file.voxels.len(),
        custom_palette = file.palette.is_custom(),
        "decoded vox stream"
    );
    Ok(file)
}

/// Opens and decodes a `.vox` file with default options.
pub fn decode_file(path: impl AsRef<Path>) -> Result<VoxFile, VoxError> {
    decode_file_with(path, &DecodeOptions::default())
}

/// Opens and decodes a `.vox` file. The handle is closed on every path.
pub fn decode_file_with(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<VoxFile, VoxError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VoxError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "decoding vox file");
    decode_with(BufReader::new(file), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkId;
    use crate::model::{Color, PALETTE_SIZE, PaletteSource};
    use crate::testing::{ChunkBytes, vox_bytes};

    /// A stand-in for a small character model: 20×21×20 grid, 334 voxels.
    fn sword_like() -> (ChunkBytes, Vec<Voxel>) {
        let voxels: Vec<Voxel> = (0..334u32)
            .map(|i| Voxel::new((i % 20) as u8, (i / 20 % 21) as u8, (i / 17 % 20) as u8, (i % 255 + 1) as u8))
            .collect();
        let root = ChunkBytes::new(b"MAIN")
            .child(ChunkBytes::new(b"PACK").payload(1u32.to_le_bytes().to_vec()))
            .child(ChunkBytes::size(20, 21, 20))
            .child(ChunkBytes::xyzi(&voxels));
        (root, voxels)
    }

    fn custom_colors() -> [Color; PALETTE_SIZE] {
        let mut colors = [Color::default(); PALETTE_SIZE];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = Color::new(i as u8, 0x10, 255 - i as u8, 0x80);
        }
        colors
    }

    #[test]
    fn test_end_to_end_default_palette() {
        let (root, voxels) = sword_like();
        let file = decode(vox_bytes(&root).as_slice()).unwrap();

        assert_eq!(file.version, 150);
        assert_eq!(file.dimensions(), [20, 21, 20]);
        assert_eq!(file.voxels.len(), 334);
        assert_eq!(file.voxels, voxels);
        assert_eq!(file.palette, default_palette());
        assert_eq!(file.palette[0], Color::new(0, 0, 0, 0));
        assert_eq!(file.palette[1], Color::new(0xff, 0xff, 0xff, 0xff));
        assert_eq!(file.palette[2], Color::new(0xff, 0xff, 0xcc, 0xff));
    }

    #[test]
    fn test_decode_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chr_sword.vox");
        let (root, _) = sword_like();
        std::fs::write(&path, vox_bytes(&root)).unwrap();

        let file = decode_file(&path).unwrap();
        assert_eq!(file.version, 150);
        assert_eq!((file.size_x, file.size_y, file.size_z), (20, 21, 20));
        assert_eq!(file.voxel_count(), 334);
        assert_eq!(file.palette.source(), PaletteSource::Default);
    }

    #[test]
    fn test_decode_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.vox");
        let result = decode_file(&path);
        assert!(
            matches!(&result, Err(VoxError::Open { path: p, .. }) if *p == path),
            "got {result:?}"
        );
    }

    #[test]
    fn test_custom_palette_wins_wherever_it_appears() {
        let colors = custom_colors();
        let layouts = [
            ChunkBytes::new(b"MAIN")
                .child(ChunkBytes::size(1, 1, 1))
                .child(ChunkBytes::rgba(&colors)),
            ChunkBytes::new(b"MAIN")
                .child(ChunkBytes::rgba(&colors))
                .child(ChunkBytes::size(1, 1, 1)),
            ChunkBytes::new(b"MAIN").child(
                ChunkBytes::new(b"GRP ")
                    .payload(vec![0; 8])
                    .child(ChunkBytes::new(b"DEEP").child(ChunkBytes::rgba(&colors))),
            ),
        ];

        for root in layouts {
            let file = decode(vox_bytes(&root).as_slice()).unwrap();
            assert!(file.palette.is_custom());
            assert_eq!(file.palette.as_slice(), &colors[..]);
        }
    }

    #[test]
    fn test_always_default_mode_ignores_custom_palette() {
        let root = ChunkBytes::new(b"MAIN")
            .child(ChunkBytes::size(2, 2, 2))
            .child(ChunkBytes::rgba(&custom_colors()));
        let options = DecodeOptions {
            palette: PaletteMode::AlwaysDefault,
            ..DecodeOptions::default()
        };

        let file = decode_with(vox_bytes(&root).as_slice(), &options).unwrap();
        assert_eq!(file.palette, default_palette());
    }

    #[test]
    fn test_missing_size_leaves_zero_extents() {
        let root = ChunkBytes::new(b"MAIN").child(ChunkBytes::xyzi(&[Voxel::new(1, 2, 3, 4)]));
        let file = decode(vox_bytes(&root).as_slice()).unwrap();
        assert_eq!(file.dimensions(), [0, 0, 0]);
        assert_eq!(file.voxels, vec![Voxel::new(1, 2, 3, 4)]);
    }

    #[test]
    fn test_require_size() {
        let root = ChunkBytes::new(b"MAIN").child(ChunkBytes::xyzi(&[]));
        let options = DecodeOptions {
            require_size: true,
            ..DecodeOptions::default()
        };
        let result = decode_with(vox_bytes(&root).as_slice(), &options);
        assert!(
            matches!(result, Err(VoxError::Format(FormatError::MissingSize))),
            "got {result:?}"
        );
    }

    #[test]
    fn test_later_size_chunk_wins() {
        let root = ChunkBytes::new(b"MAIN")
            .child(ChunkBytes::size(1, 2, 3))
            .child(ChunkBytes::size(4, 5, 6));
        let file = decode(vox_bytes(&root).as_slice()).unwrap();
        assert_eq!(file.dimensions(), [4, 5, 6]);
    }

    #[test]
    fn test_size_payload_mismatch_fails_whole_decode() {
        for bad in [0usize, 8, 16] {
            let root = ChunkBytes::new(b"MAIN").child(ChunkBytes::new(b"SIZE").payload(vec![1; bad]));
            let result = decode(vox_bytes(&root).as_slice());
            assert!(
                matches!(
                    &result,
                    Err(VoxError::Format(FormatError::PayloadSize { chunk: ChunkId::SIZE, .. }))
                ),
                "size {bad}: got {result:?}"
            );
        }
    }

    #[test]
    fn test_version_rejected_before_chunks() {
        let mut bytes = b"VOX ".to_vec();
        bytes.extend_from_slice(&151u32.to_le_bytes());
        bytes.extend_from_slice(b"garbage that is not a chunk");

        let result = decode(bytes.as_slice());
        assert!(
            matches!(result, Err(VoxError::UnsupportedVersion { found: 151, expected: 150 })),
            "got {result:?}"
        );
    }

    #[test]
    fn test_every_truncation_fails() {
        let voxels = [Voxel::new(1, 2, 3, 4), Voxel::new(5, 6, 7, 8)];
        let root = ChunkBytes::new(b"MAIN")
            .child(ChunkBytes::size(8, 8, 8))
            .child(ChunkBytes::xyzi(&voxels))
            .child(ChunkBytes::new(b"nGRP").payload(vec![0; 6]));
        let bytes = vox_bytes(&root);
        assert!(decode(bytes.as_slice()).is_ok());

        for len in 0..bytes.len() {
            let result = decode(&bytes[..len]);
            assert!(
                matches!(result, Err(VoxError::Format(_))),
                "prefix of {len} bytes: got {result:?}"
            );
        }
    }

    #[test]
    fn test_truncation_error_names_chunk_in_progress() {
        let voxels = [Voxel::new(1, 2, 3, 4); 4];
        let root = ChunkBytes::new(b"MAIN").child(ChunkBytes::xyzi(&voxels));
        let bytes = vox_bytes(&root);

        // Header (8) + MAIN (12) + XYZI header (12) + count (4) + one voxel and a half.
        let result = decode(&bytes[..8 + 12 + 12 + 4 + 6]);
        match result {
            Err(VoxError::Format(err)) => {
                assert_eq!(err.chunk(), Some(ChunkId::XYZI));
                assert_eq!(err.to_string(), "failed to read the XYZI chunk voxel z #1");
            }
            other => panic!("expected a format error, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_left_after_root_chunk() {
        let root = ChunkBytes::new(b"MAIN").child(ChunkBytes::size(1, 1, 1));
        let mut bytes = vox_bytes(&root);
        bytes.extend_from_slice(b"tail");

        let mut data = bytes.as_slice();
        decode(&mut data).unwrap();
        assert_eq!(data, b"tail");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: DecodeOptions = ron::from_str("(require_size: true)").unwrap();
        assert!(options.require_size);
        assert_eq!(options.palette, PaletteMode::PreferCustom);
        assert_eq!(options.max_depth, 64);

        let options: DecodeOptions = ron::from_str("(palette: AlwaysDefault)").unwrap();
        assert_eq!(options.palette, PaletteMode::AlwaysDefault);
    }
}
