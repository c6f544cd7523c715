//! In-memory model produced by the decoder: voxels, colors, and the palette.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Voxel / Color
// ---------------------------------------------------------------------------

/// One populated cell of the grid.
///
/// Coordinates are the raw bytes from the file and are not checked against
/// the grid extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    /// Palette index. Index 0 conventionally means "empty".
    pub index: u8,
}

impl Voxel {
    /// Creates a voxel at `(x, y, z)` using palette entry `index`.
    pub const fn new(x: u8, y: u8, z: u8, index: u8) -> Self {
        Self { x, y, z, index }
    }
}

/// An RGBA palette color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a color stored as `0xAABBGGRR` (red in the lowest byte).
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
            a: ((value >> 24) & 0xFF) as u8,
        }
    }

    /// Inverse of [`Color::from_packed`].
    pub const fn to_packed(self) -> u32 {
        (self.r as u32) | (self.g as u32) << 8 | (self.b as u32) << 16 | (self.a as u32) << 24
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Where a decoded palette came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteSource {
    /// The built-in default table.
    Default,
    /// An `RGBA` chunk in the file.
    Custom,
}

/// A 256-entry color table.
///
/// Every palette holds exactly [`PALETTE_SIZE`] colors, so indexing with a
/// `u8` never goes out of bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Palette {
    colors: Vec<Color>,
    source: PaletteSource,
}

impl Palette {
    /// Builds a palette from a full table of colors.
    pub fn new(colors: [Color; PALETTE_SIZE], source: PaletteSource) -> Self {
        Self {
            colors: colors.to_vec(),
            source,
        }
    }

    /// Returns the color for a palette index.
    pub fn get(&self, index: u8) -> Color {
        self.colors[index as usize]
    }

    /// Returns whether this table is the built-in default or a custom one.
    pub fn source(&self) -> PaletteSource {
        self.source
    }

    /// Returns `true` if the colors came from an `RGBA` chunk.
    pub fn is_custom(&self) -> bool {
        self.source == PaletteSource::Custom
    }

    /// All 256 colors in on-disk order.
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }
}

impl Index<u8> for Palette {
    type Output = Color;

    fn index(&self, index: u8) -> &Color {
        &self.colors[index as usize]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

// ---------------------------------------------------------------------------
// VoxFile
// ---------------------------------------------------------------------------

/// A fully decoded `.vox` scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoxFile {
    /// Format version read from the header.
    pub version: u32,
    /// Grid extent along X (0 if the file had no `SIZE` chunk).
    pub size_x: u32,
    /// Grid extent along Y.
    pub size_y: u32,
    /// Grid extent along Z.
    pub size_z: u32,
    /// Populated voxels in file order.
    pub voxels: Vec<Voxel>,
    /// The 256-entry color table, custom or default.
    pub palette: Palette,
}

impl VoxFile {
    /// Grid extents as `[x, y, z]`.
    pub fn dimensions(&self) -> [u32; 3] {
        [self.size_x, self.size_y, self.size_z]
    }

    /// Number of voxels decoded from `XYZI` chunks.
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Resolves a voxel's palette index to its color.
    pub fn color_of(&self, voxel: &Voxel) -> Color {
        self.palette.get(voxel.index)
    }
}
