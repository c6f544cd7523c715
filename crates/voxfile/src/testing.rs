//! Byte builders for synthetic `.vox` streams used by the unit tests.

use crate::model::{Color, PALETTE_SIZE, Voxel};

/// A chunk and its children, serialized on demand.
///
/// Sizes are computed from the contents unless overridden, so tests can
/// build malformed headers on purpose.
#[derive(Clone, Debug)]
pub(crate) struct ChunkBytes {
    id: [u8; 4],
    payload: Vec<u8>,
    children: Vec<ChunkBytes>,
    declared_children: Option<u32>,
}

impl ChunkBytes {
    pub fn new(id: &[u8; 4]) -> Self {
        Self {
            id: *id,
            payload: Vec::new(),
            children: Vec::new(),
            declared_children: None,
        }
    }

    pub fn size(x: u32, y: u32, z: u32) -> Self {
        let mut payload = Vec::with_capacity(12);
        for v in [x, y, z] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        Self::new(b"SIZE").payload(payload)
    }

    pub fn xyzi(voxels: &[Voxel]) -> Self {
        let mut payload = (voxels.len() as u32).to_le_bytes().to_vec();
        for v in voxels {
            payload.extend_from_slice(&[v.x, v.y, v.z, v.index]);
        }
        Self::new(b"XYZI").payload(payload)
    }

    pub fn rgba(colors: &[Color; PALETTE_SIZE]) -> Self {
        let payload = colors.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect();
        Self::new(b"RGBA").payload(payload)
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    pub fn child(mut self, child: ChunkBytes) -> Self {
        self.children.push(child);
        self
    }

    /// Writes `children_size` into the header instead of the real value.
    pub fn declared_children(mut self, size: u32) -> Self {
        self.declared_children = Some(size);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut Vec<u8>) {
        let children: Vec<u8> = self.children.iter().flat_map(ChunkBytes::to_bytes).collect();
        let children_size = self.declared_children.unwrap_or(children.len() as u32);

        out.extend_from_slice(&self.id);
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&children_size.to_le_bytes());
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&children);
    }
}

/// A complete file: `"VOX "`, version 150, then `root`.
pub(crate) fn vox_bytes(root: &ChunkBytes) -> Vec<u8> {
    let mut out = b"VOX ".to_vec();
    out.extend_from_slice(&150u32.to_le_bytes());
    out.extend_from_slice(&root.to_bytes());
    out
}
