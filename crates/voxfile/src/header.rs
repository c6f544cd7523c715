//! File header: the `"VOX "` signature followed by a little-endian version.

use std::io::Read;

use crate::error::{FormatError, VoxError};
use crate::wire;

/// Signature at byte 0 of every `.vox` file.
pub const MAGIC: [u8; 4] = *b"VOX ";

/// The only format version this decoder accepts.
pub const SUPPORTED_VERSION: u32 = 150;

/// Reads the 8-byte header and returns the version.
///
/// Consumes exactly 8 bytes on success. Fails before touching the chunk tree
/// if the signature or version is wrong.
pub(crate) fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<u32, VoxError> {
    let magic: [u8; 4] = wire::read_array::<R, 4>(reader)
        .map_err(|source| FormatError::Header {
            field: "magic",
            source,
        })?;
    if magic != MAGIC {
        return Err(FormatError::BadMagic { found: magic }.into());
    }

    let version = wire::read_u32(reader).map_err(|source| FormatError::Header {
        field: "version",
        source,
    })?;
    if version != SUPPORTED_VERSION {
        return Err(VoxError::UnsupportedVersion {
            found: version,
            expected: SUPPORTED_VERSION,
        });
    }

    Ok(version)
}
