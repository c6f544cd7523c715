//! Little-endian primitives over [`std::io::Read`].

use std::io::{self, Read};

/// A read that ended before the buffer was full.
///
/// `filled` is the number of bytes that did arrive, which lets callers name
/// the exact field of a fixed-layout record where the stream ran out.
#[derive(Debug)]
pub(crate) struct ShortRead {
    pub filled: usize,
    pub source: io::Error,
}

/// Like [`Read::read_exact`], but reports how far it got on failure.
pub(crate) fn read_exact_at<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<(), ShortRead> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(ShortRead {
                    filled,
                    source: io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("stream ended after {filled} of {} bytes", buf.len()),
                    ),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => return Err(ShortRead { filled, source }),
        }
    }
    Ok(())
}

pub(crate) fn read_array<R: Read + ?Sized, const N: usize>(reader: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    read_exact_at(reader, &mut buf).map_err(|short| short.source)?;
    Ok(buf)
}

pub(crate) fn read_u32<R: Read + ?Sized>(reader: &mut R) -> io::Result<u32> {
    read_array::<R, 4>(reader).map(u32::from_le_bytes)
}

/// Reads and drops exactly `len` bytes.
pub(crate) fn discard<R: Read + ?Sized>(reader: &mut R, len: u64) -> io::Result<()> {
    let copied = io::copy(&mut reader.take(len), &mut io::sink())?;
    if copied < len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("stream ended after {copied} of {len} bytes"),
        ));
    }
    Ok(())
}
