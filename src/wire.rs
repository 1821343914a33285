use std::io::{self, ErrorKind, Read, Write};

use crate::error::SquashError;

pub(crate) const MAGIC: &str = "squash";
pub(crate) const VERSION_MARKER: &str = "--version";
pub(crate) const FORMAT_VERSION: u32 = 1;

pub(crate) fn write_u16<W: Write>(writer: &mut W, value: u16) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

pub(crate) fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

/// u32 length prefix followed by the raw UTF-8 bytes. Used for the
/// header strings and for file names.
pub(crate) fn write_str<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    write_u32(writer, text.len() as u32)?;
    writer.write_all(text.as_bytes())
}

pub(crate) fn read_u16<R: Read>(reader: &mut R) -> Result<u16, SquashError> {
    let mut bytes = [0u8; 2];
    reader.read_exact(&mut bytes).map_err(short_read)?;
    Ok(u16::from_be_bytes(bytes))
}

pub(crate) fn read_u32<R: Read>(reader: &mut R) -> Result<u32, SquashError> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes).map_err(short_read)?;
    Ok(u32::from_be_bytes(bytes))
}

/// Like `read_u32`, but distinguishes a clean end of stream (no bytes at
/// all) from a truncated value. The decoder's frame loop uses the clean
/// end as the archive terminator.
pub(crate) fn try_read_u32<R: Read>(reader: &mut R) -> Result<Option<u32>, SquashError> {
    let mut bytes = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SquashError::Io(e)),
        }
    }
    match filled {
        0 => Ok(None),
        4 => Ok(Some(u32::from_be_bytes(bytes))),
        _ => Err(SquashError::Corrupted("truncated file entry")),
    }
}

pub(crate) fn read_bytes<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, SquashError> {
    let mut bytes = Vec::new();
    let n = reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(SquashError::Io)?;
    if n != len {
        return Err(SquashError::Corrupted("unexpected end of archive"));
    }
    Ok(bytes)
}

pub(crate) fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    write_str(writer, MAGIC)?;
    write_str(writer, VERSION_MARKER)?;
    write_u32(writer, FORMAT_VERSION)
}

pub(crate) fn read_header<R: Read>(reader: &mut R) -> Result<(), SquashError> {
    expect_marker(reader, MAGIC, "bad magic")?;
    expect_marker(reader, VERSION_MARKER, "bad version marker")?;

    let version = read_u32(reader)?;
    if version != FORMAT_VERSION {
        return Err(SquashError::VersionMismatch(version));
    }
    Ok(())
}

fn expect_marker<R: Read>(
    reader: &mut R,
    expected: &str,
    context: &'static str,
) -> Result<(), SquashError> {
    let len = read_u32(reader)?;
    if len as usize != expected.len() {
        return Err(SquashError::Corrupted(context));
    }
    let bytes = read_bytes(reader, expected.len())?;
    if bytes != expected.as_bytes() {
        return Err(SquashError::Corrupted(context));
    }
    Ok(())
}

fn short_read(e: io::Error) -> SquashError {
    if e.kind() == ErrorKind::UnexpectedEof {
        SquashError::Corrupted("unexpected end of archive")
    } else {
        SquashError::Io(e)
    }
}
