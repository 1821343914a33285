use std::io::{self, Cursor, ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::bit_io::BitWriter;
use crate::codebook::Codebook;
use crate::error::SquashError;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;
use crate::wire;

/// A named input the encoder can read twice: once to tabulate
/// frequencies, once to emit the compressed payload. Callers that
/// cannot re-open a stream should buffer it into a [`MemorySource`].
pub trait InputSource {
    fn name(&self) -> &str;

    /// Fresh reader over the full contents.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// An in-memory input, e.g. a file received as a JSON byte array or a
/// fully buffered multipart part.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl InputSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(&self.data[..])))
    }
}

/// Suggested transport filename for an archive.
pub fn archive_name(uid: &str) -> String {
    format!("{uid}.tar.sq")
}

pub struct ArchiveEncoder;

impl ArchiveEncoder {
    /// Writes a complete archive for the given inputs, in order.
    ///
    /// An empty input list is accepted and produces a header plus a
    /// zero-entry codebook. On any failure the sink's contents are
    /// unspecified and must be discarded by the caller.
    pub fn encode<S, W>(sources: &[S], sink: &mut W) -> Result<(), SquashError>
    where
        S: InputSource,
        W: Write,
    {
        let mut frequencies = FrequencyTable::new();
        for source in sources {
            frequencies.tally(&mut *source.open()?)?;
        }

        let codebook = match HuffmanTree::from_frequencies(&frequencies) {
            Some(tree) => Codebook::from_tree(&tree),
            None => Codebook::default(),
        };
        debug!(
            files = sources.len(),
            codes = codebook.len(),
            "squashing archive"
        );

        wire::write_header(sink)?;
        codebook.write_to(sink)?;

        for source in sources {
            Self::encode_file(source, &codebook, sink)?;
        }
        Ok(())
    }

    /// Convenience wrapper returning the archive as a byte buffer.
    pub fn encode_to_vec<S: InputSource>(sources: &[S]) -> Result<Vec<u8>, SquashError> {
        let mut archive = Vec::new();
        Self::encode(sources, &mut archive)?;
        Ok(archive)
    }

    fn encode_file<S, W>(source: &S, codebook: &Codebook, sink: &mut W) -> Result<(), SquashError>
    where
        S: InputSource,
        W: Write,
    {
        let mut reader = source.open()?;
        let mut writer = BitWriter::new();
        let mut original_len: u64 = 0;

        let mut chunk = [0u8; 8192];
        loop {
            let n = reader.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                let code = codebook
                    .code_for(byte)
                    .ok_or(SquashError::Internal("missing code for input symbol"))?;
                writer.push_code(code);
            }
            original_len += n as u64;
        }

        let original_len = u32::try_from(original_len).map_err(|_| {
            SquashError::Io(io::Error::new(
                ErrorKind::InvalidInput,
                "input file exceeds the 4 GiB archive limit",
            ))
        })?;
        let (payload, padding_bits) = writer.finish();

        trace!(
            file = source.name(),
            original_len,
            compressed_len = payload.len(),
            padding_bits,
            "squashed file"
        );

        wire::write_str(sink, source.name())?;
        wire::write_u32(sink, original_len)?;
        wire::write_u32(sink, payload.len() as u32)?;
        wire::write_u32(sink, padding_bits)?;
        sink.write_all(&payload)?;
        Ok(())
    }
}
