use std::io::Read;

use tracing::{debug, trace};

use crate::bit_io::BitReader;
use crate::codebook::DecodeBook;
use crate::error::SquashError;
use crate::wire;

/// One reconstructed file, in archive order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    pub name: String,
    pub data: Vec<u8>,
}

pub struct ArchiveDecoder;

impl ArchiveDecoder {
    /// Parses a complete archive and reconstructs every file in it.
    ///
    /// The result preserves the archive's entry order; duplicate names
    /// are kept as-is. No partial results are returned on failure.
    pub fn decode<R: Read>(mut reader: R) -> Result<Vec<DecodedFile>, SquashError> {
        wire::read_header(&mut reader)?;
        let codebook = DecodeBook::read_from(&mut reader)?;

        let mut files = Vec::new();
        // A clean end of stream before a name length means the archive
        // is complete; anything else mid-frame is corruption.
        while let Some(name_len) = wire::try_read_u32(&mut reader)? {
            let name_bytes = wire::read_bytes(&mut reader, name_len as usize)?;
            let name = String::from_utf8(name_bytes)
                .map_err(|_| SquashError::Corrupted("file name is not valid UTF-8"))?;

            let original_len = wire::read_u32(&mut reader)?;
            let compressed_len = wire::read_u32(&mut reader)?;
            let padding_bits = wire::read_u32(&mut reader)?;
            if padding_bits > 7 {
                return Err(SquashError::Corrupted("padding bits out of range"));
            }

            let payload = wire::read_bytes(&mut reader, compressed_len as usize)?;
            trace!(
                file = %name,
                original_len,
                compressed_len,
                padding_bits,
                "de-squashing file"
            );
            let data = decode_payload(
                &codebook,
                &payload,
                padding_bits as u8,
                original_len as usize,
            )?;

            files.push(DecodedFile { name, data });
        }

        debug!(files = files.len(), "de-squashed archive");
        Ok(files)
    }
}

/// Walks the payload MSB-first, growing a running key until it matches a
/// code, until `target` symbols have been produced. Remaining bits,
/// padding included, are discarded.
fn decode_payload(
    codebook: &DecodeBook,
    payload: &[u8],
    padding_bits: u8,
    target: usize,
) -> Result<Vec<u8>, SquashError> {
    let mut data = Vec::with_capacity(target);
    if target == 0 {
        return Ok(data);
    }

    let mut key = String::new();
    for bit in BitReader::new(payload, padding_bits) {
        key.push(if bit { '1' } else { '0' });
        if key.len() > codebook.max_code_len() {
            return Err(SquashError::Corrupted("bit pattern matches no code"));
        }
        if let Some(symbol) = codebook.lookup(&key) {
            data.push(symbol);
            key.clear();
            if data.len() == target {
                return Ok(data);
            }
        }
    }

    Err(SquashError::Corrupted("payload shorter than declared length"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{ArchiveEncoder, MemorySource};

    fn encode(files: &[(&str, &[u8])]) -> Vec<u8> {
        let sources: Vec<MemorySource> = files
            .iter()
            .map(|(name, data)| MemorySource::new(*name, *data))
            .collect();
        ArchiveEncoder::encode_to_vec(&sources).unwrap()
    }

    #[test]
    fn test_decode_preserves_order_and_contents() {
        let archive = encode(&[("a", b"foo"), ("b", b"bar")]);
        let files = ArchiveDecoder::decode(&archive[..]).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], DecodedFile { name: "a".into(), data: b"foo".to_vec() });
        assert_eq!(files[1], DecodedFile { name: "b".into(), data: b"bar".to_vec() });
    }

    #[test]
    fn test_truncated_payload_is_corrupted() {
        let mut archive = encode(&[("x", b"ABRACADABRA")]);
        archive.truncate(archive.len() - 1);
        let err = ArchiveDecoder::decode(&archive[..]).unwrap_err();
        assert!(err.is_corrupted());
    }

    #[test]
    fn test_declared_length_longer_than_payload_is_corrupted() {
        let mut archive = encode(&[("x", b"AB")]);
        // frame starts right after the two-entry codebook; original_len
        // sits after the u32 name length and 1-byte name
        let frame = archive.len() - (4 + 1 + 4 + 4 + 4 + 1);
        let original_len_at = frame + 4 + 1;
        archive[original_len_at..original_len_at + 4].copy_from_slice(&100u32.to_be_bytes());

        let err = ArchiveDecoder::decode(&archive[..]).unwrap_err();
        assert!(err.is_corrupted());
    }

    #[test]
    fn test_padding_out_of_range_is_corrupted() {
        let mut archive = encode(&[("x", b"AB")]);
        let frame = archive.len() - (4 + 1 + 4 + 4 + 4 + 1);
        let padding_at = frame + 4 + 1 + 4 + 4;
        archive[padding_at..padding_at + 4].copy_from_slice(&8u32.to_be_bytes());

        let err = ArchiveDecoder::decode(&archive[..]).unwrap_err();
        assert!(err.is_corrupted());
    }

    #[test]
    fn test_payload_without_codebook_is_corrupted() {
        // empty codebook, then a frame claiming one symbol of payload
        let mut archive = Vec::new();
        crate::wire::write_header(&mut archive).unwrap();
        crate::wire::write_u32(&mut archive, 0).unwrap();
        crate::wire::write_str(&mut archive, "ghost").unwrap();
        crate::wire::write_u32(&mut archive, 1).unwrap();
        crate::wire::write_u32(&mut archive, 1).unwrap();
        crate::wire::write_u32(&mut archive, 0).unwrap();
        archive.push(0x00);

        let err = ArchiveDecoder::decode(&archive[..]).unwrap_err();
        assert!(err.is_corrupted());
    }

    #[test]
    fn test_zero_length_file_under_empty_codebook() {
        let archive = encode(&[("empty", b"")]);
        let files = ArchiveDecoder::decode(&archive[..]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "empty");
        assert!(files[0].data.is_empty());
    }
}
