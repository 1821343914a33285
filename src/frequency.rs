use std::io::{self, Read};

/// Byte histogram accumulated across every input stream before encoding.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable { counts: [0; 256] }
    }

    /// Reads the stream to its end, counting each byte. One pass only;
    /// the encoder asks the caller for a fresh stream on the second pass.
    pub fn tally<R: Read>(&mut self, mut reader: R) -> io::Result<()> {
        let mut chunk = [0u8; 8192];
        loop {
            let n = reader.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            for &byte in &chunk[..n] {
                self.counts[byte as usize] += 1;
            }
        }
        Ok(())
    }

    /// Symbols with count >= 1, in ascending symbol order.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_union_of_streams() {
        let mut table = FrequencyTable::new();
        table.tally(&b"abca"[..]).unwrap();
        table.tally(&b"ba"[..]).unwrap();

        let counts: Vec<(u8, u64)> = table.present().collect();
        assert_eq!(counts, vec![(b'a', 3), (b'b', 2), (b'c', 1)]);
    }

    #[test]
    fn test_empty_table() {
        let mut table = FrequencyTable::new();
        assert!(table.is_empty());
        table.tally(&b""[..]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.present().count(), 0);
    }
}
