//! # squash
//!
//! A multi-file Huffman archive codec for the `squash` wire format.
//!
//! All inputs share one Huffman code built from the union of their byte
//! frequencies (two passes over each input), and the archive stores the
//! codebook explicitly, so any conforming decoder can reconstruct the
//! originals byte for byte.
//!
//! ## Quick Start
//!
//! ```rust
//! use squash::{archive_name, ArchiveDecoder, ArchiveEncoder, MemorySource};
//!
//! let sources = vec![
//!     MemorySource::new("a.txt", &b"abracadabra"[..]),
//!     MemorySource::new("b.txt", &b"banana"[..]),
//! ];
//!
//! // Compress into one archive
//! let archive = ArchiveEncoder::encode_to_vec(&sources)?;
//! assert_eq!(archive_name("job-1"), "job-1.tar.sq");
//!
//! // Reconstruct the files
//! let files = ArchiveDecoder::decode(&archive[..])?;
//! assert_eq!(files[0].name, "a.txt");
//! assert_eq!(files[0].data, b"abracadabra");
//! # Ok::<(), squash::SquashError>(())
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod tree;

// Internal modules - not part of public API
mod bit_io;
mod codebook;
mod frequency;
mod wire;

// Re-export main types for convenience
pub use decoder::{ArchiveDecoder, DecodedFile};
pub use encoder::{archive_name, ArchiveEncoder, InputSource, MemorySource};
pub use error::SquashError;
