use squash::{archive_name, ArchiveDecoder, ArchiveEncoder, MemorySource};

const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog. \
                     The quick brown fox jumps over the lazy dog.";
const GREEDY: &[u8] =
    b"Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sources = vec![
        MemorySource::new("fox.txt", FOX),
        MemorySource::new("greedy.txt", GREEDY),
    ];
    let original_size = FOX.len() + GREEDY.len();

    println!("📝 Squashing {} files ({} bytes)", sources.len(), original_size);

    // Compress both files under one shared codebook
    let archive = ArchiveEncoder::encode_to_vec(&sources)?;
    let path = archive_name("demo");
    std::fs::write(&path, &archive)?;

    let ratio = archive.len() as f64 / original_size as f64;
    println!(
        "🗜️  Wrote {}: {} bytes ({:.1}% of original)",
        path,
        archive.len(),
        ratio * 100.0
    );

    // Reconstruct the files
    let bytes = std::fs::read(&path)?;
    let files = ArchiveDecoder::decode(&bytes[..])?;

    for file in &files {
        println!("✅ De-squashed {} ({} bytes)", file.name, file.data.len());
    }

    if files[0].data == FOX && files[1].data == GREEDY {
        println!("✅ Round trip successful! Data matches exactly.");
    } else {
        println!("❌ Round trip failed! Data mismatch.");
        return Err("round trip verification failed".into());
    }

    std::fs::remove_file(&path)?;
    println!("🧹 Cleaned up {path}");

    Ok(())
}
