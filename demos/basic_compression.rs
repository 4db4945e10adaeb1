use huffcodec::{ContainerInfo, HuffmanCodec};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir();
    let sample_path = dir.join("huffcodec-sample.txt");
    let packed_path = dir.join("huffcodec-sample.txt.huff");
    let restored_path = dir.join("huffcodec-sample.restored.txt");

    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";
    std::fs::write(&sample_path, sample_text)?;
    println!("Created sample file: {} bytes", sample_text.len());

    let written = HuffmanCodec::encode_from_file(File::open(&sample_path)?, File::create(&packed_path)?)?;
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        written,
        written as f64 / sample_text.len() as f64 * 100.0
    );

    let info = ContainerInfo::inspect(&std::fs::read(&packed_path)?)?;
    println!("{}", info);

    HuffmanCodec::decode_from_file(File::open(&packed_path)?, File::create(&restored_path)?)?;
    let restored = std::fs::read_to_string(&restored_path)?;

    for path in [&sample_path, &packed_path, &restored_path] {
        std::fs::remove_file(path)?;
    }

    if restored != sample_text {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful, data matches exactly.");
    Ok(())
}
