#![no_main]
use libfuzzer_sys::fuzz_target;

use std::io::Read;
use zstream::{Backend, BufWriter, CompressionOutputStream, DecompressionInputStream, Level};

fuzz_target!(|data: Vec<Vec<u8>>| {
    let expected: Vec<u8> = data.iter().flatten().copied().collect();

    let mut sink = BufWriter::new(Vec::new());
    let mut encoder = CompressionOutputStream::new(&mut sink, Backend::Zlib, Level::Fastest, 0).unwrap();
    for chunk in &data {
        encoder.write_bytes(chunk).unwrap();
        encoder.flush().unwrap();
    }
    drop(encoder);
    let compressed = sink.into_inner().unwrap();

    let mut decoder = DecompressionInputStream::new(Backend::Zlib, 0).unwrap();
    decoder.set_underlying(&compressed[..], compressed.len());
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).unwrap();
    assert_eq!(expected, decoded);
});
